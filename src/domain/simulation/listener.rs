use std::{cell::RefCell, rc::Rc};

use crate::domain::simulation::snapshot::SimulationSnapshot;

/// Receives the current snapshot after every successful controller transition.
///
/// The controller is mutably borrowed while the listener runs, so a listener cannot
/// navigate the controller it is attached to.
pub trait SnapshotListener {
    fn on_snapshot(&mut self, snapshot: &SimulationSnapshot);
}

impl<F> SnapshotListener for F
where
    F: FnMut(&SimulationSnapshot),
{
    fn on_snapshot(&mut self, snapshot: &SimulationSnapshot) {
        self(snapshot)
    }
}

/// Listener that keeps every delivered snapshot in a shared list.
///
/// Clones share the list, so keep one clone and hand the other to the controller.
#[derive(Debug, Clone, Default)]
pub struct SnapshotRecorder {
    snapshots: Rc<RefCell<Vec<SimulationSnapshot>>>,
}

impl SnapshotRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.snapshots.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.borrow().is_empty()
    }

    pub fn ticks(&self) -> Vec<i64> {
        self.snapshots.borrow().iter().map(|snapshot| snapshot.tick).collect()
    }

    pub fn take(&self) -> Vec<SimulationSnapshot> {
        self.snapshots.borrow_mut().drain(..).collect()
    }
}

impl SnapshotListener for SnapshotRecorder {
    fn on_snapshot(&mut self, snapshot: &SimulationSnapshot) {
        self.snapshots.borrow_mut().push(snapshot.clone());
    }
}
