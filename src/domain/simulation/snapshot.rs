use serde::Serialize;

use crate::domain::process::{ProcessId, ProcessMetrics};

/// Where a process stands at one particular tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ProcessState {
    NotArrived,
    Ready,
    Running,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessProgress {
    pub id: ProcessId,
    pub state: ProcessState,
    /// Ticks of work still outstanding at the start of this tick.
    pub remaining_time: i64,
}

/// Immutable view of a run at one tick.
///
/// `ready_queue` lists arrived, unfinished, not running processes by arrival then id.
/// It is for display only and says nothing about the order a scheduler would pick them in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationSnapshot {
    pub tick: i64,
    pub running_process_id: Option<ProcessId>,
    pub ready_queue: Vec<ProcessId>,
    /// Per-tick state of every process, in input order.
    pub progress: Vec<ProcessProgress>,
    /// Final metrics of every process, in input order.
    pub metrics: Vec<ProcessMetrics>,
    pub makespan: i64,
}

impl SimulationSnapshot {
    pub fn is_idle(&self) -> bool {
        self.running_process_id.is_none()
    }

    pub fn progress_of(&self, id: &ProcessId) -> Option<&ProcessProgress> {
        self.progress.iter().find(|progress| &progress.id == id)
    }
}
