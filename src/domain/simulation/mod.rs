pub mod controller;
pub mod listener;
pub mod snapshot;
pub mod tick_index;


pub use controller::{ControllerState, NavigationAction, SimulationController};
pub use listener::{SnapshotListener, SnapshotRecorder};
pub use snapshot::{ProcessProgress, ProcessState, SimulationSnapshot};
pub use tick_index::TickIndex;
