use std::path::Path;

use crate::domain::scheduler::{SchedulerConfig, SchedulerType};
use crate::domain::simulation::SimulationController;
use crate::error::Result;
use crate::loader::scenario::import_scenario;

pub mod api;
pub mod domain;
pub mod error;
pub mod loader;
pub mod logger;

pub use domain::process::{ProcessId, ProcessMetrics, ProcessRecord};
pub use domain::segment::ExecutionSegment;
pub use domain::simulation::SimulationSnapshot;

/// Loads a scenario file and returns a controller positioned at tick 0 of its run.
pub fn load_simulation(file_path: impl AsRef<Path>, scheduler_type: SchedulerType, config: SchedulerConfig) -> Result<SimulationController> {
    let processes = import_scenario(file_path)?;
    log::info!("Scenario loaded. Scheduling with {}.", scheduler_type);

    let mut controller = SimulationController::new();
    controller.initialize(&processes, scheduler_type, config)?;

    Ok(controller)
}
