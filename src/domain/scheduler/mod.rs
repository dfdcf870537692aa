pub mod fcfs;
pub mod non_preemptive;
pub mod priority;
pub mod round_robin;
pub mod scheduler_type;
pub mod sjf;

use std::fmt::Debug;

use crate::domain::process::{ProcessId, ProcessMetrics, ProcessRecord, validate_processes};
use crate::domain::segment::{ExecutionSegment, makespan, timeline_violations};
use crate::error::Result;

pub use fcfs::FcfsScheduler;
pub use priority::PriorityScheduler;
pub use round_robin::RoundRobinScheduler;
pub use scheduler_type::{SchedulerConfig, SchedulerType};
pub use sjf::SjfScheduler;

/// A CPU scheduling algorithm.
///
/// Implementations only provide [`Scheduler::build_timeline`], which runs over working
/// copies that the provided [`Scheduler::schedule`] allocates for every call. The
/// caller's records are never touched.
pub trait Scheduler: Debug {
    /// Display name of the algorithm.
    fn name(&self) -> &'static str;

    /// Produces the full timeline for already validated working copies, recording start and
    /// completion times on them. Must complete every process and fill idle gaps explicitly.
    fn build_timeline(&self, processes: &mut [ProcessRecord]) -> Vec<ExecutionSegment>;

    fn schedule(&self, processes: &[ProcessRecord]) -> Result<ScheduleOutcome> {
        validate_processes(processes)?;

        let mut working: Vec<ProcessRecord> = processes.iter().map(ProcessRecord::working_copy).collect();
        let segments = self.build_timeline(&mut working);

        debug_assert!(
            timeline_violations(&segments, &working).is_empty(),
            "{} produced an inconsistent timeline: {:?}",
            self.name(),
            timeline_violations(&segments, &working)
        );

        log::debug!("{} scheduled {} processes into {} segments (makespan {}).", self.name(), working.len(), segments.len(), makespan(&segments));

        Ok(ScheduleOutcome { segments, processes: working })
    }
}

/// Result of one scheduling pass: the timeline plus the completed working copies,
/// in the same order as the input processes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleOutcome {
    pub segments: Vec<ExecutionSegment>,
    pub processes: Vec<ProcessRecord>,
}

impl ScheduleOutcome {
    pub fn makespan(&self) -> i64 {
        makespan(&self.segments)
    }

    pub fn process(&self, id: &ProcessId) -> Option<&ProcessRecord> {
        self.processes.iter().find(|process| &process.id == id)
    }

    pub fn metrics(&self) -> Vec<ProcessMetrics> {
        self.processes.iter().map(ProcessRecord::metrics).collect()
    }

    /// Process ids in dispatch order, idle segments skipped.
    pub fn run_order(&self) -> Vec<&ProcessId> {
        self.segments.iter().filter_map(|segment| segment.process_id.as_ref()).collect()
    }
}
