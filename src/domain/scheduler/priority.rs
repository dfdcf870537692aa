use crate::domain::process::ProcessRecord;
use crate::domain::scheduler::Scheduler;
use crate::domain::scheduler::non_preemptive::run_to_completion;
use crate::domain::segment::ExecutionSegment;

/// Static, non-preemptive priority scheduling keyed on `(priority, arrival, id)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PriorityScheduler;

impl Scheduler for PriorityScheduler {
    fn name(&self) -> &'static str {
        "Priority"
    }

    fn build_timeline(&self, processes: &mut [ProcessRecord]) -> Vec<ExecutionSegment> {
        run_to_completion(processes, |process| (process.priority, process.arrival_time))
    }
}
