use crate::domain::process::ProcessRecord;
use crate::domain::scheduler::Scheduler;
use crate::domain::scheduler::non_preemptive::run_to_completion;
use crate::domain::segment::ExecutionSegment;

/// Non-preemptive Shortest Job First, keyed on `(burst, arrival, id)`.
///
/// A running process is never interrupted, even by a shorter later arrival.
#[derive(Debug, Clone, Copy, Default)]
pub struct SjfScheduler;

impl Scheduler for SjfScheduler {
    fn name(&self) -> &'static str {
        "SJF"
    }

    fn build_timeline(&self, processes: &mut [ProcessRecord]) -> Vec<ExecutionSegment> {
        run_to_completion(processes, |process| (process.burst_time, process.arrival_time))
    }
}
