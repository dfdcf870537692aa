use crate::domain::process::ProcessRecord;
use crate::domain::scheduler::Scheduler;
use crate::domain::segment::ExecutionSegment;

/// First-Come, First-Served. One sort by `(arrival, id)`, then strictly sequential.
#[derive(Debug, Clone, Copy, Default)]
pub struct FcfsScheduler;

impl Scheduler for FcfsScheduler {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn build_timeline(&self, processes: &mut [ProcessRecord]) -> Vec<ExecutionSegment> {
        let mut order: Vec<usize> = (0..processes.len()).collect();
        order.sort_by(|&a, &b| {
            processes[a]
                .arrival_time
                .cmp(&processes[b].arrival_time)
                .then_with(|| processes[a].id.cmp(&processes[b].id))
        });

        let mut segments = Vec::with_capacity(processes.len());
        let mut current_time = 0;

        for index in order {
            let process = &mut processes[index];

            if current_time < process.arrival_time {
                segments.push(ExecutionSegment::idle(current_time, process.arrival_time));
                current_time = process.arrival_time;
            }

            let finish_time = current_time + process.burst_time;
            process.record_dispatch(current_time);
            process.execute(process.burst_time, finish_time);
            segments.push(ExecutionSegment::running(process.id.clone(), current_time, finish_time));
            log::debug!("Dispatched {} at {} until {}.", process.id, current_time, finish_time);

            current_time = finish_time;
        }

        segments
    }
}
