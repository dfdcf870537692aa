use std::collections::VecDeque;

use crate::domain::process::ProcessRecord;
use crate::domain::scheduler::Scheduler;
use crate::domain::segment::ExecutionSegment;
use crate::error::{Error, Result};

/// Preemptive Round-Robin with a fixed quantum.
///
/// Processes that arrive while a slice runs are enqueued before the preempted
/// process is put back.
#[derive(Debug, Clone, Copy)]
pub struct RoundRobinScheduler {
    quantum: i64,
}

impl RoundRobinScheduler {
    pub fn new(quantum: i64) -> Result<Self> {
        if quantum <= 0 {
            return Err(Error::InvalidConfiguration(format!("round robin quantum must be positive, got {}", quantum)));
        }
        Ok(RoundRobinScheduler { quantum })
    }

    pub fn quantum(&self) -> i64 {
        self.quantum
    }
}

/// Moves every not yet admitted process with `arrival <= now` onto the ready queue.
/// `order` is sorted by `(arrival, id)` and `cursor` marks the first unadmitted entry.
fn admit_arrivals(processes: &[ProcessRecord], order: &[usize], cursor: &mut usize, ready_queue: &mut VecDeque<usize>, now: i64) {
    while let Some(&index) = order.get(*cursor) {
        if processes[index].arrival_time > now {
            break;
        }
        ready_queue.push_back(index);
        *cursor += 1;
    }
}

impl Scheduler for RoundRobinScheduler {
    fn name(&self) -> &'static str {
        "Round-Robin"
    }

    fn build_timeline(&self, processes: &mut [ProcessRecord]) -> Vec<ExecutionSegment> {
        let mut order: Vec<usize> = (0..processes.len()).collect();
        order.sort_by(|&a, &b| {
            processes[a]
                .arrival_time
                .cmp(&processes[b].arrival_time)
                .then_with(|| processes[a].id.cmp(&processes[b].id))
        });

        let mut segments = Vec::new();
        let mut ready_queue = VecDeque::with_capacity(processes.len());
        let mut cursor = 0;
        let mut current_time = 0;

        admit_arrivals(processes, &order, &mut cursor, &mut ready_queue, current_time);

        loop {
            let Some(index) = ready_queue.pop_front() else {
                let Some(&next) = order.get(cursor) else {
                    break;
                };
                let arrival = processes[next].arrival_time;
                segments.push(ExecutionSegment::idle(current_time, arrival));
                current_time = arrival;
                admit_arrivals(processes, &order, &mut cursor, &mut ready_queue, current_time);
                continue;
            };

            let process = &mut processes[index];
            let slice = self.quantum.min(process.remaining_time());
            let end_time = current_time + slice;

            process.record_dispatch(current_time);
            process.execute(slice, end_time);
            segments.push(ExecutionSegment::running(process.id.clone(), current_time, end_time));
            let finished = process.is_completed();
            log::debug!("Dispatched {} at {} for {} ticks, {} remaining.", process.id, current_time, slice, process.remaining_time());

            current_time = end_time;

            // New arrivals go first; the preempted process queues up behind them.
            admit_arrivals(processes, &order, &mut cursor, &mut ready_queue, current_time);
            if !finished {
                ready_queue.push_back(index);
            }
        }

        segments
    }
}
