use crate::domain::process::ProcessRecord;
use crate::domain::segment::ExecutionSegment;

/// Decision loop shared by the non-preemptive selection schedulers.
///
/// Whenever the CPU is free, the arrived, unfinished process with the smallest
/// `key` (ties broken by id) runs to completion. With nothing arrived, an idle
/// segment is emitted up to the earliest pending arrival.
pub fn run_to_completion<K, F>(processes: &mut [ProcessRecord], key: F) -> Vec<ExecutionSegment>
where
    K: Ord,
    F: Fn(&ProcessRecord) -> K,
{
    let mut segments = Vec::with_capacity(processes.len());
    let mut current_time = 0;

    loop {
        let selected = processes
            .iter()
            .enumerate()
            .filter(|(_, process)| !process.is_completed() && process.arrival_time <= current_time)
            .min_by(|(_, a), (_, b)| key(*a).cmp(&key(*b)).then_with(|| a.id.cmp(&b.id)))
            .map(|(index, _)| index);

        match selected {
            Some(index) => {
                let process = &mut processes[index];
                let ticks = process.remaining_time();
                let finish_time = current_time + ticks;

                process.record_dispatch(current_time);
                process.execute(ticks, finish_time);
                segments.push(ExecutionSegment::running(process.id.clone(), current_time, finish_time));
                log::debug!("Dispatched {} at {} until {}.", process.id, current_time, finish_time);

                current_time = finish_time;
            }
            None => {
                let next_arrival = processes.iter().filter(|process| !process.is_completed()).map(|process| process.arrival_time).min();

                match next_arrival {
                    Some(arrival) => {
                        segments.push(ExecutionSegment::idle(current_time, arrival));
                        current_time = arrival;
                    }
                    None => break,
                }
            }
        }
    }

    segments
}
