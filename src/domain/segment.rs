use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

use crate::domain::process::{ProcessId, ProcessRecord};

/// One contiguous slice `[start_tick, end_tick)` of CPU time.
///
/// `process_id` is `None` for an idle slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionSegment {
    pub process_id: Option<ProcessId>,
    pub start_tick: i64,
    pub end_tick: i64,
}

impl ExecutionSegment {
    pub fn running(process_id: ProcessId, start_tick: i64, end_tick: i64) -> Self {
        debug_assert!(end_tick > start_tick, "empty segment for {} at {}", process_id, start_tick);
        ExecutionSegment { process_id: Some(process_id), start_tick, end_tick }
    }

    pub fn idle(start_tick: i64, end_tick: i64) -> Self {
        debug_assert!(end_tick > start_tick, "empty idle segment at {}", start_tick);
        ExecutionSegment { process_id: None, start_tick, end_tick }
    }

    pub fn duration(&self) -> i64 {
        self.end_tick - self.start_tick
    }

    pub fn is_idle(&self) -> bool {
        self.process_id.is_none()
    }

    pub fn covers(&self, tick: i64) -> bool {
        self.start_tick <= tick && tick < self.end_tick
    }
}

impl fmt::Display for ExecutionSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.process_id {
            Some(id) => write!(f, "{}:[{},{})", id, self.start_tick, self.end_tick),
            None => write!(f, "idle:[{},{})", self.start_tick, self.end_tick),
        }
    }
}

/// End tick of the last segment, or 0 for an empty timeline.
pub fn makespan(segments: &[ExecutionSegment]) -> i64 {
    segments.last().map_or(0, |segment| segment.end_tick)
}

/// Checks a finished timeline against the processes that produced it and returns
/// a description of every violated invariant. An empty result means the timeline is sound.
pub fn timeline_violations(segments: &[ExecutionSegment], processes: &[ProcessRecord]) -> Vec<String> {
    let mut violations = Vec::new();

    if let Some(first) = segments.first() {
        if first.start_tick != 0 {
            violations.push(format!("timeline starts at {} instead of 0", first.start_tick));
        }
    }

    for segment in segments {
        if segment.duration() < 1 {
            violations.push(format!("segment {} has no duration", segment));
        }
    }

    for pair in segments.windows(2) {
        if pair[0].end_tick != pair[1].start_tick {
            violations.push(format!("gap or overlap between {} and {}", pair[0], pair[1]));
        }
    }

    let mut executed: HashMap<&ProcessId, i64> = HashMap::new();
    let mut last_end: HashMap<&ProcessId, i64> = HashMap::new();
    for segment in segments {
        if let Some(id) = &segment.process_id {
            *executed.entry(id).or_insert(0) += segment.duration();
            last_end.insert(id, segment.end_tick);
        }
    }

    for process in processes {
        let ran = executed.get(&process.id).copied().unwrap_or(0);
        if ran != process.burst_time {
            violations.push(format!("process {} ran {} ticks, burst is {}", process.id, ran, process.burst_time));
        }

        match (process.start_time(), process.completion_time()) {
            (Some(start), Some(completion)) => {
                if !(process.arrival_time <= start && start <= completion) {
                    violations.push(format!(
                        "process {} violates arrival <= start <= completion ({} / {} / {})",
                        process.id, process.arrival_time, start, completion
                    ));
                }
                if last_end.get(&process.id) != Some(&completion) {
                    violations.push(format!("process {} completion {} is not the end of its last segment", process.id, completion));
                }
            }
            _ => violations.push(format!("process {} was never completed", process.id)),
        }
    }

    violations
}
