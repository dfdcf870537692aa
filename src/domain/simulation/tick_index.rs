use std::collections::HashMap;

use crate::domain::process::{ProcessId, ProcessMetrics, ProcessRecord};
use crate::domain::segment::{ExecutionSegment, makespan};
use crate::domain::simulation::snapshot::{ProcessProgress, ProcessState, SimulationSnapshot};

#[derive(Debug, Clone, PartialEq, Eq)]
struct TickFrame {
    running_process_id: Option<ProcessId>,
    ready_queue: Vec<ProcessId>,
    progress: Vec<ProcessProgress>,
}

/// Precomputed per-tick view of a finished timeline.
///
/// Holds one frame for every tick in `[0, makespan]`, so an empty timeline still has
/// the single frame at tick 0. Built once and never modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickIndex {
    frames: Vec<TickFrame>,
    metrics: Vec<ProcessMetrics>,
    makespan: i64,
}

impl TickIndex {
    /// Builds the index from a timeline and the completed processes that produced it.
    pub fn build(segments: &[ExecutionSegment], processes: &[ProcessRecord]) -> Self {
        let makespan = makespan(segments);

        let position: HashMap<&ProcessId, usize> = processes.iter().enumerate().map(|(index, process)| (&process.id, index)).collect();

        let mut display_order: Vec<usize> = (0..processes.len()).collect();
        display_order.sort_by(|&a, &b| {
            processes[a]
                .arrival_time
                .cmp(&processes[b].arrival_time)
                .then_with(|| processes[a].id.cmp(&processes[b].id))
        });

        let mut executed = vec![0_i64; processes.len()];
        let mut frames = Vec::with_capacity(makespan as usize + 1);
        let mut cursor = 0;

        for tick in 0..=makespan {
            // Segments are contiguous, so the covering one is never behind the cursor.
            while cursor < segments.len() && segments[cursor].end_tick <= tick {
                cursor += 1;
            }

            let running_process_id = segments.get(cursor).filter(|segment| segment.covers(tick)).and_then(|segment| segment.process_id.clone());
            let running_index = running_process_id.as_ref().and_then(|id| position.get(id).copied());

            let is_active = |process: &ProcessRecord| process.arrival_time <= tick && process.completion_time().is_none_or(|completion| completion > tick);

            let ready_queue = display_order
                .iter()
                .filter(|&&index| Some(index) != running_index && is_active(&processes[index]))
                .map(|&index| processes[index].id.clone())
                .collect();

            let progress = processes
                .iter()
                .enumerate()
                .map(|(index, process)| {
                    let state = if Some(index) == running_index {
                        ProcessState::Running
                    } else if process.arrival_time > tick {
                        ProcessState::NotArrived
                    } else if is_active(process) {
                        ProcessState::Ready
                    } else {
                        ProcessState::Completed
                    };

                    ProcessProgress { id: process.id.clone(), state, remaining_time: process.burst_time - executed[index] }
                })
                .collect();

            if let Some(index) = running_index {
                executed[index] += 1;
            }

            frames.push(TickFrame { running_process_id, ready_queue, progress });
        }

        log::debug!("Built tick index with {} frames for {} processes.", frames.len(), processes.len());

        TickIndex { frames, metrics: processes.iter().map(ProcessRecord::metrics).collect(), makespan }
    }

    /// Number of navigable ticks, always `makespan + 1`.
    pub fn tick_count(&self) -> usize {
        self.frames.len()
    }

    pub fn makespan(&self) -> i64 {
        self.makespan
    }

    pub fn metrics(&self) -> &[ProcessMetrics] {
        &self.metrics
    }

    /// Returns a fresh snapshot for `tick`, or `None` when it is outside `[0, makespan]`.
    pub fn snapshot(&self, tick: i64) -> Option<SimulationSnapshot> {
        let frame = usize::try_from(tick).ok().and_then(|index| self.frames.get(index))?;

        Some(SimulationSnapshot {
            tick,
            running_process_id: frame.running_process_id.clone(),
            ready_queue: frame.ready_queue.clone(),
            progress: frame.progress.clone(),
            metrics: self.metrics.clone(),
            makespan: self.makespan,
        })
    }
}
