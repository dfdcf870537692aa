use std::fmt;

use crate::domain::process::ProcessRecord;
use crate::domain::scheduler::{ScheduleOutcome, SchedulerConfig, SchedulerType};
use crate::domain::segment::ExecutionSegment;
use crate::domain::simulation::listener::SnapshotListener;
use crate::domain::simulation::snapshot::SimulationSnapshot;
use crate::domain::simulation::tick_index::TickIndex;
use crate::domain::statistics::RunStatistics;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Uninitialized,
    Ready,
}

/// One navigation request against the current run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationAction {
    StepForward,
    StepBackward,
    JumpTo(i64),
    JumpToStart,
    JumpToEnd,
}

/// Everything that belongs to one computed run. Replaced as a whole on re-initialization.
#[derive(Debug)]
struct SimulationRun {
    input: Vec<ProcessRecord>,
    scheduler_type: SchedulerType,
    config: SchedulerConfig,
    outcome: ScheduleOutcome,
    index: TickIndex,
    statistics: RunStatistics,
}

/// Owns one simulation run and a position inside its tick index.
///
/// Every successful transition hands the new snapshot to the registered listener
/// before returning. Rejected or no-op requests leave the position untouched and
/// notify nobody.
#[derive(Default)]
pub struct SimulationController {
    run: Option<SimulationRun>,
    position: usize,
    listener: Option<Box<dyn SnapshotListener>>,
}

impl fmt::Debug for SimulationController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimulationController")
            .field("run", &self.run)
            .field("position", &self.position)
            .field("has_listener", &self.listener.is_some())
            .finish()
    }
}

impl SimulationController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the single listener, replacing any previous one.
    pub fn set_listener(&mut self, listener: impl SnapshotListener + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn clear_listener(&mut self) {
        self.listener = None;
    }

    /// Schedules `processes` with the given algorithm, builds the tick index and moves to tick 0.
    ///
    /// Configuration and process validation happen before any state changes; on error the
    /// previous run, if any, stays in place. The caller's records are only read.
    pub fn initialize(&mut self, processes: &[ProcessRecord], scheduler_type: SchedulerType, config: SchedulerConfig) -> Result<SimulationSnapshot> {
        let scheduler = scheduler_type.get_instance(&config).inspect_err(|e| log::warn!("Rejected {} configuration: {}", scheduler_type, e))?;
        let outcome = scheduler.schedule(processes).inspect_err(|e| log::warn!("Rejected process set: {}", e))?;

        let index = TickIndex::build(&outcome.segments, &outcome.processes);
        let statistics = RunStatistics::from_outcome(&outcome);

        log::info!(
            "Initialized {} run: {} processes, {} segments, makespan {}.",
            scheduler.name(),
            processes.len(),
            outcome.segments.len(),
            outcome.makespan()
        );

        self.run = Some(SimulationRun { input: processes.to_vec(), scheduler_type, config, outcome, index, statistics });
        Ok(self.move_to(0))
    }

    /// Re-runs the current configuration from scratch.
    ///
    /// Returns `None` without notifying when no run has been initialized yet.
    pub fn reset(&mut self) -> Result<Option<SimulationSnapshot>> {
        let Some(run) = self.run.as_ref() else {
            log::debug!("Reset requested before initialization, ignoring.");
            return Ok(None);
        };

        let (input, scheduler_type, config) = (run.input.clone(), run.scheduler_type, run.config);
        self.initialize(&input, scheduler_type, config).map(Some)
    }

    /// Applies one navigation action.
    ///
    /// Returns the new snapshot, `None` for a step that would leave the timeline, or
    /// `OutOfRangeNavigation` for a jump outside `[0, tick_count - 1]`.
    pub fn navigate(&mut self, action: NavigationAction) -> Result<Option<SimulationSnapshot>> {
        match action {
            NavigationAction::StepForward => Ok(self.step_forward_snapshot()),
            NavigationAction::StepBackward => Ok(self.step_backward_snapshot()),
            NavigationAction::JumpTo(tick) => self.jump_to_tick(tick).map(Some),
            NavigationAction::JumpToStart => self.jump_to_start().map(Some),
            NavigationAction::JumpToEnd => self.jump_to_end().map(Some),
        }
    }

    pub fn step_forward(&mut self) -> bool {
        self.step_forward_snapshot().is_some()
    }

    pub fn step_backward(&mut self) -> bool {
        self.step_backward_snapshot().is_some()
    }

    pub fn jump_to_tick(&mut self, tick: i64) -> Result<SimulationSnapshot> {
        let tick_count = self.tick_count();

        match usize::try_from(tick) {
            Ok(position) if position < tick_count => Ok(self.move_to(position)),
            _ => {
                log::warn!("Rejected jump to tick {} (tick count {}).", tick, tick_count);
                Err(Error::OutOfRangeNavigation { tick, tick_count })
            }
        }
    }

    pub fn jump_to_start(&mut self) -> Result<SimulationSnapshot> {
        self.jump_to_tick(0)
    }

    pub fn jump_to_end(&mut self) -> Result<SimulationSnapshot> {
        let last = self.tick_count() as i64 - 1;
        self.jump_to_tick(last)
    }

    fn step_forward_snapshot(&mut self) -> Option<SimulationSnapshot> {
        if self.run.is_none() || self.position + 1 >= self.tick_count() {
            return None;
        }
        Some(self.move_to(self.position + 1))
    }

    fn step_backward_snapshot(&mut self) -> Option<SimulationSnapshot> {
        if self.run.is_none() || self.position == 0 {
            return None;
        }
        Some(self.move_to(self.position - 1))
    }

    /// Moves to a position already known to be in range and notifies the listener.
    fn move_to(&mut self, position: usize) -> SimulationSnapshot {
        self.position = position;
        let snapshot = self.build_snapshot();

        log::debug!("Moved to tick {} (running: {:?}).", snapshot.tick, snapshot.running_process_id);

        if let Some(listener) = self.listener.as_mut() {
            listener.on_snapshot(&snapshot);
        }
        snapshot
    }

    fn build_snapshot(&self) -> SimulationSnapshot {
        let run = self.run.as_ref();
        debug_assert!(run.is_some(), "snapshot requested without a run");

        run.and_then(|run| run.index.snapshot(self.position as i64)).unwrap_or_else(|| SimulationSnapshot {
            tick: self.position as i64,
            running_process_id: None,
            ready_queue: Vec::new(),
            progress: Vec::new(),
            metrics: Vec::new(),
            makespan: 0,
        })
    }

    pub fn state(&self) -> ControllerState {
        match self.run {
            Some(_) => ControllerState::Ready,
            None => ControllerState::Uninitialized,
        }
    }

    /// Number of navigable ticks, `makespan + 1` once initialized and 0 before.
    pub fn tick_count(&self) -> usize {
        self.run.as_ref().map_or(0, |run| run.index.tick_count())
    }

    pub fn current_tick(&self) -> Option<i64> {
        self.run.as_ref().map(|_| self.position as i64)
    }

    /// Snapshot at the current position, without notifying anyone.
    pub fn current_snapshot(&self) -> Option<SimulationSnapshot> {
        self.run.as_ref().and_then(|run| run.index.snapshot(self.position as i64))
    }

    /// `false` until a run exists.
    pub fn is_at_start(&self) -> bool {
        self.run.is_some() && self.position == 0
    }

    /// `false` until a run exists.
    pub fn is_at_end(&self) -> bool {
        self.run.is_some() && self.position + 1 >= self.tick_count()
    }

    pub fn scheduler_type(&self) -> Option<SchedulerType> {
        self.run.as_ref().map(|run| run.scheduler_type)
    }

    pub fn config(&self) -> Option<SchedulerConfig> {
        self.run.as_ref().map(|run| run.config)
    }

    pub fn outcome(&self) -> Option<&ScheduleOutcome> {
        self.run.as_ref().map(|run| &run.outcome)
    }

    pub fn segments(&self) -> &[ExecutionSegment] {
        self.run.as_ref().map(|run| run.outcome.segments.as_slice()).unwrap_or_default()
    }

    pub fn statistics(&self) -> Option<&RunStatistics> {
        self.run.as_ref().map(|run| &run.statistics)
    }

    /// The process set the current run was computed from, as the caller supplied it.
    pub fn input_processes(&self) -> &[ProcessRecord] {
        self.run.as_ref().map(|run| run.input.as_slice()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uninitialized_controller_rejects_navigation() {
        let mut controller = SimulationController::new();

        assert_eq!(controller.state(), ControllerState::Uninitialized);
        assert!(!controller.step_forward());
        assert!(!controller.step_backward());
        assert!(matches!(controller.jump_to_tick(0), Err(Error::OutOfRangeNavigation { tick: 0, tick_count: 0 })));
        assert!(matches!(controller.jump_to_end(), Err(Error::OutOfRangeNavigation { .. })));
        assert_eq!(controller.reset().unwrap(), None);
        assert_eq!(controller.current_tick(), None);
        assert!(!controller.is_at_start());
        assert!(!controller.is_at_end());
        assert!(controller.input_processes().is_empty());
    }

    #[test]
    fn failed_initialize_keeps_previous_run() {
        let mut controller = SimulationController::new();
        let processes = vec![ProcessRecord::with_default_priority("P1", 0, 3)];
        controller.initialize(&processes, SchedulerType::Fcfs, SchedulerConfig::default()).unwrap();
        controller.jump_to_tick(2).unwrap();

        let result = controller.initialize(&processes, SchedulerType::RoundRobin, SchedulerConfig::with_quantum(0));

        assert!(matches!(result, Err(Error::InvalidConfiguration(_))));
        assert_eq!(controller.scheduler_type(), Some(SchedulerType::Fcfs));
        assert_eq!(controller.current_tick(), Some(2));
    }

    #[test]
    fn navigate_reports_each_transition() {
        let mut controller = SimulationController::new();
        let processes = vec![ProcessRecord::with_default_priority("P1", 0, 2)];
        controller.initialize(&processes, SchedulerType::Sjf, SchedulerConfig::default()).unwrap();

        assert_eq!(controller.navigate(NavigationAction::StepBackward).unwrap(), None);
        assert_eq!(controller.navigate(NavigationAction::StepForward).unwrap().map(|s| s.tick), Some(1));
        assert_eq!(controller.navigate(NavigationAction::JumpToEnd).unwrap().map(|s| s.tick), Some(2));
        assert_eq!(controller.navigate(NavigationAction::StepForward).unwrap(), None);
        assert!(controller.navigate(NavigationAction::JumpTo(3)).is_err());
        assert_eq!(controller.navigate(NavigationAction::JumpToStart).unwrap().map(|s| s.tick), Some(0));
    }
}
