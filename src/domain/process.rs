use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::error::{Error, Result};

/// Upper bound on the length of a run in ticks.
///
/// Every process set is checked against it before scheduling, so timeline arithmetic
/// stays far from `i64` limits and the per-tick index stays a bounded allocation.
pub const MAX_TICKS: i64 = 100_000;

/// Identifier of a schedulable process.
///
/// Ids are compared lexicographically and serve as the final tie-break of every
/// selection key, so two processes must never share one.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProcessId(String);

impl ProcessId {
    pub fn new(id: impl Into<String>) -> Self {
        ProcessId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProcessId: {:?}", self.0)
    }
}

impl From<&str> for ProcessId {
    fn from(id: &str) -> Self {
        ProcessId::new(id)
    }
}

impl From<String> for ProcessId {
    fn from(id: String) -> Self {
        ProcessId(id)
    }
}

impl From<ProcessId> for String {
    fn from(id: ProcessId) -> Self {
        id.0
    }
}

/// One schedulable, purely CPU-bound unit of work.
///
/// `arrival_time`, `burst_time` and `priority` describe the process. The remaining
/// fields are working state that only a scheduler touches, and only on its own copy
/// (see [`ProcessRecord::working_copy`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRecord {
    pub id: ProcessId,
    pub arrival_time: i64,
    pub burst_time: i64,
    /// Lower value means higher priority. Only the priority scheduler reads it.
    pub priority: i64,

    remaining_time: i64,
    start_time: Option<i64>,
    completion_time: Option<i64>,
}

impl ProcessRecord {
    pub fn new(id: impl Into<ProcessId>, arrival_time: i64, burst_time: i64, priority: i64) -> Self {
        ProcessRecord {
            id: id.into(),
            arrival_time,
            burst_time,
            priority,
            remaining_time: burst_time,
            start_time: None,
            completion_time: None,
        }
    }

    /// Creates a process with the default priority of 0.
    pub fn with_default_priority(id: impl Into<ProcessId>, arrival_time: i64, burst_time: i64) -> Self {
        Self::new(id, arrival_time, burst_time, 0)
    }

    /// Returns an independent copy with all working fields reset, ready for a fresh run.
    pub fn working_copy(&self) -> Self {
        Self::new(self.id.clone(), self.arrival_time, self.burst_time, self.priority)
    }

    pub fn remaining_time(&self) -> i64 {
        self.remaining_time
    }

    pub fn start_time(&self) -> Option<i64> {
        self.start_time
    }

    pub fn completion_time(&self) -> Option<i64> {
        self.completion_time
    }

    pub fn is_completed(&self) -> bool {
        self.completion_time.is_some()
    }

    /// Records the first dispatch. Later dispatches leave the start time untouched.
    pub(crate) fn record_dispatch(&mut self, tick: i64) {
        if self.start_time.is_none() {
            self.start_time = Some(tick);
        }
    }

    /// Runs the process for `ticks` ticks ending at `end_tick` and marks it completed
    /// once no work is left.
    pub(crate) fn execute(&mut self, ticks: i64, end_tick: i64) {
        debug_assert!(ticks > 0 && ticks <= self.remaining_time, "process {} cannot run {} of {} remaining ticks", self.id, ticks, self.remaining_time);

        self.remaining_time -= ticks;
        if self.remaining_time == 0 {
            debug_assert!(self.completion_time.is_none(), "process {} completed twice", self.id);
            self.completion_time = Some(end_tick);
        }
    }

    /// `completion - arrival - burst`, once the process has completed.
    pub fn waiting_time(&self) -> Option<i64> {
        self.completion_time.map(|completion| completion - self.arrival_time - self.burst_time)
    }

    /// `completion - arrival`, once the process has completed.
    pub fn turnaround_time(&self) -> Option<i64> {
        self.completion_time.map(|completion| completion - self.arrival_time)
    }

    /// `start - arrival`, once the process has been dispatched.
    pub fn response_time(&self) -> Option<i64> {
        self.start_time.map(|start| start - self.arrival_time)
    }

    pub fn metrics(&self) -> ProcessMetrics {
        ProcessMetrics {
            id: self.id.clone(),
            arrival_time: self.arrival_time,
            burst_time: self.burst_time,
            priority: self.priority,
            start_time: self.start_time,
            completion_time: self.completion_time,
            waiting_time: self.waiting_time(),
            turnaround_time: self.turnaround_time(),
            response_time: self.response_time(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.id.as_str().is_empty() {
            return Err(Error::InvalidConfiguration("process id must not be empty".to_string()));
        }
        if self.arrival_time < 0 {
            return Err(Error::InvalidConfiguration(format!("process {} has negative arrival time {}", self.id, self.arrival_time)));
        }
        if self.burst_time <= 0 {
            return Err(Error::InvalidConfiguration(format!("process {} has non-positive burst time {}", self.id, self.burst_time)));
        }
        Ok(())
    }
}

/// Validates every process, rejects duplicate ids and rejects sets that could run past
/// [`MAX_TICKS`].
///
/// No schedule ends later than the latest arrival plus the sum of all bursts, so that
/// sum is the bound that gets checked.
pub fn validate_processes(processes: &[ProcessRecord]) -> Result<()> {
    let mut seen = HashSet::with_capacity(processes.len());
    let mut latest_arrival = 0_i64;
    let mut total_burst = 0_i64;

    for process in processes {
        process.validate()?;
        if !seen.insert(&process.id) {
            return Err(Error::InvalidConfiguration(format!("duplicate process id {}", process.id)));
        }

        latest_arrival = latest_arrival.max(process.arrival_time);
        total_burst = total_burst.checked_add(process.burst_time).ok_or_else(horizon_overflow)?;
    }

    let horizon = latest_arrival.checked_add(total_burst).ok_or_else(horizon_overflow)?;
    if horizon > MAX_TICKS {
        return Err(Error::InvalidConfiguration(format!("process set may run until tick {}, the limit is {}", horizon, MAX_TICKS)));
    }

    Ok(())
}

fn horizon_overflow() -> Error {
    Error::InvalidConfiguration(format!("process set exceeds the tick limit of {}", MAX_TICKS))
}

/// Read-only view of one process after a run: its inputs plus the derived timings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessMetrics {
    pub id: ProcessId,
    pub arrival_time: i64,
    pub burst_time: i64,
    pub priority: i64,
    pub start_time: Option<i64>,
    pub completion_time: Option<i64>,
    pub waiting_time: Option<i64>,
    pub turnaround_time: Option<i64>,
    pub response_time: Option<i64>,
}
