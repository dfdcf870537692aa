use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::process::ProcessMetrics;
use crate::domain::scheduler::ScheduleOutcome;
use crate::error::Result;

/// Aggregate figures of one completed run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunStatistics {
    pub process_count: usize,
    pub makespan: i64,
    /// Sum of all non-idle segment durations.
    pub busy_time: i64,
    pub average_waiting_time: f64,
    pub average_turnaround_time: f64,
    pub average_response_time: f64,
    /// Completed processes per tick.
    pub throughput: f64,
    /// Busy share of the makespan, in percent.
    pub utilization: f64,
}

fn average(values: impl Iterator<Item = i64>) -> f64 {
    let (sum, count) = values.fold((0_i64, 0_usize), |(sum, count), value| (sum + value, count + 1));
    if count == 0 { 0.0 } else { sum as f64 / count as f64 }
}

impl RunStatistics {
    pub fn from_outcome(outcome: &ScheduleOutcome) -> Self {
        let makespan = outcome.makespan();
        let busy_time: i64 = outcome.segments.iter().filter(|segment| !segment.is_idle()).map(|segment| segment.duration()).sum();
        let process_count = outcome.processes.len();

        let (throughput, utilization) = if makespan == 0 {
            (0.0, 0.0)
        } else {
            (process_count as f64 / makespan as f64, busy_time as f64 / makespan as f64 * 100.0)
        };

        RunStatistics {
            process_count,
            makespan,
            busy_time,
            average_waiting_time: average(outcome.processes.iter().filter_map(|process| process.waiting_time())),
            average_turnaround_time: average(outcome.processes.iter().filter_map(|process| process.turnaround_time())),
            average_response_time: average(outcome.processes.iter().filter_map(|process| process.response_time())),
            throughput,
            utilization,
        }
    }
}

/// Writes one `;`-separated row per process, with a header row first.
pub fn write_metrics_csv<W: Write>(writer: W, metrics: &[ProcessMetrics]) -> Result<()> {
    let mut csv_wtr = csv::WriterBuilder::new().delimiter(b';').from_writer(writer);

    for row in metrics {
        csv_wtr.serialize(row)?;
    }

    csv_wtr.flush()?;
    Ok(())
}

pub fn write_metrics_csv_file(file_path: impl AsRef<Path>, metrics: &[ProcessMetrics]) -> Result<()> {
    let file = File::create(file_path.as_ref())?;
    write_metrics_csv(file, metrics)?;
    log::info!("Wrote metrics for {} processes to '{}'.", metrics.len(), file_path.as_ref().display());
    Ok(())
}
