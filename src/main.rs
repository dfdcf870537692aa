use anyhow::{Context, Result};
use clap::Parser;
use colored::{Color, Colorize};
use log::LevelFilter;
use std::path::PathBuf;

use cpu_sched_replay::domain::process::ProcessId;
use cpu_sched_replay::domain::scheduler::{SchedulerConfig, SchedulerType};
use cpu_sched_replay::domain::simulation::{SimulationController, SimulationSnapshot};
use cpu_sched_replay::domain::statistics::write_metrics_csv_file;
use cpu_sched_replay::loader::scenario::{export_scenario, import_scenario};
use cpu_sched_replay::logger;

/// Computes a CPU scheduling timeline for a scenario and replays it tick by tick.
#[derive(Debug, Parser)]
#[command(name = "cpu-sched-replay", version, about)]
struct Cli {
    /// Scenario file: a JSON list of {id, arrivalTime, burstTime, priority}.
    #[arg(short, long)]
    scenario: PathBuf,

    /// FCFS, SJF, Priority or RoundRobin (alias: rr).
    #[arg(short, long, default_value = "fcfs")]
    algorithm: SchedulerType,

    /// Time quantum, only used by RoundRobin.
    #[arg(short, long, default_value_t = 2)]
    quantum: i64,

    /// Print the snapshot at this tick.
    #[arg(short, long)]
    tick: Option<i64>,

    /// Step through the whole run and print every snapshot.
    #[arg(long)]
    replay: bool,

    /// Write per-process metrics as CSV.
    #[arg(long)]
    metrics_csv: Option<PathBuf>,

    /// Write the scenario back out in canonical form.
    #[arg(long)]
    export: Option<PathBuf>,

    /// -v for debug, -vv for trace. Overrides RUST_LOG.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

const PALETTE: [Color; 6] = [Color::Red, Color::Green, Color::Yellow, Color::Blue, Color::Magenta, Color::Cyan];

// Stable per-process color, derived from the id only.
fn color_for(id: &ProcessId) -> Color {
    let hash = id.as_str().bytes().fold(0_usize, |acc, byte| acc.wrapping_mul(31).wrapping_add(byte as usize));
    PALETTE[hash % PALETTE.len()]
}

fn print_timeline(controller: &SimulationController) {
    println!("{}", "Timeline".bold());
    for segment in controller.segments() {
        let line = segment.to_string();
        match &segment.process_id {
            Some(id) => println!("  {}", line.color(color_for(id))),
            None => println!("  {}", line.dimmed()),
        }
    }
}

fn print_metrics(controller: &SimulationController) {
    let Some(outcome) = controller.outcome() else {
        return;
    };

    println!("{}", "Metrics".bold());
    println!("  {:<8} {:>7} {:>5} {:>8} {:>5} {:>10} {:>7} {:>10} {:>8}", "id", "arrival", "burst", "priority", "start", "completion", "waiting", "turnaround", "response");
    for metrics in outcome.metrics() {
        let show = |value: Option<i64>| value.map_or_else(|| "-".to_string(), |value| value.to_string());
        println!(
            "  {:<8} {:>7} {:>5} {:>8} {:>5} {:>10} {:>7} {:>10} {:>8}",
            metrics.id.to_string().color(color_for(&metrics.id)),
            metrics.arrival_time,
            metrics.burst_time,
            metrics.priority,
            show(metrics.start_time),
            show(metrics.completion_time),
            show(metrics.waiting_time),
            show(metrics.turnaround_time),
            show(metrics.response_time)
        );
    }

    if let Some(stats) = controller.statistics() {
        println!(
            "  avg waiting {:.2} | avg turnaround {:.2} | avg response {:.2} | throughput {:.3}/tick | utilization {:.1}%",
            stats.average_waiting_time, stats.average_turnaround_time, stats.average_response_time, stats.throughput, stats.utilization
        );
    }
}

fn print_snapshot(snapshot: &SimulationSnapshot) {
    let running = match &snapshot.running_process_id {
        Some(id) => id.to_string().color(color_for(id)).to_string(),
        None => "idle".dimmed().to_string(),
    };
    let ready: Vec<String> = snapshot.ready_queue.iter().map(ProcessId::to_string).collect();

    println!("t={:<4} running: {:<8} ready: [{}]", snapshot.tick, running, ready.join(", "));
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => None,
        1 => Some(LevelFilter::Debug),
        _ => Some(LevelFilter::Trace),
    };
    logger::init(level);

    let processes = import_scenario(&cli.scenario).with_context(|| format!("failed to load scenario '{}'", cli.scenario.display()))?;

    if let Some(path) = &cli.export {
        export_scenario(path, &processes).with_context(|| format!("failed to export scenario to '{}'", path.display()))?;
    }

    let mut controller = SimulationController::new();
    controller
        .initialize(&processes, cli.algorithm, SchedulerConfig::with_quantum(cli.quantum))
        .with_context(|| format!("failed to schedule with {}", cli.algorithm))?;

    if cli.algorithm.is_preemptive() {
        println!("{} (quantum {}, {} processes)", cli.algorithm.name().bold(), cli.quantum, processes.len());
    } else {
        println!("{} ({} processes)", cli.algorithm.name().bold(), processes.len());
    }
    print_timeline(&controller);
    print_metrics(&controller);

    if let Some(tick) = cli.tick {
        let snapshot = controller.jump_to_tick(tick)?;
        print_snapshot(&snapshot);
    }

    if cli.replay {
        controller.set_listener(print_snapshot);
        controller.jump_to_start()?;
        while controller.step_forward() {}
        controller.clear_listener();
    }

    if let Some(path) = &cli.metrics_csv {
        if let Some(outcome) = controller.outcome() {
            write_metrics_csv_file(path, &outcome.metrics())?;
        }
    }

    Ok(())
}
