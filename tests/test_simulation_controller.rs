use std::{cell::RefCell, rc::Rc};

use cpu_sched_replay::{
    ProcessId, ProcessRecord,
    domain::{
        scheduler::{SchedulerConfig, SchedulerType},
        simulation::{ControllerState, NavigationAction, SimulationController, SimulationSnapshot, SnapshotRecorder},
    },
    error::Error,
};

fn fcfs_processes() -> Vec<ProcessRecord> {
    vec![
        ProcessRecord::with_default_priority("P1", 0, 5),
        ProcessRecord::with_default_priority("P2", 1, 3),
        ProcessRecord::with_default_priority("P3", 2, 8),
    ]
}

fn round_robin_controller() -> SimulationController {
    let processes = vec![
        ProcessRecord::with_default_priority("P1", 0, 4),
        ProcessRecord::with_default_priority("P2", 0, 3),
        ProcessRecord::with_default_priority("P3", 2, 2),
    ];
    let mut controller = SimulationController::new();
    controller.initialize(&processes, SchedulerType::RoundRobin, SchedulerConfig::with_quantum(2)).unwrap();
    controller
}

#[test]
fn initialize_moves_to_tick_zero() {
    let mut controller = SimulationController::new();
    let snapshot = controller.initialize(&fcfs_processes(), SchedulerType::Fcfs, SchedulerConfig::default()).unwrap();

    assert_eq!(controller.state(), ControllerState::Ready);
    assert_eq!(controller.current_tick(), Some(0));
    assert_eq!(controller.tick_count(), 17);
    assert_eq!(snapshot.tick, 0);
    assert_eq!(snapshot.running_process_id, Some(ProcessId::new("P1")));
    assert_eq!(snapshot.makespan, 16);
    assert_eq!(snapshot.metrics.len(), 3);
    assert!(controller.is_at_start());
    assert!(!controller.is_at_end());
    assert_eq!(controller.input_processes(), fcfs_processes().as_slice());
}

#[test]
fn backward_replay_mirrors_forward_replay() {
    let mut controller = round_robin_controller();

    let mut forward = vec![controller.current_snapshot().unwrap()];
    while controller.step_forward() {
        forward.push(controller.current_snapshot().unwrap());
    }
    assert_eq!(forward.len(), controller.tick_count());

    controller.jump_to_start().unwrap();
    controller.jump_to_end().unwrap();

    let mut backward = vec![controller.current_snapshot().unwrap()];
    while controller.step_backward() {
        backward.push(controller.current_snapshot().unwrap());
    }

    backward.reverse();
    assert_eq!(forward, backward);
}

#[test]
fn listener_sees_every_successful_transition() {
    let mut controller = SimulationController::new();
    let recorder = SnapshotRecorder::new();
    controller.set_listener(recorder.clone());

    controller.initialize(&fcfs_processes(), SchedulerType::Fcfs, SchedulerConfig::default()).unwrap();
    assert!(controller.step_forward());
    assert!(controller.step_forward());
    assert!(controller.step_backward());
    controller.jump_to_tick(10).unwrap();
    controller.jump_to_end().unwrap();

    // Rejected requests notify nobody.
    assert!(!controller.step_forward());
    assert!(controller.jump_to_tick(17).is_err());
    assert!(controller.jump_to_tick(-1).is_err());

    assert_eq!(recorder.ticks(), vec![0, 1, 2, 1, 10, 16]);

    let delivered = recorder.take();
    assert_eq!(delivered.len(), 6);
    assert_eq!(delivered[4], controller.navigate(NavigationAction::JumpTo(10)).unwrap().unwrap());
    assert_eq!(recorder.ticks(), vec![10]);
}

#[test]
fn replacing_the_listener_drops_the_old_one() {
    let mut controller = round_robin_controller();

    let first = SnapshotRecorder::new();
    let second = SnapshotRecorder::new();
    controller.set_listener(first.clone());
    controller.step_forward();
    controller.set_listener(second.clone());
    controller.step_forward();
    controller.step_forward();

    assert_eq!(first.ticks(), vec![1]);
    assert_eq!(second.ticks(), vec![2, 3]);

    controller.clear_listener();
    controller.step_forward();
    assert_eq!(second.len(), 2);
}

#[test]
fn closure_listener() {
    let mut controller = round_robin_controller();
    let running: Rc<RefCell<Vec<Option<ProcessId>>>> = Rc::new(RefCell::new(Vec::new()));

    let sink = Rc::clone(&running);
    controller.set_listener(move |snapshot: &SimulationSnapshot| sink.borrow_mut().push(snapshot.running_process_id.clone()));

    controller.jump_to_start().unwrap();
    while controller.step_forward() {}

    let names: Vec<String> = running.borrow().iter().map(|id| id.as_ref().map_or("-".to_string(), |id| id.to_string())).collect();
    // P1 P1 | P2 P2 | P3 P3 | P1 P1 | P2 | end
    assert_eq!(names, vec!["P1", "P1", "P2", "P2", "P3", "P3", "P1", "P1", "P2", "-"]);
}

#[test]
fn out_of_range_jump_keeps_position() {
    let mut controller = round_robin_controller();
    controller.jump_to_tick(4).unwrap();

    let result = controller.jump_to_tick(100);
    match result {
        Err(Error::OutOfRangeNavigation { tick, tick_count }) => {
            assert_eq!(tick, 100);
            assert_eq!(tick_count, controller.tick_count());
        }
        other => panic!("expected OutOfRangeNavigation, got {:?}", other),
    }
    assert_eq!(controller.current_tick(), Some(4));

    assert!(matches!(controller.navigate(NavigationAction::JumpTo(-5)), Err(Error::OutOfRangeNavigation { .. })));
    assert_eq!(controller.current_tick(), Some(4));
}

#[test]
fn reset_reproduces_identical_run() {
    let mut controller = round_robin_controller();
    let segments_before = controller.segments().to_vec();
    let mut snapshots_before = Vec::new();
    while controller.step_forward() {
        snapshots_before.push(controller.current_snapshot().unwrap());
    }

    let snapshot = controller.reset().unwrap().unwrap();
    assert_eq!(snapshot.tick, 0);
    assert_eq!(controller.current_tick(), Some(0));
    assert_eq!(controller.segments(), segments_before.as_slice());

    let mut snapshots_after = Vec::new();
    while controller.step_forward() {
        snapshots_after.push(controller.current_snapshot().unwrap());
    }
    assert_eq!(snapshots_before, snapshots_after);

    controller.reset().unwrap();
    controller.reset().unwrap();
    assert_eq!(controller.segments(), segments_before.as_slice());
}

#[test]
fn idle_gap_at_start() {
    let mut controller = SimulationController::new();
    let processes = vec![ProcessRecord::with_default_priority("P1", 3, 2)];

    let snapshot = controller.initialize(&processes, SchedulerType::Priority, SchedulerConfig::default()).unwrap();

    assert_eq!(snapshot.running_process_id, None);
    let first = &controller.segments()[0];
    assert!(first.is_idle());
    assert_eq!((first.start_tick, first.end_tick), (0, 3));
}

#[test]
fn empty_run_has_single_tick() {
    let mut controller = SimulationController::new();
    let snapshot = controller.initialize(&[], SchedulerType::Sjf, SchedulerConfig::default()).unwrap();

    assert_eq!(snapshot.makespan, 0);
    assert_eq!(controller.tick_count(), 1);
    assert!(controller.is_at_start() && controller.is_at_end());
    assert!(!controller.step_forward());
    assert!(controller.jump_to_end().is_ok());
    assert_eq!(controller.statistics().unwrap().throughput, 0.0);
}

#[test]
fn invalid_quantum_fails_before_any_run() {
    let mut controller = SimulationController::new();
    let recorder = SnapshotRecorder::new();
    controller.set_listener(recorder.clone());

    let result = controller.initialize(&fcfs_processes(), SchedulerType::RoundRobin, SchedulerConfig::with_quantum(0));

    assert!(matches!(result, Err(Error::InvalidConfiguration(_))));
    assert_eq!(controller.state(), ControllerState::Uninitialized);
    assert!(recorder.is_empty());
}

#[test]
fn oversized_scenario_is_rejected_without_building_an_index() {
    let mut controller = SimulationController::new();
    let recorder = SnapshotRecorder::new();
    controller.set_listener(recorder.clone());

    let far_arrival = vec![ProcessRecord::with_default_priority("P1", 1 << 40, 1)];
    let result = controller.initialize(&far_arrival, SchedulerType::Fcfs, SchedulerConfig::default());

    assert!(matches!(result, Err(Error::InvalidConfiguration(_))));
    assert_eq!(controller.state(), ControllerState::Uninitialized);
    assert_eq!(controller.tick_count(), 0);
    assert!(recorder.is_empty());
}

#[test]
fn statistics_follow_the_run() {
    let mut controller = SimulationController::new();
    controller.initialize(&fcfs_processes(), SchedulerType::Fcfs, SchedulerConfig::default()).unwrap();

    let stats = controller.statistics().unwrap();
    assert_eq!(stats.process_count, 3);
    assert_eq!(stats.makespan, 16);
    assert!((stats.utilization - 100.0).abs() < 1e-9);
}
