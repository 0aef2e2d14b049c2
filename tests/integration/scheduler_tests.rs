//! Integration tests for the CycleScheduler: mailbox draining, mode
//! gating and cadence, driven by a fake clock.

use crate::mock_hw::{FakeClock, LogSink, MockHardware, MockTelemetry};

use embassy_time::{Duration, Instant};
use greenhouse::app::commands::SwitchCommand;
use greenhouse::app::events::AppEvent;
use greenhouse::app::mailbox::CommandMailbox;
use greenhouse::app::ports::ClockPort;
use greenhouse::app::service::{ControllerService, CycleOutcome};
use greenhouse::config::SystemConfig;
use greenhouse::control::supervisor::Transition;
use greenhouse::scheduler::{CycleScheduler, Mode};

struct Rig {
    app: ControllerService,
    hw: MockHardware,
    tel: MockTelemetry,
    sink: LogSink,
    clock: FakeClock,
}

impl Rig {
    fn new() -> Self {
        let mut rig = Self {
            app: ControllerService::new(SystemConfig::default()),
            hw: MockHardware::new(),
            tel: MockTelemetry::new(),
            sink: LogSink::new(),
            clock: FakeClock::new(),
        };
        rig.app.start(&mut rig.hw, &mut rig.tel, &mut rig.sink);
        rig
    }

    /// One loop iteration exactly as `CycleScheduler::run` performs it.
    fn step(&mut self, sched: &mut CycleScheduler<'_>) -> greenhouse::scheduler::CycleReport {
        let report = sched.run_cycle(
            self.clock.now(),
            &mut self.app,
            &mut self.hw,
            &mut self.tel,
            &mut self.sink,
        );
        self.clock.sleep_until(report.next_deadline);
        report
    }
}

#[test]
fn steady_cadence_of_one_second() {
    let mb = CommandMailbox::new();
    let mut sched = CycleScheduler::new(&mb, 1000);
    let mut rig = Rig::new();

    for _ in 0..4 {
        rig.step(&mut sched);
        rig.clock.advance(Duration::from_millis(7));
    }

    assert_eq!(
        rig.clock.sleeps,
        vec![
            Instant::from_millis(1000),
            Instant::from_millis(2000),
            Instant::from_millis(3000),
            Instant::from_millis(4000),
        ]
    );
    assert_eq!(rig.app.tick_count(), 4);
}

#[test]
fn off_command_pauses_sensing_until_on() {
    let mb = CommandMailbox::new();
    let mut sched = CycleScheduler::new(&mb, 1000);
    let mut rig = Rig::new();

    rig.step(&mut sched);
    assert_eq!(rig.hw.sensor_reads, 1);

    mb.post(SwitchCommand::Off);
    let r = rig.step(&mut sched);
    assert_eq!(r.command, Some(Transition::Disabled));
    assert_eq!(r.mode, Mode::Disabled);

    for _ in 0..3 {
        let r = rig.step(&mut sched);
        assert_eq!(r.outcome, CycleOutcome::Skipped);
    }
    assert_eq!(rig.hw.sensor_reads, 1, "no sensor reads while disabled");

    mb.post(SwitchCommand::On);
    let r = rig.step(&mut sched);
    assert_eq!(r.command, Some(Transition::Enabled));
    assert_eq!(r.mode, Mode::Enabled);
    assert!(matches!(r.outcome, CycleOutcome::Completed { .. }));
    assert_eq!(rig.hw.sensor_reads, 2);
    assert_eq!(sched.cycles(), 6);
}

#[test]
fn mailbox_keeps_only_latest_command() {
    let mb = CommandMailbox::new();
    let mut sched = CycleScheduler::new(&mb, 1000);
    let mut rig = Rig::new();
    rig.sink.events.clear();
    rig.hw.calls.clear();

    // Both arrive between two cycles; only the last is handled.
    mb.post(SwitchCommand::Off);
    mb.post(SwitchCommand::On);
    let r = rig.step(&mut sched);

    assert_eq!(r.command, Some(Transition::Unchanged));
    assert!(!rig.sink.events.contains(&AppEvent::SystemDisabled));
    assert!(rig.hw.servo_calls().iter().all(|deg| *deg == 0));
    assert!(rig.app.is_enabled());
    assert!(!mb.is_pending());
}

#[test]
fn command_from_another_thread_is_seen_next_cycle() {
    static MAILBOX: CommandMailbox = CommandMailbox::new();
    let mut sched = CycleScheduler::new(&MAILBOX, 1000);
    let mut rig = Rig::new();

    std::thread::spawn(|| MAILBOX.post(SwitchCommand::Off))
        .join()
        .unwrap();

    let r = rig.step(&mut sched);
    assert_eq!(r.command, Some(Transition::Disabled));
    assert!(!rig.app.is_enabled());
}

#[test]
fn slow_cycle_reanchors_cadence() {
    let mb = CommandMailbox::new();
    let mut sched = CycleScheduler::new(&mb, 1000);
    let mut rig = Rig::new();

    rig.step(&mut sched);
    // A cycle that overran by 2.5 intervals.
    rig.clock.advance(Duration::from_millis(3500));
    let r = rig.step(&mut sched);
    assert_eq!(r.next_deadline, Instant::from_millis(5500));
    assert_eq!(sched.interval(), Duration::from_millis(1000));
}
