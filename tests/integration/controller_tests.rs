//! Integration tests for the ControllerService → controllers → ports
//! pipeline, one enabled cycle at a time.

use crate::mock_hw::{ActuatorCall, LIGHT_GPIO, LogSink, MockHardware, MockTelemetry};

use greenhouse::app::commands::SwitchCommand;
use greenhouse::app::events::AppEvent;
use greenhouse::app::ports::{Channel, TelemetryValue};
use greenhouse::app::service::{ControllerService, CycleOutcome};
use greenhouse::config::SystemConfig;
use greenhouse::control::supervisor::Transition;

fn make_app() -> (ControllerService, MockHardware, MockTelemetry, LogSink) {
    let mut app = ControllerService::new(SystemConfig::default());
    let mut hw = MockHardware::new();
    let mut tel = MockTelemetry::new();
    let mut sink = LogSink::new();
    app.start(&mut hw, &mut tel, &mut sink);
    hw.calls.clear();
    tel.published.clear();
    sink.events.clear();
    (app, hw, tel, sink)
}

fn reset(hw: &mut MockHardware, tel: &mut MockTelemetry, sink: &mut LogSink) {
    hw.calls.clear();
    tel.published.clear();
    sink.events.clear();
}

// ── Start-up ──────────────────────────────────────────────────

#[test]
fn start_publishes_dashboard_defaults() {
    let mut app = ControllerService::new(SystemConfig::default());
    let (mut hw, mut tel, mut sink) = (MockHardware::new(), MockTelemetry::new(), LogSink::new());
    app.start(&mut hw, &mut tel, &mut sink);

    assert_eq!(
        tel.published,
        vec![
            (Channel::MotionIndicator, TelemetryValue::Bool(false)),
            (Channel::WateringIndicator, TelemetryValue::Bool(false)),
            (Channel::ManualSwitch, TelemetryValue::Bool(true)),
        ]
    );
    assert!(hw.calls.is_empty(), "enabled start must not touch actuators");
    assert_eq!(sink.events, vec![AppEvent::Started { enabled: true }]);
}

#[test]
fn disabled_start_parks_outputs() {
    let config = SystemConfig {
        initially_enabled: false,
        ..SystemConfig::default()
    };
    let mut app = ControllerService::new(config);
    let (mut hw, mut tel, mut sink) = (MockHardware::new(), MockTelemetry::new(), LogSink::new());
    app.start(&mut hw, &mut tel, &mut sink);

    assert!(!app.is_enabled());
    assert_eq!(tel.last(Channel::ManualSwitch), Some(TelemetryValue::Bool(false)));
    assert_eq!(
        hw.calls,
        vec![
            ActuatorCall::Servo(0),
            ActuatorCall::Digital {
                pin: LIGHT_GPIO,
                high: false
            },
        ]
    );
}

// ── Watering thresholds ───────────────────────────────────────

#[test]
fn threshold_boundary_is_inactive() {
    let (mut app, mut hw, mut tel, mut sink) = make_app();
    hw.set_climate(85.0, 30.0);
    app.tick(&mut hw, &mut tel, &mut sink);

    assert_eq!(hw.servo_calls(), vec![0]);
    assert_eq!(tel.last(Channel::WateringIndicator), Some(TelemetryValue::Bool(false)));
    assert!(!app.state().watering.is_watering);
}

#[test]
fn just_below_humidity_threshold_waters() {
    let (mut app, mut hw, mut tel, mut sink) = make_app();
    hw.set_climate(84.99, 30.0);
    app.tick(&mut hw, &mut tel, &mut sink);

    assert_eq!(hw.servo_calls(), vec![180]);
    assert_eq!(tel.last(Channel::WateringIndicator), Some(TelemetryValue::Bool(true)));
    assert!(app.state().watering.is_watering);
}

#[test]
fn just_above_temperature_threshold_waters() {
    let (mut app, mut hw, mut tel, mut sink) = make_app();
    hw.set_climate(85.0, 30.01);
    app.tick(&mut hw, &mut tel, &mut sink);

    assert_eq!(hw.servo_calls(), vec![180]);
    assert_eq!(tel.last(Channel::WateringIndicator), Some(TelemetryValue::Bool(true)));
}

#[test]
fn watering_is_level_triggered() {
    let (mut app, mut hw, mut tel, mut sink) = make_app();
    hw.set_climate(50.0, 25.0);
    for _ in 0..3 {
        app.tick(&mut hw, &mut tel, &mut sink);
    }
    assert_eq!(hw.servo_calls(), vec![180, 180, 180]);
    assert_eq!(tel.on(Channel::WateringIndicator).len(), 3);
}

// ── Supervisor ────────────────────────────────────────────────

#[test]
fn disable_forces_reset() {
    let (mut app, mut hw, mut tel, mut sink) = make_app();
    hw.set_climate(50.0, 25.0);
    hw.motion = true;
    app.tick(&mut hw, &mut tel, &mut sink);
    assert!(app.state().watering.is_watering);
    assert!(app.state().light.light_on);

    reset(&mut hw, &mut tel, &mut sink);
    let t = app.handle_command(SwitchCommand::Off, &mut hw, &mut tel, &mut sink);

    assert_eq!(t, Transition::Disabled);
    assert!(!app.is_enabled());
    assert_eq!(hw.servo_calls(), vec![0]);
    assert_eq!(hw.light_calls(), vec![false]);
    assert_eq!(tel.last(Channel::WateringIndicator), Some(TelemetryValue::Bool(false)));
    assert_eq!(tel.last(Channel::MotionIndicator), Some(TelemetryValue::Bool(false)));
    assert!(!app.state().watering.is_watering);
    assert!(!app.state().light.light_on);
    assert_eq!(sink.events, vec![AppEvent::SystemDisabled]);
}

#[test]
fn redundant_command_is_silent() {
    let (mut app, mut hw, mut tel, mut sink) = make_app();
    let t = app.handle_command(SwitchCommand::On, &mut hw, &mut tel, &mut sink);

    assert_eq!(t, Transition::Unchanged);
    assert!(hw.calls.is_empty());
    assert!(tel.published.is_empty());
    assert!(sink.events.is_empty());

    app.handle_command(SwitchCommand::Off, &mut hw, &mut tel, &mut sink);
    reset(&mut hw, &mut tel, &mut sink);
    let t = app.handle_command(SwitchCommand::Off, &mut hw, &mut tel, &mut sink);
    assert_eq!(t, Transition::Unchanged);
    assert!(hw.calls.is_empty());
    assert!(sink.events.is_empty());
}

#[test]
fn disabled_tick_touches_nothing() {
    let (mut app, mut hw, mut tel, mut sink) = make_app();
    app.handle_command(SwitchCommand::Off, &mut hw, &mut tel, &mut sink);
    reset(&mut hw, &mut tel, &mut sink);

    hw.set_climate(10.0, 45.0);
    hw.motion = true;
    assert_eq!(app.tick(&mut hw, &mut tel, &mut sink), CycleOutcome::Skipped);
    assert_eq!(hw.sensor_reads, 0);
    assert!(hw.calls.is_empty());
    assert!(tel.published.is_empty());
}

#[test]
fn re_enable_starts_from_light_off_baseline() {
    let (mut app, mut hw, mut tel, mut sink) = make_app();
    hw.motion = true;
    app.tick(&mut hw, &mut tel, &mut sink);

    app.handle_command(SwitchCommand::Off, &mut hw, &mut tel, &mut sink);
    app.handle_command(SwitchCommand::On, &mut hw, &mut tel, &mut sink);
    assert!(sink.events.contains(&AppEvent::SystemEnabled));

    reset(&mut hw, &mut tel, &mut sink);
    app.tick(&mut hw, &mut tel, &mut sink);
    assert_eq!(hw.light_calls(), vec![true], "motion after re-enable is a rising edge");
    assert_eq!(tel.last(Channel::MotionIndicator), Some(TelemetryValue::Bool(true)));
}

// ── Motion light ──────────────────────────────────────────────

#[test]
fn motion_edges_write_only_on_transitions() {
    let (mut app, mut hw, mut tel, mut sink) = make_app();
    let sequence = [true, true, false, false, true];
    let mut written = Vec::new();

    for (i, motion) in sequence.into_iter().enumerate() {
        hw.calls.clear();
        hw.motion = motion;
        app.tick(&mut hw, &mut tel, &mut sink);
        if let Some(level) = hw.light_calls().first() {
            written.push((i, *level));
        }
    }

    assert_eq!(written, vec![(0, true), (2, false), (4, true)]);
    assert_eq!(
        tel.on(Channel::MotionIndicator),
        vec![
            TelemetryValue::Bool(true),
            TelemetryValue::Bool(false),
            TelemetryValue::Bool(true)
        ]
    );
}

// ── Sensor faults ─────────────────────────────────────────────

#[test]
fn sensor_fault_isolates_watering_but_not_motion() {
    let (mut app, mut hw, mut tel, mut sink) = make_app();
    hw.set_climate(50.0, 25.0);
    app.tick(&mut hw, &mut tel, &mut sink);
    assert!(app.state().watering.is_watering);

    reset(&mut hw, &mut tel, &mut sink);
    hw.set_climate(f32::NAN, 25.0);
    hw.motion = true;
    let outcome = app.tick(&mut hw, &mut tel, &mut sink);

    assert!(matches!(
        outcome,
        CycleOutcome::Completed {
            watering: None,
            ..
        }
    ));
    assert!(hw.servo_calls().is_empty(), "stale watering output retained");
    assert!(tel.on(Channel::WateringIndicator).is_empty());
    assert!(app.state().watering.is_watering);
    assert_eq!(hw.light_calls(), vec![true]);
    assert!(tel.on(Channel::Humidity).is_empty());
    assert!(tel.on(Channel::Temperature).is_empty());
    assert!(matches!(sink.events[0], AppEvent::SensorFault { .. }));
}

#[test]
fn implausible_reading_is_a_fault() {
    let (mut app, mut hw, mut tel, mut sink) = make_app();
    hw.set_climate(120.0, 25.0);
    app.tick(&mut hw, &mut tel, &mut sink);

    assert!(hw.servo_calls().is_empty());
    assert_eq!(app.state().last_sample.map(|s| s.valid), Some(false));
}

// ── Telemetry ─────────────────────────────────────────────────

#[test]
fn readings_are_published_after_controllers() {
    let (mut app, mut hw, mut tel, mut sink) = make_app();
    hw.set_climate(70.0, 22.5);
    app.tick(&mut hw, &mut tel, &mut sink);

    let channels: Vec<Channel> = tel.published.iter().map(|(c, _)| *c).collect();
    assert_eq!(
        channels,
        vec![Channel::WateringIndicator, Channel::Temperature, Channel::Humidity]
    );
    assert_eq!(tel.last(Channel::Temperature), Some(TelemetryValue::Float(22.5)));
    assert_eq!(tel.last(Channel::Humidity), Some(TelemetryValue::Float(70.0)));
    assert_eq!(app.tick_count(), 1);
}
