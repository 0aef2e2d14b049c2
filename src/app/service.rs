//! Application service: the hexagonal core.
//!
//! [`ControllerService`] owns the [`ControllerState`] and the three control
//! components.  It exposes a clean, hardware-agnostic API.  All I/O flows
//! through port traits injected at call sites, making the entire service
//! testable with mock adapters.
//!
//! ```text
//!  SensorPort ──▶ ┌──────────────────────────────┐ ──▶ TelemetrySink
//!                 │      ControllerService        │
//! ActuatorPort ◀──│ Supervisor · Watering · Light │ ──▶ EventSink
//!                 └──────────────────────────────┘
//! ```

use log::{info, warn};

use crate::config::SystemConfig;
use crate::control::motion_light::MotionLightController;
use crate::control::state::{ControllerState, LightState, SensorSample, WateringState};
use crate::control::supervisor::{Supervisor, Transition};
use crate::control::watering::WateringController;

use super::commands::SwitchCommand;
use super::events::AppEvent;
use super::ports::{
    ActuatorPort, Channel, EventSink, SensorPort, TelemetrySink, TelemetryValue,
};

// ───────────────────────────────────────────────────────────────
// Cycle outcome
// ───────────────────────────────────────────────────────────────

/// What one call to [`ControllerService::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CycleOutcome {
    /// Master switch is OFF; nothing was read or written.
    Skipped,
    /// Full pipeline ran.
    Completed {
        sample: SensorSample,
        /// `None` when the sample was invalid and watering was skipped.
        watering: Option<WateringState>,
        light: LightState,
    },
}

// ───────────────────────────────────────────────────────────────
// ControllerService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct ControllerService {
    config: SystemConfig,
    state: ControllerState,
    supervisor: Supervisor,
    watering: WateringController,
    light: MotionLightController,
    tick_count: u64,
}

impl ControllerService {
    /// Construct the service from configuration.
    ///
    /// Does **not** touch any port; call [`start`](Self::start) next.
    pub fn new(config: SystemConfig) -> Self {
        let light_gpio = config.pins.light_gpio;
        Self {
            state: ControllerState::new(config.initially_enabled),
            supervisor: Supervisor::new(light_gpio),
            watering: WateringController::new(),
            light: MotionLightController::new(light_gpio),
            config,
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Publish dashboard defaults and bring outputs to a consistent state.
    ///
    /// Indicators start LOW and the manual switch mirrors the initial
    /// master state.  A controller configured to boot disabled runs the
    /// shutdown sequence so the servo and light are parked.
    pub fn start(
        &mut self,
        hw: &mut impl ActuatorPort,
        telemetry: &mut impl TelemetrySink,
        sink: &mut impl EventSink,
    ) {
        let enabled = self.state.system.enabled;
        telemetry.publish(Channel::MotionIndicator, TelemetryValue::Bool(false));
        telemetry.publish(Channel::WateringIndicator, TelemetryValue::Bool(false));
        telemetry.publish(Channel::ManualSwitch, TelemetryValue::Bool(enabled));

        if !enabled {
            self.supervisor.shutdown(&mut self.state, hw, telemetry);
        }

        sink.emit(&AppEvent::Started { enabled });
        info!("ControllerService started, system {}", if enabled { "ON" } else { "OFF" });
    }

    // ── Command handling ──────────────────────────────────────

    /// Process a master-switch command drained from the mailbox.
    pub fn handle_command(
        &mut self,
        cmd: SwitchCommand,
        hw: &mut impl ActuatorPort,
        telemetry: &mut impl TelemetrySink,
        sink: &mut impl EventSink,
    ) -> Transition {
        self.supervisor
            .handle_command(cmd, &mut self.state, hw, telemetry, sink)
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one enabled-cycle pipeline: sensors → watering → light → telemetry.
    ///
    /// The `hw` parameter satisfies **both** [`SensorPort`] and
    /// [`ActuatorPort`]; this avoids a double mutable borrow while
    /// keeping the port boundary explicit.
    pub fn tick(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort),
        telemetry: &mut impl TelemetrySink,
        sink: &mut impl EventSink,
    ) -> CycleOutcome {
        if !self.supervisor.is_enabled(&self.state) {
            return CycleOutcome::Skipped;
        }
        self.tick_count += 1;

        // 1. Read sensors via SensorPort
        let (humidity, temperature) = hw.read_climate();
        let sample = SensorSample::from_readings(humidity, temperature);
        self.state.last_sample = Some(sample);

        // 2. Watering (valid samples only; stale outputs retained otherwise)
        let watering = if sample.valid {
            info!("Temperature: {:.1}\u{00b0}C | Humidity: {:.1}%", temperature, humidity);
            sink.emit(&AppEvent::Reading {
                humidity,
                temperature,
            });
            let w = self
                .watering
                .evaluate(&sample, &mut self.state, hw, telemetry);
            sink.emit(&AppEvent::Watering {
                active: w.is_watering,
            });
            Some(w)
        } else {
            warn!("Failed to read from DHT sensor!");
            sink.emit(&AppEvent::SensorFault {
                humidity,
                temperature,
            });
            None
        };

        // 3. Motion light (independent sensor, runs on fault cycles too)
        let motion = hw.read_motion();
        let was_on = self.state.light.light_on;
        let light = self.light.evaluate(motion, &mut self.state, hw, telemetry);
        if light.light_on != was_on {
            sink.emit(&AppEvent::LightChanged { on: light.light_on });
        }

        // 4. Reading telemetry
        if sample.valid {
            telemetry.publish(Channel::Temperature, TelemetryValue::Float(temperature));
            telemetry.publish(Channel::Humidity, TelemetryValue::Float(humidity));
        }

        CycleOutcome::Completed {
            sample,
            watering,
            light,
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn is_enabled(&self) -> bool {
        self.supervisor.is_enabled(&self.state)
    }

    /// Snapshot of the controller state.
    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    /// Enabled cycles executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}
