//! Master-switch supervisor.
//!
//! Owns the enable/disable transition.  Side effects happen only on the
//! two edges of the master switch; a command that matches the current
//! state is a silent no-op, so a flapping command source can never cause
//! spurious actuator writes.
//!
//! ## Shutdown sequence (ON → OFF)
//!
//! 1. Servo to the closed position.
//! 2. Watering indicator LOW.
//! 3. Light output LOW.
//! 4. Motion indicator LOW.
//! 5. `light_on = false`, so the next enable starts from a clean
//!    edge-detection baseline.

use log::info;

use super::state::{ControllerState, LightState, WateringState};
use super::watering::SERVO_CLOSED_DEG;
use crate::app::commands::SwitchCommand;
use crate::app::events::AppEvent;
use crate::app::ports::{ActuatorPort, Channel, EventSink, TelemetrySink, TelemetryValue};

/// Result of handling one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Enabled,
    Disabled,
    /// Command matched the current state.
    Unchanged,
}

/// Gatekeeper for the enabled/disabled master state.
#[derive(Debug)]
pub struct Supervisor {
    light_gpio: i32,
}

impl Supervisor {
    pub fn new(light_gpio: i32) -> Self {
        Self { light_gpio }
    }

    /// Pure read of the master switch.
    pub fn is_enabled(&self, state: &ControllerState) -> bool {
        state.system.enabled
    }

    /// Apply a master-switch command.
    pub fn handle_command(
        &self,
        cmd: SwitchCommand,
        state: &mut ControllerState,
        hw: &mut impl ActuatorPort,
        telemetry: &mut impl TelemetrySink,
        sink: &mut impl EventSink,
    ) -> Transition {
        match (cmd, state.system.enabled) {
            (SwitchCommand::On, false) => {
                info!("System turned ON");
                state.system.enabled = true;
                sink.emit(&AppEvent::SystemEnabled);
                Transition::Enabled
            }
            (SwitchCommand::Off, true) => {
                info!("System turned OFF");
                self.shutdown(state, hw, telemetry);
                state.system.enabled = false;
                sink.emit(&AppEvent::SystemDisabled);
                Transition::Disabled
            }
            _ => Transition::Unchanged,
        }
    }

    /// Force every output to its safe state, independent of sensor readings.
    pub fn shutdown(
        &self,
        state: &mut ControllerState,
        hw: &mut impl ActuatorPort,
        telemetry: &mut impl TelemetrySink,
    ) {
        hw.set_servo_angle(SERVO_CLOSED_DEG);
        telemetry.publish(Channel::WateringIndicator, TelemetryValue::Bool(false));
        hw.set_digital_output(self.light_gpio, false);
        telemetry.publish(Channel::MotionIndicator, TelemetryValue::Bool(false));

        state.watering = WateringState { is_watering: false };
        state.light = LightState { light_on: false };
    }
}
