//! Watering controller.
//!
//! Level-triggered: the decision is recomputed from the current sample on
//! every evaluated cycle and the servo and indicator are re-asserted even
//! when nothing changed.  There is no hysteresis band.
//!
//! ```text
//!   humidity < 85.0 %  ──┐
//!                        ├── OR ──▶ servo 180°, indicator HIGH
//!   temperature > 30 °C ─┘
//!   otherwise            ────────▶ servo   0°, indicator LOW
//! ```

use log::info;

use super::state::{ControllerState, SensorSample, WateringState};
use crate::app::ports::{ActuatorPort, Channel, TelemetrySink, TelemetryValue};

/// Below this relative humidity (%) the bed is watered.  Strict `<`.
pub const HUMIDITY_THRESHOLD_PCT: f32 = 85.0;
/// Above this temperature (°C) the bed is watered.  Strict `>`.
pub const TEMPERATURE_THRESHOLD_C: f32 = 30.0;

/// Servo position with the valve fully open.
pub const SERVO_OPEN_DEG: u8 = 180;
/// Servo rest position, valve closed.
pub const SERVO_CLOSED_DEG: u8 = 0;

/// Pure watering decision.  Boundary values resolve to "not watering".
pub fn needs_watering(humidity: f32, temperature: f32) -> bool {
    humidity < HUMIDITY_THRESHOLD_PCT || temperature > TEMPERATURE_THRESHOLD_C
}

/// Drives the watering servo and its dashboard indicator.
#[derive(Debug, Default)]
pub struct WateringController;

impl WateringController {
    pub fn new() -> Self {
        Self
    }

    /// Apply the control law to a valid sample.
    ///
    /// Callers only invoke this for `sample.valid` in enabled cycles; an
    /// invalid sample is ignored here as well so stale outputs stay put.
    pub fn evaluate(
        &self,
        sample: &SensorSample,
        state: &mut ControllerState,
        hw: &mut impl ActuatorPort,
        telemetry: &mut impl TelemetrySink,
    ) -> WateringState {
        if !sample.valid {
            return state.watering;
        }

        let active = needs_watering(sample.humidity, sample.temperature);
        if active {
            info!("Watering condition met. Data updated on dashboard.");
            hw.set_servo_angle(SERVO_OPEN_DEG);
        } else {
            info!("Normal condition.");
            hw.set_servo_angle(SERVO_CLOSED_DEG);
        }
        telemetry.publish(Channel::WateringIndicator, TelemetryValue::Bool(active));

        state.watering = WateringState { is_watering: active };
        state.watering
    }
}
