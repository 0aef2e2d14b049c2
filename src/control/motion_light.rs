//! Motion-activated light.
//!
//! Edge-triggered, unlike watering: the light output and its indicator are
//! written only when the motion signal disagrees with the remembered light
//! state.  Sustained motion (or sustained stillness) produces no writes.

use log::info;

use super::state::{ControllerState, LightState};
use crate::app::ports::{ActuatorPort, Channel, TelemetrySink, TelemetryValue};

/// A detected transition of the motion signal relative to the light.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Rising,
    Falling,
}

/// Pure edge detector.
pub fn detect_edge(light_on: bool, motion_detected: bool) -> Option<Edge> {
    match (motion_detected, light_on) {
        (true, false) => Some(Edge::Rising),
        (false, true) => Some(Edge::Falling),
        _ => None,
    }
}

/// Drives the motion light GPIO and its dashboard indicator.
#[derive(Debug)]
pub struct MotionLightController {
    light_gpio: i32,
}

impl MotionLightController {
    pub fn new(light_gpio: i32) -> Self {
        Self { light_gpio }
    }

    /// Evaluate one motion reading.
    pub fn evaluate(
        &self,
        motion_detected: bool,
        state: &mut ControllerState,
        hw: &mut impl ActuatorPort,
        telemetry: &mut impl TelemetrySink,
    ) -> LightState {
        if let Some(edge) = detect_edge(state.light.light_on, motion_detected) {
            let on = edge == Edge::Rising;
            hw.set_digital_output(self.light_gpio, on);
            telemetry.publish(Channel::MotionIndicator, TelemetryValue::Bool(on));
            state.light.light_on = on;
            info!("Motion light {}", if on { "ON" } else { "OFF" });
        }
        state.light
    }
}
