//! Outbound application events.
//!
//! The [`ControllerService`](super::service::ControllerService) emits these
//! through the [`EventSink`](super::ports::EventSink) port.  They feed the
//! diagnostic log only; dashboard state travels over the telemetry port.

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The service has started (carries the initial master-switch state).
    Started { enabled: bool },

    /// Master switch went OFF → ON.
    SystemEnabled,

    /// Master switch went ON → OFF and the shutdown sequence ran.
    SystemDisabled,

    /// Temperature/humidity sample rejected; watering skipped this cycle.
    SensorFault { humidity: f32, temperature: f32 },

    /// A valid sample was taken.
    Reading { humidity: f32, temperature: f32 },

    /// Watering controller re-asserted its outputs.
    Watering { active: bool },

    /// Motion light changed on an edge.
    LightChanged { on: bool },
}
