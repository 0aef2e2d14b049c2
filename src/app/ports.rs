//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ControllerService (domain)
//! ```
//!
//! Driven adapters (sensors, actuators, dashboard telemetry, clock, config)
//! implement these traits.  The [`ControllerService`](super::service::ControllerService)
//! consumes them via generics, so the domain core never touches hardware
//! or the dashboard transport directly.

use embassy_time::Instant;

use crate::config::SystemConfig;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this to obtain sensor data.
pub trait SensorPort {
    /// Relative humidity in percent.  `f32::NAN` signals a sensor fault.
    fn read_humidity(&mut self) -> f32;

    /// Air temperature in °C.  `f32::NAN` signals a sensor fault.
    fn read_temperature(&mut self) -> f32;

    /// `(humidity, temperature)` from one sensor transaction.  The control
    /// loop calls this once per cycle; adapters whose sensor delivers both
    /// values in one frame override it.
    fn read_climate(&mut self) -> (f32, f32) {
        (self.read_humidity(), self.read_temperature())
    }

    /// `true` while the motion sensor output is HIGH.
    fn read_motion(&mut self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to command actuators.
///
/// Writes are idempotent at the hardware layer; the domain is free to
/// re-assert the same value every cycle.
pub trait ActuatorPort {
    /// Move the watering servo to `degrees` (0–180).
    fn set_servo_angle(&mut self, degrees: u8);

    /// Drive a digital output pin HIGH or LOW.
    fn set_digital_output(&mut self, pin: i32, high: bool);
}

// ───────────────────────────────────────────────────────────────
// Telemetry port (driven adapter: domain → remote dashboard)
// ───────────────────────────────────────────────────────────────

/// Dashboard datastreams.  The discriminant is the virtual pin number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Channel {
    /// Relative humidity, %.
    Humidity = 0,
    /// Mirrors the motion light output.
    MotionIndicator = 1,
    /// Air temperature, °C.
    Temperature = 2,
    /// Mirrors the watering servo position.
    WateringIndicator = 3,
    /// Master on/off switch widget.
    ManualSwitch = 4,
}

impl Channel {
    /// Virtual pin number on the dashboard.
    pub const fn virtual_pin(self) -> u8 {
        self as u8
    }
}

/// A value written to a [`Channel`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TelemetryValue {
    Float(f32),
    Bool(bool),
}

impl core::fmt::Display for TelemetryValue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Float(v) => write!(f, "{:.1}", v),
            Self::Bool(b) => write!(f, "{}", u8::from(*b)),
        }
    }
}

/// Outbound dashboard writes.  Connectivity and reconnection are the
/// adapter's business; the core never sees a transport error.
pub trait TelemetrySink {
    fn publish(&mut self, channel: Channel, value: TelemetryValue);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → diagnostic log)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Informational only; nothing downstream may rely on
/// them for control.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Clock port (driven adapter: domain ↔ monotonic time)
// ───────────────────────────────────────────────────────────────

/// Monotonic time source plus the loop's single suspension point.
pub trait ClockPort {
    fn now(&self) -> Instant;

    /// Block until `deadline`.  Returns immediately if it already passed.
    fn sleep_until(&mut self, deadline: Instant);
}

// ───────────────────────────────────────────────────────────────
// Configuration port
// ───────────────────────────────────────────────────────────────

/// Loads system configuration.
///
/// Implementations MUST run [`SystemConfig::validate`] before returning a
/// config; invalid ranges are rejected, not silently clamped.
pub trait ConfigPort {
    /// Returns [`SystemConfig::default()`] if no stored config exists.
    fn load(&self) -> Result<SystemConfig, ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`ConfigPort`] operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Stored config failed deserialization.
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// Generic I/O error from the storage backend.
    IoError,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl core::error::Error for ConfigError {}

impl From<ConfigError> for crate::error::Error {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::ValidationFailed(msg) => Self::Config(msg),
            ConfigError::Corrupted => Self::Config("corrupted"),
            ConfigError::IoError => Self::Config("I/O error"),
        }
    }
}
