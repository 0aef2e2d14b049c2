//! Controller state threaded through every component.
//!
//! `ControllerState` is the single struct the supervisor and the two
//! controllers read from and write to.  It is owned by the
//! [`ControllerService`](crate::app::service::ControllerService) and lent
//! out by `&mut` for the duration of one call; there are no globals.

// ---------------------------------------------------------------------------
// Plausibility limits (DHT22 datasheet measuring range)
// ---------------------------------------------------------------------------

pub const HUMIDITY_MIN_PCT: f32 = 0.0;
pub const HUMIDITY_MAX_PCT: f32 = 100.0;
pub const TEMPERATURE_MIN_C: f32 = -40.0;
pub const TEMPERATURE_MAX_C: f32 = 80.0;

// ---------------------------------------------------------------------------
// Sample
// ---------------------------------------------------------------------------

/// One temperature/humidity sample, taken once per enabled cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorSample {
    /// Relative humidity (%).
    pub humidity: f32,
    /// Air temperature (°C).
    pub temperature: f32,
    /// `false` when either reading is NaN or outside the sensor's range.
    pub valid: bool,
}

impl SensorSample {
    /// Build a sample from raw driver readings, classifying faults.
    pub fn from_readings(humidity: f32, temperature: f32) -> Self {
        let valid = (HUMIDITY_MIN_PCT..=HUMIDITY_MAX_PCT).contains(&humidity)
            && (TEMPERATURE_MIN_C..=TEMPERATURE_MAX_C).contains(&temperature);
        Self {
            humidity,
            temperature,
            valid,
        }
    }
}

// ---------------------------------------------------------------------------
// Component states
// ---------------------------------------------------------------------------

/// Master switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemState {
    pub enabled: bool,
}

/// Last watering decision applied to the servo and its indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WateringState {
    pub is_watering: bool,
}

/// Motion light output.  Persists across cycles for edge detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LightState {
    pub light_on: bool,
}

// ---------------------------------------------------------------------------
// ControllerState
// ---------------------------------------------------------------------------

/// Everything the control loop remembers between cycles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerState {
    pub system: SystemState,
    pub watering: WateringState,
    pub light: LightState,
    /// Most recent sample, valid or not.
    pub last_sample: Option<SensorSample>,
}

impl ControllerState {
    pub fn new(enabled: bool) -> Self {
        Self {
            system: SystemState { enabled },
            watering: WateringState::default(),
            light: LightState::default(),
            last_sample: None,
        }
    }
}
