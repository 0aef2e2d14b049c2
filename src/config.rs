//! System configuration parameters
//!
//! Board wiring and timing for the greenhouse controller.  The watering
//! thresholds are deliberately *not* here: they are fixed constants of the
//! control law (see [`crate::control::watering`]).
//! Values can be overridden through a [`ConfigPort`](crate::app::ports::ConfigPort).

use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;
use crate::pins;

/// GPIO assignments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PinConfig {
    pub dht_gpio: i32,
    pub pir_gpio: i32,
    pub servo_gpio: i32,
    pub light_gpio: i32,
}

impl Default for PinConfig {
    fn default() -> Self {
        Self {
            dht_gpio: pins::DHT_GPIO,
            pir_gpio: pins::PIR_GPIO,
            servo_gpio: pins::SERVO_GPIO,
            light_gpio: pins::LIGHT_GPIO,
        }
    }
}

/// Servo pulse calibration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServoConfig {
    /// Pulse width for 0 degrees (µs)
    pub min_pulse_us: u16,
    /// Pulse width for 180 degrees (µs)
    pub max_pulse_us: u16,
    /// PWM frame frequency (Hz)
    pub frequency_hz: u32,
}

impl Default for ServoConfig {
    fn default() -> Self {
        Self {
            min_pulse_us: pins::SERVO_MIN_PULSE_US,
            max_pulse_us: pins::SERVO_MAX_PULSE_US,
            frequency_hz: pins::SERVO_PWM_FREQ_HZ,
        }
    }
}

impl ServoConfig {
    /// Length of one PWM frame in microseconds.
    pub fn period_us(&self) -> u32 {
        1_000_000 / self.frequency_hz.max(1)
    }
}

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    /// Control loop interval (milliseconds)
    pub control_loop_interval_ms: u32,
    /// Whether the master switch starts in the ON position
    pub initially_enabled: bool,
    pub pins: PinConfig,
    pub servo: ServoConfig,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            control_loop_interval_ms: 1000, // 1 Hz
            initially_enabled: true,
            pins: PinConfig::default(),
            servo: ServoConfig::default(),
        }
    }
}

impl SystemConfig {
    /// Range-check every field.  Invalid values are rejected, never clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.control_loop_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed(
                "control_loop_interval_ms must be non-zero",
            ));
        }

        let p = &self.pins;
        let all = [p.dht_gpio, p.pir_gpio, p.servo_gpio, p.light_gpio];
        for (i, a) in all.iter().enumerate() {
            if *a < 0 {
                return Err(ConfigError::ValidationFailed("GPIO numbers must be >= 0"));
            }
            if all[i + 1..].contains(a) {
                return Err(ConfigError::ValidationFailed("GPIO assigned twice"));
            }
        }

        let s = &self.servo;
        if s.frequency_hz == 0 {
            return Err(ConfigError::ValidationFailed("servo frequency_hz must be non-zero"));
        }
        if s.min_pulse_us >= s.max_pulse_us {
            return Err(ConfigError::ValidationFailed(
                "servo min_pulse_us must be below max_pulse_us",
            ));
        }
        if u32::from(s.max_pulse_us) > s.period_us() {
            return Err(ConfigError::ValidationFailed(
                "servo max_pulse_us exceeds the PWM period",
            ));
        }
        Ok(())
    }
}
