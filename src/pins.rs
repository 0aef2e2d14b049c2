//! GPIO / peripheral pin assignments for the greenhouse controller board.
//!
//! Default wiring of the ESP32 DevKit build.  [`SystemConfig`] copies these
//! into its pin map so a different board revision can override them without
//! touching the drivers.
//!
//! [`SystemConfig`]: crate::config::SystemConfig

// ---------------------------------------------------------------------------
// Sensors
// ---------------------------------------------------------------------------

/// DHT22 temperature/humidity sensor; single-wire data line (open drain).
pub const DHT_GPIO: i32 = 4;

/// HC-SR501 PIR motion sensor; digital output, HIGH while motion is seen.
pub const PIR_GPIO: i32 = 14;

// ---------------------------------------------------------------------------
// Actuators
// ---------------------------------------------------------------------------

/// SG90 watering-valve servo; LEDC PWM output.
pub const SERVO_GPIO: i32 = 32;

/// On-board LED used as the motion light.
pub const LIGHT_GPIO: i32 = 2;

// ---------------------------------------------------------------------------
// Servo PWM configuration
// ---------------------------------------------------------------------------

/// Hobby-servo frame rate.
pub const SERVO_PWM_FREQ_HZ: u32 = 50;
/// Pulse width commanding 0 degrees.
pub const SERVO_MIN_PULSE_US: u16 = 544;
/// Pulse width commanding 180 degrees.
pub const SERVO_MAX_PULSE_US: u16 = 2400;
