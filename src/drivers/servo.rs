//! Hobby servo driver (SG90 / MG996R class) on a PWM channel.
//!
//! Angle maps linearly onto the configured pulse range:
//!
//! ```text
//! pulse_us = min + (max - min) * deg / 180
//! duty     = pulse_us * max_duty / period_us
//! ```
//!
//! On ESP32 the channel is an LEDC driver at 50 Hz, 14-bit resolution.

use embedded_hal::pwm::SetDutyCycle;
use log::debug;

use crate::config::ServoConfig;
use crate::error::ActuatorError;

pub const MAX_ANGLE_DEG: u8 = 180;

pub struct ServoDriver<P> {
    pwm: P,
    config: ServoConfig,
}

impl<P: SetDutyCycle> ServoDriver<P> {
    pub fn new(pwm: P, config: ServoConfig) -> Self {
        Self { pwm, config }
    }

    /// Pulse width for `degrees`, clamped to the 0..=180 range.
    pub fn pulse_us(&self, degrees: u8) -> u32 {
        let deg = u32::from(degrees.min(MAX_ANGLE_DEG));
        let min = u32::from(self.config.min_pulse_us);
        let max = u32::from(self.config.max_pulse_us);
        min + (max.saturating_sub(min)) * deg / u32::from(MAX_ANGLE_DEG)
    }

    fn duty_for(&self, pulse_us: u32) -> u16 {
        let max_duty = u32::from(self.pwm.max_duty_cycle());
        let duty = pulse_us * max_duty / self.config.period_us();
        duty.min(max_duty) as u16
    }

    pub fn set_angle(&mut self, degrees: u8) -> Result<(), ActuatorError> {
        let pulse = self.pulse_us(degrees);
        let duty = self.duty_for(pulse);
        self.pwm
            .set_duty_cycle(duty)
            .map_err(|_| ActuatorError::PwmWriteFailed)?;
        debug!("Servo -> {} deg ({} us, duty {})", degrees, pulse, duty);
        Ok(())
    }
}
