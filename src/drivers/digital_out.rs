//! Plain on/off GPIO output (grow light relay, indicator LEDs).

use embedded_hal::digital::OutputPin;
use log::warn;

use crate::error::ActuatorError;

pub struct DigitalOutput<P> {
    pin: P,
    gpio: i32,
}

impl<P: OutputPin> DigitalOutput<P> {
    /// Wrap `pin` and drive it LOW.
    pub fn new(mut pin: P, gpio: i32) -> Self {
        if let Err(e) = pin.set_low() {
            warn!("GPIO {}: initial LOW failed: {:?}", gpio, e);
        }
        Self { pin, gpio }
    }

    /// GPIO number this output is wired to.
    pub fn gpio(&self) -> i32 {
        self.gpio
    }

    pub fn set(&mut self, high: bool) -> Result<(), ActuatorError> {
        let result = if high {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        result.map_err(|_| ActuatorError::GpioWriteFailed)
    }
}
