//! HC-SR501 PIR motion sensor.
//!
//! The module holds its output HIGH for the configured retrigger time while
//! motion is seen.  No debouncing here: the edge detection lives in
//! [`MotionLightController`](crate::control::motion_light::MotionLightController).

use embedded_hal::digital::InputPin;

use crate::error::SensorError;

pub struct MotionSensor<P> {
    pin: P,
}

impl<P: InputPin> MotionSensor<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    pub fn read(&mut self) -> Result<bool, SensorError> {
        self.pin.is_high().map_err(|_| SensorError::GpioReadFailed)
    }
}
