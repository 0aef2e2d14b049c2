//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! Owns the [`SensorHub`] and the actuator drivers, exposing them through
//! [`SensorPort`] and [`ActuatorPort`].  Driver errors stop here: they are
//! logged and turned into NaN readings or skipped writes, so the control
//! core never sees a `Result`.

use embassy_time::Instant;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::pwm::SetDutyCycle;
use log::warn;

use crate::app::ports::{ActuatorPort, SensorPort};
use crate::drivers::digital_out::DigitalOutput;
use crate::drivers::servo::ServoDriver;
use crate::error::{ActuatorError, Error};
use crate::sensors::SensorHub;

/// Concrete adapter that combines all hardware behind port traits.
///
/// `P`/`D`/`M` are the DHT data pin, its delay provider and the PIR pin;
/// `S` the servo PWM channel and `L` the grow-light pin.
pub struct HardwareAdapter<P, D, M, S, L> {
    sensor_hub: SensorHub<P, D, M>,
    servo: ServoDriver<S>,
    light: DigitalOutput<L>,
}

impl<P, D, M, S, L> HardwareAdapter<P, D, M, S, L> {
    pub fn new(
        sensor_hub: SensorHub<P, D, M>,
        servo: ServoDriver<S>,
        light: DigitalOutput<L>,
    ) -> Self {
        Self {
            sensor_hub,
            servo,
            light,
        }
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<P, D, M, S, L> SensorPort for HardwareAdapter<P, D, M, S, L>
where
    P: InputPin + OutputPin,
    D: DelayNs,
    M: InputPin,
{
    fn read_humidity(&mut self) -> f32 {
        self.read_climate().0
    }

    fn read_temperature(&mut self) -> f32 {
        self.read_climate().1
    }

    fn read_climate(&mut self) -> (f32, f32) {
        self.sensor_hub
            .climate(Instant::now())
            .map_or((f32::NAN, f32::NAN), |r| (r.humidity, r.temperature))
    }

    fn read_motion(&mut self) -> bool {
        self.sensor_hub.motion()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<P, D, M, S, L> ActuatorPort for HardwareAdapter<P, D, M, S, L>
where
    S: SetDutyCycle,
    L: OutputPin,
{
    fn set_servo_angle(&mut self, degrees: u8) {
        if let Err(e) = self.servo.set_angle(degrees) {
            warn!("Servo: {}", Error::from(e));
        }
    }

    fn set_digital_output(&mut self, pin: i32, high: bool) {
        let result = if pin == self.light.gpio() {
            self.light.set(high)
        } else {
            Err(ActuatorError::UnknownPin(pin))
        };
        if let Err(e) = result {
            warn!("GPIO {}: {}", pin, Error::from(e));
        }
    }
}
