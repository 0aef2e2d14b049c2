//! DHT22 / AM2302 temperature + humidity sensor.
//!
//! Single-wire, open-drain protocol bit-banged over an `embedded-hal`
//! pin that is both input and output (ESP-IDF `PinDriver::input_output_od`).
//!
//! ```text
//!  host   ‾‾‾‾\____________/‾‾‾‾‾ (release)
//!  sensor                         \__80µs__/‾‾80µs‾‾\__50__/‾26-28 (0) or 70 (1)‾\__ …
//! ```
//!
//! A frame is 40 bits: humidity ×10 (16 bit), temperature ×10 (15 bit +
//! sign), checksum.  Bit values are recovered by comparing the length of
//! each HIGH pulse with the 50 µs LOW pulse preceding it, which keeps the
//! decoder independent of the loop overhead of the delay provider.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use log::warn;

use crate::error::SensorError;

/// Host start signal.  Datasheet minimum is 1 ms.
const START_LOW_US: u32 = 1_100;
/// Time the host waits after releasing the bus.
const RELEASE_US: u32 = 30;
/// Upper bound on any single protocol phase.
const PHASE_TIMEOUT_US: u32 = 200;

/// Decoded sensor reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DhtReading {
    /// Relative humidity (%).
    pub humidity: f32,
    /// Temperature (°C).
    pub temperature: f32,
}

/// Validate the checksum and convert a raw frame.
pub fn decode(frame: [u8; 5]) -> Result<DhtReading, SensorError> {
    let sum = frame[..4].iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
    if sum != frame[4] {
        return Err(SensorError::ChecksumMismatch);
    }

    let humidity = f32::from(u16::from_be_bytes([frame[0], frame[1]])) / 10.0;
    let magnitude = f32::from(u16::from_be_bytes([frame[2] & 0x7F, frame[3]])) / 10.0;
    let temperature = if frame[2] & 0x80 != 0 { -magnitude } else { magnitude };

    if humidity > 100.0 || !(-40.0..=80.0).contains(&temperature) {
        return Err(SensorError::OutOfRange);
    }
    Ok(DhtReading {
        humidity,
        temperature,
    })
}

/// Bit-banged DHT22 driver.
pub struct Dht22<P, D> {
    pin: P,
    delay: D,
}

impl<P, D> Dht22<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    /// Takes ownership of the data pin and leaves the bus released.
    pub fn new(mut pin: P, delay: D) -> Self {
        if let Err(e) = pin.set_high() {
            warn!("DHT22: cannot release data line: {:?}", e);
        }
        Self { pin, delay }
    }

    /// Run one full transaction.  Takes ~5 ms.
    pub fn read(&mut self) -> Result<DhtReading, SensorError> {
        let frame = self.read_frame()?;
        decode(frame)
    }

    fn read_frame(&mut self) -> Result<[u8; 5], SensorError> {
        self.pin
            .set_low()
            .map_err(|_| SensorError::GpioReadFailed)?;
        self.delay.delay_us(START_LOW_US);
        self.pin
            .set_high()
            .map_err(|_| SensorError::GpioReadFailed)?;
        self.delay.delay_us(RELEASE_US);

        // Sensor acknowledges: pulls low ~80 µs, then high ~80 µs.
        self.wait_while(true)?;
        self.wait_while(false)?;
        self.wait_while(true)?;

        let mut frame = [0u8; 5];
        for bit in 0..40 {
            let low = self.wait_while(false)?;
            let high = self.wait_while(true)?;
            if high > low {
                frame[bit / 8] |= 0x80 >> (bit % 8);
            }
        }
        Ok(frame)
    }

    /// Spin while the line sits at `level`; returns the elapsed µs count.
    fn wait_while(&mut self, level: bool) -> Result<u32, SensorError> {
        let mut elapsed = 0;
        while self.pin.is_high().map_err(|_| SensorError::GpioReadFailed)? == level {
            if elapsed >= PHASE_TIMEOUT_US {
                return Err(SensorError::Timeout);
            }
            self.delay.delay_us(1);
            elapsed += 1;
        }
        Ok(elapsed)
    }
}
