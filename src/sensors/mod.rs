//! Sensor subsystem: individual drivers and the aggregating [`SensorHub`].
//!
//! The hub owns every sensor driver and turns driver results into the
//! plain values the [`SensorPort`](crate::app::ports::SensorPort) contract
//! asks for: `f32::NAN` for a failed climate read, `false` for a failed
//! motion read.

pub mod dht22;
pub mod motion;

use embassy_time::{Duration, Instant};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use log::warn;

use crate::error::SensorError;
use dht22::{Dht22, DhtReading};
use motion::MotionSensor;

/// The DHT22 cannot be sampled faster than once every two seconds.
pub const DHT_MIN_INTERVAL: Duration = Duration::from_millis(2000);

/// Aggregates all sensor drivers.
pub struct SensorHub<P, D, M> {
    climate: Dht22<P, D>,
    motion: MotionSensor<M>,
    /// Last DHT transaction and when it ran.
    cached: Option<(Instant, Result<DhtReading, SensorError>)>,
}

impl<P, D, M> SensorHub<P, D, M>
where
    P: InputPin + OutputPin,
    D: DelayNs,
    M: InputPin,
{
    /// Construct a new hub.  Pass in pre-built drivers (built in main
    /// where peripheral ownership is established).
    pub fn new(climate: Dht22<P, D>, motion: MotionSensor<M>) -> Self {
        Self {
            climate,
            motion,
            cached: None,
        }
    }

    /// One DHT frame, reused until [`DHT_MIN_INTERVAL`] has passed since
    /// the transaction that produced it.  Failed transactions are cached
    /// too, so a dead sensor is not re-polled every call.
    pub fn climate(&mut self, now: Instant) -> Result<DhtReading, SensorError> {
        if let Some((at, result)) = self.cached {
            if now.saturating_duration_since(at) < DHT_MIN_INTERVAL {
                return result;
            }
        }
        let result = self.climate.read();
        if let Err(e) = result {
            warn!("DHT22 read failed: {}", e);
        }
        self.cached = Some((now, result));
        result
    }

    /// Motion level; a GPIO fault reads as "no motion".
    pub fn motion(&mut self) -> bool {
        self.motion.read().unwrap_or_else(|e| {
            warn!("PIR read failed: {}", e);
            false
        })
    }
}
