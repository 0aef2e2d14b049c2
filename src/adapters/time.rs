//! Monotonic clock adapter.
//!
//! `embassy_time::Instant` is backed by the std time driver, which on
//! ESP-IDF sits on top of `esp_timer`.  Sleeping blocks the calling thread,
//! which is the control-loop task.

use embassy_time::Instant;

use crate::app::ports::ClockPort;

#[derive(Debug, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl ClockPort for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep_until(&mut self, deadline: Instant) {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.as_micros() > 0 {
            std::thread::sleep(std::time::Duration::from_micros(remaining.as_micros()));
        }
    }
}
