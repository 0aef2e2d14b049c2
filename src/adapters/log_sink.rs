//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { enabled } => {
                info!("START | enabled={}", enabled);
            }
            AppEvent::SystemEnabled => {
                info!("SYSTEM | enabled");
            }
            AppEvent::SystemDisabled => {
                info!("SYSTEM | disabled, outputs parked");
            }
            AppEvent::SensorFault {
                humidity,
                temperature,
            } => {
                warn!("FAULT | dht humidity={} temperature={}", humidity, temperature);
            }
            AppEvent::Reading {
                humidity,
                temperature,
            } => {
                info!("READ | humidity={:.1}% temperature={:.1}\u{00b0}C", humidity, temperature);
            }
            AppEvent::Watering { active } => {
                info!("WATER | active={}", active);
            }
            AppEvent::LightChanged { on } => {
                info!("LIGHT | on={}", on);
            }
        }
    }
}
