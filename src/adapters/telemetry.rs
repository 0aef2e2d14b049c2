//! Log-based telemetry sink.
//!
//! Stands in for the dashboard transport: every publish becomes a
//! `TELEM | V<n>=<value>` line, which a serial bridge can forward to the
//! dashboard's virtual pins.

use log::info;

use crate::app::ports::{Channel, TelemetrySink, TelemetryValue};

#[derive(Debug, Default)]
pub struct LogTelemetrySink;

impl LogTelemetrySink {
    pub fn new() -> Self {
        Self
    }
}

impl TelemetrySink for LogTelemetrySink {
    fn publish(&mut self, channel: Channel, value: TelemetryValue) {
        info!("TELEM | V{}={}", channel.virtual_pin(), value);
    }
}
