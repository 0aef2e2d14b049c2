//! Actuator drivers.

pub mod digital_out;
pub mod servo;
