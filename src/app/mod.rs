//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the business rules for the greenhouse controller:
//! master-switch supervision, the watering and motion-light control laws,
//! and the per-cycle pipeline.  All interaction with hardware and the
//! dashboard happens through **port traits** defined in [`ports`], keeping
//! this layer fully testable without real peripherals.

pub mod commands;
pub mod events;
pub mod mailbox;
pub mod ports;
pub mod service;
