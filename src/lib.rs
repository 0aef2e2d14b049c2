//! Greenhouse controller firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection.  Drivers are written against `embedded-hal` traits, so the
//! whole library builds and tests on the host; only `main.rs` needs the
//! `espidf` feature.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod control;
pub mod drivers;
pub mod error;
pub mod pins;
pub mod scheduler;
pub mod sensors;
