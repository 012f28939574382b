//! Application core: mode logic behind port traits.
//!
//! This module holds the control loop that drives the mode state machine.
//! All interaction with hardware happens through **port traits** defined
//! in [`ports`], keeping this layer fully testable without real
//! peripherals.

pub mod events;
pub mod ports;
pub mod service;
