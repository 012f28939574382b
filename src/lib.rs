//! TempStation controller library.
//!
//! Exposes the pure-logic modules for integration testing and for board
//! crates that supply their own panel HAL.  Nothing here touches a
//! register: hardware is reached through the traits in [`app::ports`].

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod control;
pub mod display;
pub mod drivers;
pub mod error;
pub mod fsm;
pub mod sensors;
