//! Unified error types for the TempStation controller.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! control loop's error handling uniform.  All variants are `Copy` so they
//! can be carried through FSM events without allocation.

use core::fmt;

use embedded_hal::i2c::ErrorKind;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the crate funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The temperature sensor could not produce a reading.
    Sensor(SensorError),
    /// Configuration is invalid or could not be loaded.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

/// Recoverable sensor failures.  A tick that hits one of these renders
/// nothing rather than a stale value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// A two-wire transaction failed.
    Bus(ErrorKind),
    /// An average over zero samples was requested.
    NoSamples,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bus(kind) => write!(f, "bus transaction failed ({kind})"),
            Self::NoSamples => write!(f, "no samples requested"),
        }
    }
}

impl std::error::Error for SensorError {}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
