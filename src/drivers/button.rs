//! Push-button code decoding.
//!
//! ## Hardware
//!
//! Five momentary buttons feed the debounce core, one bit per line.  The
//! core does the filtering; this module only turns the sampled word into
//! a command.
//!
//! | Bit | Value | Button        | Meaning                          |
//! |-----|-------|---------------|----------------------------------|
//! | 0   | 1     | centre        | reset to Idle                    |
//! | 1   | 2     | up            | set baseline (Calibrate only)    |
//! | 2   | 4     | left          | enter Calibrate                  |
//! | 3   | 8     | down          | show difference (Calibrate only) |
//! | 4   | 16    | right         | enter Live                       |
//!
//! Chords and anything else decode to `None` and are ignored.

/// A recognised single-button press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ButtonCode {
    Idle = 0b0_0001,
    SetBaseline = 0b0_0010,
    Calibrate = 0b0_0100,
    ShowDifference = 0b0_1000,
    Live = 0b1_0000,
}

impl ButtonCode {
    /// Decode a sampled button word.
    pub fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0b0_0001 => Some(Self::Idle),
            0b0_0010 => Some(Self::SetBaseline),
            0b0_0100 => Some(Self::Calibrate),
            0b0_1000 => Some(Self::ShowDifference),
            0b1_0000 => Some(Self::Live),
            _ => None,
        }
    }

    pub fn raw(self) -> u8 {
        self as u8
    }
}
