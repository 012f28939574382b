//! Seven-segment glyph table.
//!
//! Patterns are **active-low**: a `0` bit lights the segment.  Bit layout
//! is `dp g f e d c b a` (bit 7 = decimal point, bit 0 = segment a).
//!
//! ```text
//!      a
//!    ┌───┐
//!  f │ g │ b
//!    ├───┤
//!  e │   │ c
//!    └───┘ . dp
//!      d
//! ```
//!
//! Every rendering path (digits, unit letters, mode banners, sign) looks
//! patterns up through [`Glyph::pattern`]; there is no second table.

/// All segments dark.
pub const BLANK: u8 = 0xFF;

/// Everything the station ever draws on one digit position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Glyph {
    /// Decimal digit 0–9.
    Digit(u8),
    /// Celsius unit marker.
    C,
    /// Fahrenheit unit marker (also the F in "DIFF").
    F,
    A,
    D,
    E,
    G,
    I,
    L,
    R,
    S,
    T,
    /// Drawn with the U shape, seven segments have no V.
    V,
    /// Minus sign.
    Dash,
    Blank,
}

/// Active-low patterns for 0–9, indexed by digit value.
const DIGITS: [u8; 10] = [
    0xC0, // 0
    0xF9, // 1
    0xA4, // 2
    0xB0, // 3
    0x99, // 4
    0x92, // 5
    0x82, // 6
    0xF8, // 7
    0x80, // 8
    0x90, // 9
];

impl Glyph {
    /// Segment pattern for this glyph.
    ///
    /// Digits above 9 have no decimal glyph and render blank.
    pub const fn pattern(self) -> u8 {
        match self {
            Self::Digit(d) if d < 10 => DIGITS[d as usize],
            Self::Digit(_) => BLANK,
            Self::C => 0xC6,
            Self::F => 0x8E,
            Self::A => 0x88,
            Self::D => 0xA1, // small d
            Self::E => 0x86,
            Self::G => 0x90, // shares the 9 shape
            Self::I => 0xF9, // shares the 1 shape
            Self::L => 0xC7,
            Self::R => 0xAF, // small r
            Self::S => 0x92, // shares the 5 shape
            Self::T => 0x87, // small t
            Self::V => 0xC1,
            Self::Dash => 0xBF,
            Self::Blank => BLANK,
        }
    }
}
