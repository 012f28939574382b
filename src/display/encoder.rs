//! Temperature → seven-segment digit encoding.
//!
//! A value is scaled by 1000 and split into five decimal digits
//! (tens, ones, tenths, hundredths, thousandths).  Two rendering paths
//! exist and they differ on purpose:
//!
//! | Path         | Scaling              | Leading zero        |
//! |--------------|----------------------|---------------------|
//! | `Plain`      | truncate toward zero | always drawn        |
//! | `Difference` | round half up        | tens blanked if 0   |
//!
//! Display layout (position 0 is the rightmost digit):
//!
//! ```text
//!  pos:  6     5     4  .  3     2     1     0
//!       sign  tens  ones  10ths 100ths 1000ths unit
//! ```
//!
//! The sign sits immediately left of the most significant drawn digit,
//! so it moves into position 5 when the tens digit is blanked.

use super::segments::{BLANK, Glyph};

/// Number of independently addressable digit positions.
pub const DIGIT_POSITIONS: usize = 9;

/// Decimal-point mask: the point follows the ones digit (position 4).
pub const DECIMAL_POINT_MASK: u8 = 0x10;

/// Position of the unit glyph.
const UNIT_POS: usize = 0;
/// Position of the tens digit; lower digits occupy 4..=1.
const TENS_POS: usize = 5;

// ---------------------------------------------------------------------------
// Unit and path selectors
// ---------------------------------------------------------------------------

/// Temperature unit shown in position 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Celsius,
    Fahrenheit,
}

impl Unit {
    pub fn glyph(self) -> Glyph {
        match self {
            Self::Celsius => Glyph::C,
            Self::Fahrenheit => Glyph::F,
        }
    }

    /// Convert a Celsius reading into this unit.
    pub fn convert_celsius(self, celsius: f32) -> f32 {
        match self {
            Self::Celsius => celsius,
            Self::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
        }
    }
}

/// Which rendering rules apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPath {
    /// Live and baseline readings.
    Plain,
    /// Signed baseline-minus-current difference.
    Difference,
}

// ---------------------------------------------------------------------------
// DigitSet
// ---------------------------------------------------------------------------

/// Exactly five decimal digits, most significant first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigitSet([u8; 5]);

impl DigitSet {
    const WEIGHTS: [u32; 5] = [10_000, 1_000, 100, 10, 1];

    /// Split a value already scaled by 1000.  Anything at or above 100 000
    /// wraps, the display has no hundreds position.
    pub fn from_scaled(scaled: u32) -> Self {
        let mut digits = [0u8; 5];
        for (digit, weight) in digits.iter_mut().zip(Self::WEIGHTS) {
            *digit = ((scaled / weight) % 10) as u8;
        }
        Self(digits)
    }

    pub fn digits(&self) -> [u8; 5] {
        self.0
    }

    pub fn tens(&self) -> u8 {
        self.0[0]
    }

    /// Σ digit × weight.  Equals the scaled input when it fits.
    pub fn weighted_sum(&self) -> u32 {
        self.0
            .iter()
            .zip(Self::WEIGHTS)
            .map(|(&d, w)| u32::from(d) * w)
            .sum()
    }
}

/// Scale a magnitude by 1000 using the path's rounding rule.
///
/// Done in `f64` so the truncating path sees the same binary-fraction
/// artifacts the rounding path exists to correct.
pub fn scale(value: f32, path: RenderPath) -> u32 {
    let magnitude = f64::from(value).abs() * 1000.0;
    match path {
        RenderPath::Plain => magnitude as u32,
        RenderPath::Difference => (magnitude + 0.5) as u32,
    }
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// Result of [`encode`]: everything needed to fill one display frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Encoded {
    pub unit_glyph: Glyph,
    pub digits: DigitSet,
    /// `Dash` for negative values, `Blank` otherwise.
    pub sign: Glyph,
    /// Tens position is left dark when its digit is zero.
    pub suppress_leading_zero: bool,
}

/// Encode `value` (already in `unit`) for display.
pub fn encode(value: f32, unit: Unit, path: RenderPath) -> Encoded {
    Encoded {
        unit_glyph: unit.glyph(),
        digits: DigitSet::from_scaled(scale(value, path)),
        sign: if value < 0.0 { Glyph::Dash } else { Glyph::Blank },
        suppress_leading_zero: path == RenderPath::Difference,
    }
}

impl Encoded {
    /// Lay the encoding out over the display positions.
    pub fn frame(&self) -> Frame {
        let mut frame = Frame::blank();
        frame.set(UNIT_POS, self.unit_glyph);

        let digits = self.digits.digits();
        // digits[4] (thousandths) → pos 1 ... digits[0] (tens) → pos 5
        for (i, &d) in digits.iter().enumerate() {
            frame.set(TENS_POS - i, Glyph::Digit(d));
        }

        let tens_blank = self.suppress_leading_zero && self.digits.tens() == 0;
        let sign_pos = if tens_blank {
            frame.set(TENS_POS, Glyph::Blank);
            TENS_POS
        } else {
            TENS_POS + 1
        };
        frame.set(sign_pos, self.sign);

        frame.decimal_points = DECIMAL_POINT_MASK;
        frame
    }
}

// ---------------------------------------------------------------------------
// Frames and banners
// ---------------------------------------------------------------------------

/// One complete display image: a pattern per position plus the
/// decimal-point bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub patterns: [u8; DIGIT_POSITIONS],
    pub decimal_points: u8,
}

impl Frame {
    pub const fn blank() -> Self {
        Self {
            patterns: [BLANK; DIGIT_POSITIONS],
            decimal_points: 0,
        }
    }

    pub fn set(&mut self, pos: usize, glyph: Glyph) {
        if let Some(slot) = self.patterns.get_mut(pos) {
            *slot = glyph.pattern();
        }
    }

    /// A mode name, right-aligned, no decimal points.
    pub fn banner(banner: Banner) -> Self {
        let mut frame = Self::blank();
        let glyphs = banner.glyphs();
        for (i, &g) in glyphs.iter().rev().enumerate() {
            frame.set(i, g);
        }
        frame
    }
}

/// Mode names spelled on the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Banner {
    /// "rSt", shown on entering Idle.
    Reset,
    Live,
    /// "AVG", shown while waiting for a calibrate sub-action.
    Average,
    /// "dIFF", shown before the difference display starts.
    Difference,
}

impl Banner {
    pub fn glyphs(self) -> &'static [Glyph] {
        match self {
            Self::Reset => &[Glyph::R, Glyph::S, Glyph::T],
            Self::Live => &[Glyph::L, Glyph::I, Glyph::V, Glyph::E],
            Self::Average => &[Glyph::A, Glyph::V, Glyph::G],
            Self::Difference => &[Glyph::D, Glyph::I, Glyph::F, Glyph::F],
        }
    }
}
