//! Seven-segment display rendering.
//!
//! [`segments`] owns the glyph table, [`encoder`] turns temperatures and
//! mode names into [`Frame`]s.  The helpers here push a frame out through
//! a [`DisplayPort`].

pub mod encoder;
pub mod segments;

pub use encoder::{Banner, Frame, RenderPath, Unit, encode};

use crate::app::ports::DisplayPort;

/// Write every position of `frame`, then its decimal points.
pub fn show(display: &mut impl DisplayPort, frame: &Frame) {
    display.set_decimal_points(0);
    for (pos, &pattern) in frame.patterns.iter().enumerate() {
        display.write_pattern(pos as u8, pattern);
    }
    display.set_decimal_points(frame.decimal_points);
}

/// Blank all positions.
pub fn clear(display: &mut impl DisplayPort) {
    show(display, &Frame::blank());
}
