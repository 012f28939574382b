//! Panel input decoding and status-LED helpers.

pub mod button;
pub mod led_patterns;
