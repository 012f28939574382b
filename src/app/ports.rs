//! Port traits: the boundary between the station core and the panel HAL.
//!
//! ```text
//!   HAL adapter ──▶ Port trait ──▶ StationService (domain)
//! ```
//!
//! The memory-mapped GPIO, debounce, seven-segment, PWM, and two-wire
//! cores are external collaborators.  They are reached only through the
//! traits below; the core never touches a register.  Time is
//! `embedded_hal::delay::DelayNs`, so tests drive the whole state
//! machine with a recording delay instead of real sleeps.

use embedded_hal::delay::DelayNs;

use crate::error::SensorError;

// ───────────────────────────────────────────────────────────────
// Input ports
// ───────────────────────────────────────────────────────────────

/// Debounced push-button bank (five lines, one bit each).
pub trait ButtonPort {
    /// Current debounced level of all buttons.  `0` when none is held.
    fn read_buttons(&mut self) -> u8;
}

/// Slide-switch bank used as the auxiliary unit selector.
pub trait SwitchPort {
    fn read_switches(&mut self) -> u16;
}

/// Temperature source.  Implemented by the ADT7420 driver and by mocks.
pub trait SensorPort {
    /// One instantaneous reading in degrees Celsius.
    fn read_celsius(&mut self) -> Result<f32, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Output ports
// ───────────────────────────────────────────────────────────────

/// Multiplexed seven-segment display.
pub trait DisplayPort {
    /// Write an active-low segment pattern to one digit position (0–8).
    fn write_pattern(&mut self, position: u8, pattern: u8);

    /// Bitmask of positions whose decimal point is lit.
    fn set_decimal_points(&mut self, mask: u8);
}

/// Three-channel PWM block driving the direction indicator.
pub trait IndicatorPort {
    /// Set one channel's duty (0–1023).
    fn set_duty(&mut self, channel: u8, duty: u16);
}

/// Discrete status LEDs.
pub trait LedPort {
    fn set_led(&mut self, index: u8, on: bool);
}

// ───────────────────────────────────────────────────────────────
// Umbrella trait
// ───────────────────────────────────────────────────────────────

/// Everything a state handler may touch.  Blanket-implemented, so any
/// type satisfying every port (a board adapter, a test mock) qualifies.
pub trait StationHardware:
    ButtonPort + SwitchPort + SensorPort + DisplayPort + IndicatorPort + LedPort + DelayNs
{
}

impl<T> StationHardware for T where
    T: ButtonPort + SwitchPort + SensorPort + DisplayPort + IndicatorPort + LedPort + DelayNs
{
}

// ───────────────────────────────────────────────────────────────
// Event sink port (domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The core emits [`StationEvent`](super::events::StationEvent)s through
/// this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::StationEvent);
}
