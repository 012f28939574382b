//! Outbound station events.
//!
//! State handlers queue these in the FSM context; the
//! [`StationService`](super::service::StationService) drains them into an
//! [`EventSink`](super::ports::EventSink) after every tick.  They carry
//! the diagnostics the panel used to print on its serial console.

use crate::display::Unit;
use crate::error::SensorError;
use crate::fsm::Mode;

/// Structured events emitted by the station core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StationEvent {
    /// The service has started (carries the initial mode).
    Started(Mode),

    /// The mode changed.  `from == to` for an explicit Idle re-reset.
    ModeChanged { from: Mode, to: Mode },

    /// A live reading was rendered.
    LiveReading { celsius: f32, unit: Unit },

    /// Set-baseline finished with a new averaged baseline.
    BaselineSet(f32),

    /// One frame of the difference display.
    Difference {
        stored: f32,
        current: f32,
        difference: f32,
    },

    /// The sensor failed this tick; nothing was rendered from it.
    ReadingUnavailable(SensorError),
}
