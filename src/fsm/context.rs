//! Shared mutable context threaded through every FSM handler.
//!
//! `StationContext` is the single struct that state handlers read from
//! and write to: the button code sampled this tick, the calibration
//! baseline, the Calibrate sub-phase, configuration, and the queue of
//! events waiting to be handed to the event sink.

use heapless::Vec;
use log::debug;

use crate::app::events::StationEvent;
use crate::config::StationConfig;
use crate::control::indicator::IndicatorMapper;
use crate::drivers::button::ButtonCode;

/// Events a single tick may queue before the service drains them.
pub const EVENT_QUEUE_DEPTH: usize = 8;

// ---------------------------------------------------------------------------
// Calibrate sub-phase
// ---------------------------------------------------------------------------

/// Where Calibrate is within its own flow.  One tagged value instead of
/// independent latch flags, so "both sub-actions active" cannot exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibratePhase {
    /// "AVG" shown, waiting for set-baseline or show-difference.
    AwaitingAction,
    /// Difference display refreshing every tick until Idle or Live.
    ShowingDifference,
}

// ---------------------------------------------------------------------------
// StationContext
// ---------------------------------------------------------------------------

/// The shared context passed to every state handler function.
pub struct StationContext {
    // -- Input --
    /// Recognised button code sampled this tick, if any.
    pub button: Option<ButtonCode>,

    // -- Calibration --
    /// Averaged reference temperature.  `None` until set-baseline has
    /// completed; cleared on every Idle entry.
    pub baseline: Option<f32>,
    pub phase: CalibratePhase,

    // -- Policy / configuration --
    pub indicator: IndicatorMapper,
    pub config: StationConfig,

    events: Vec<StationEvent, EVENT_QUEUE_DEPTH>,
}

impl StationContext {
    pub fn new(config: StationConfig) -> Self {
        Self {
            button: None,
            baseline: None,
            phase: CalibratePhase::AwaitingAction,
            indicator: IndicatorMapper::from_config(&config),
            config,
            events: Vec::new(),
        }
    }

    /// Baseline for difference computation; zero before calibration.
    pub fn baseline_or_zero(&self) -> f32 {
        self.baseline.unwrap_or(0.0)
    }

    /// Queue an event for the sink.  Overflow drops the newest event.
    pub fn push_event(&mut self, event: StationEvent) {
        if let Err(dropped) = self.events.push(event) {
            debug!("event queue full, dropped {:?}", dropped);
        }
    }

    /// Take every queued event, leaving the queue empty.
    pub fn take_events(&mut self) -> Vec<StationEvent, EVENT_QUEUE_DEPTH> {
        core::mem::take(&mut self.events)
    }
}
