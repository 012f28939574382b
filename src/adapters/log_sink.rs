//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing station events through the `log`
//! facade, the equivalent of the panel's serial console.

use log::{info, warn};

use crate::app::events::StationEvent;
use crate::app::ports::EventSink;
use crate::display::Unit;

/// Adapter that logs every [`StationEvent`].
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &StationEvent) {
        match event {
            StationEvent::Started(mode) => {
                info!("START | initial_mode={:?}", mode);
            }
            StationEvent::ModeChanged { from, to } => {
                info!("MODE  | {:?} -> {:?}", from, to);
            }
            StationEvent::LiveReading { celsius, unit } => {
                let shown = unit.convert_celsius(*celsius);
                let suffix = match unit {
                    Unit::Celsius => 'C',
                    Unit::Fahrenheit => 'F',
                };
                info!("LIVE  | {:.4} C shown as {:.3} {}", celsius, shown, suffix);
            }
            StationEvent::BaselineSet(baseline) => {
                info!("CAL   | baseline={:.4} C", baseline);
            }
            StationEvent::Difference {
                stored,
                current,
                difference,
            } => {
                info!(
                    "DIFF  | stored={:.4} current={:.4} difference={:.4}",
                    stored, current, difference
                );
            }
            StationEvent::ReadingUnavailable(e) => {
                warn!("SENSE | reading unavailable: {}", e);
            }
        }
    }
}
