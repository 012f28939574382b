//! Station service: the control loop.
//!
//! [`StationService`] owns the mode FSM and its context.  It exposes a
//! hardware-agnostic API: every iteration samples the buttons once,
//! dispatches to the active mode, and hands queued events to the sink.
//!
//! ```text
//!  ButtonPort ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                 │     StationService     │
//!  SensorPort ──▶ │  FSM · encoder · PWM   │ ──▶ DisplayPort / IndicatorPort
//!                 └────────────────────────┘
//! ```
//!
//! Single-threaded and cooperative.  Blocking pauses inside a mode
//! (banners, animations, averaging) do not sample input; a press made
//! during one is lost, not queued.

use log::{debug, info};

use crate::config::StationConfig;
use crate::drivers::button::ButtonCode;
use crate::fsm::context::{CalibratePhase, StationContext};
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, Mode};

use super::events::StationEvent;
use super::ports::{EventSink, StationHardware};

// ───────────────────────────────────────────────────────────────
// StationService
// ───────────────────────────────────────────────────────────────

/// The control loop for hardware `H`.
pub struct StationService<H> {
    fsm: Fsm<H>,
    ctx: StationContext,
    tick_count: u64,
}

impl<H: StationHardware> StationService<H> {
    /// Construct the service from configuration.
    ///
    /// Does **not** start the FSM; call [`start`](Self::start) next.
    pub fn new(config: StationConfig) -> Self {
        Self {
            fsm: Fsm::new(build_state_table::<H>(), Mode::Idle),
            ctx: StationContext::new(config),
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Run Idle's entry action (reset banner, flash, cleared outputs).
    pub fn start(&mut self, hw: &mut H, sink: &mut impl EventSink) {
        self.fsm.start(&mut self.ctx, hw);
        sink.emit(&StationEvent::Started(self.fsm.current_mode()));
        self.flush_events(sink);
        info!("StationService started in {:?}", self.fsm.current_mode());
    }

    /// One control-loop iteration.
    pub fn tick(&mut self, hw: &mut H, sink: &mut impl EventSink) {
        self.tick_count += 1;

        let raw = hw.read_buttons();
        let code = ButtonCode::from_raw(raw);
        if code.is_none() && raw != 0 {
            debug!("ignoring button word 0b{:05b}", raw);
        }

        self.ctx.button = code;
        self.fsm.tick(&mut self.ctx, hw);
        self.ctx.button = None;

        self.flush_events(sink);

        if self.ctx.config.poll_interval_ms > 0 {
            hw.delay_ms(self.ctx.config.poll_interval_ms);
        }
    }

    /// Start, then loop forever.  There is no terminal state.
    pub fn run(&mut self, hw: &mut H, sink: &mut impl EventSink) -> ! {
        self.start(hw, sink);
        info!("Entering control loop");
        loop {
            self.tick(hw, sink);
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn mode(&self) -> Mode {
        self.fsm.current_mode()
    }

    /// Stored baseline, `None` before the first successful calibration.
    pub fn baseline(&self) -> Option<f32> {
        self.ctx.baseline
    }

    pub fn calibrate_phase(&self) -> CalibratePhase {
        self.ctx.phase
    }

    /// Total control ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    // ── Internal ──────────────────────────────────────────────

    fn flush_events(&mut self, sink: &mut impl EventSink) {
        for event in self.ctx.take_events() {
            sink.emit(&event);
        }
    }
}
