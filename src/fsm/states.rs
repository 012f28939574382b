//! Concrete mode handler functions and table builder.
//!
//! Each mode is defined by plain `fn` pointers: no closures, no dynamic
//! dispatch, no heap.  Handlers are generic over the hardware so the same
//! table runs against a board adapter or a test mock.
//!
//! ```text
//!            ┌──────[Idle]──────┐
//!            ▼                  │
//!  ──▶     IDLE ──[Live]──▶   LIVE
//!          │  ▲                 │  ▲
//!  [Calibrate] [Idle]   [Calibrate] [Live]
//!          ▼  │                 ▼  │
//!        CALIBRATE ◀────────────┘  │
//!          │  └────────────────────┘
//!          │
//!          ├─[SetBaseline]─▶ average 30 samples, store baseline
//!          └─[ShowDifference]─▶ difference sub-loop until Idle / Live
//! ```
//!
//! Codes not listed for a mode are ignored.  Idle pressed in Idle re-runs
//! the reset.

use log::{info, warn};

use super::context::{CalibratePhase, StationContext};
use super::{Mode, StateDescriptor};
use crate::app::events::StationEvent;
use crate::app::ports::StationHardware;
use crate::control::indicator::IndicatorDuty;
use crate::display::{self, Banner, Frame, RenderPath, Unit, encode};
use crate::drivers::button::ButtonCode;
use crate::drivers::led_patterns;
use crate::sensors;

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the state table for hardware `H`.  Called once at startup.
pub fn build_state_table<H: StationHardware>() -> [StateDescriptor<H>; Mode::COUNT] {
    [
        // Index 0: Idle
        StateDescriptor {
            id: Mode::Idle,
            name: "Idle",
            on_enter: Some(idle_enter::<H>),
            on_exit: None,
            on_update: idle_update::<H>,
        },
        // Index 1: Live
        StateDescriptor {
            id: Mode::Live,
            name: "Live",
            on_enter: Some(live_enter::<H>),
            on_exit: Some(live_exit::<H>),
            on_update: live_update::<H>,
        },
        // Index 2: Calibrate
        StateDescriptor {
            id: Mode::Calibrate,
            name: "Calibrate",
            on_enter: Some(calibrate_enter::<H>),
            on_exit: Some(calibrate_exit::<H>),
            on_update: calibrate_update::<H>,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  IDLE: reset state
// ═══════════════════════════════════════════════════════════════════════════

fn idle_enter<H: StationHardware>(ctx: &mut StationContext, hw: &mut H) {
    display::show(hw, &Frame::banner(Banner::Reset));
    led_patterns::reset_flash(hw, ctx.config.reset_flash_ms);
    display::clear(hw);

    ctx.baseline = None;
    ctx.phase = CalibratePhase::AwaitingAction;
    IndicatorDuty::OFF.apply(hw);
    info!("IDLE: baseline cleared, indicator off");
}

fn idle_update<H: StationHardware>(ctx: &mut StationContext, _hw: &mut H) -> Option<Mode> {
    match ctx.button? {
        ButtonCode::Idle => Some(Mode::Idle),
        ButtonCode::Live => Some(Mode::Live),
        ButtonCode::Calibrate => Some(Mode::Calibrate),
        ButtonCode::SetBaseline | ButtonCode::ShowDifference => None,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  LIVE: continuous temperature display
// ═══════════════════════════════════════════════════════════════════════════

fn live_enter<H: StationHardware>(ctx: &mut StationContext, hw: &mut H) {
    display::show(hw, &Frame::banner(Banner::Live));
    hw.delay_ms(ctx.config.banner_hold_ms);
    info!("LIVE: streaming readings");
}

fn live_update<H: StationHardware>(ctx: &mut StationContext, hw: &mut H) -> Option<Mode> {
    match ctx.button {
        Some(ButtonCode::Idle) => return Some(Mode::Idle),
        Some(ButtonCode::Calibrate) => return Some(Mode::Calibrate),
        _ => {}
    }

    let unit = if hw.read_switches() == ctx.config.fahrenheit_switch_word {
        Unit::Fahrenheit
    } else {
        Unit::Celsius
    };

    match hw.read_celsius() {
        Ok(celsius) => {
            let frame = encode(unit.convert_celsius(celsius), unit, RenderPath::Plain).frame();
            display::show(hw, &frame);
            ctx.push_event(StationEvent::LiveReading { celsius, unit });
        }
        Err(e) => {
            warn!("LIVE: no reading this tick: {}", e);
            display::clear(hw);
            ctx.push_event(StationEvent::ReadingUnavailable(e));
        }
    }
    None
}

fn live_exit<H: StationHardware>(_ctx: &mut StationContext, hw: &mut H) {
    display::clear(hw);
}

// ═══════════════════════════════════════════════════════════════════════════
//  CALIBRATE: baseline capture and difference display
// ═══════════════════════════════════════════════════════════════════════════

fn calibrate_enter<H: StationHardware>(ctx: &mut StationContext, hw: &mut H) {
    ctx.phase = CalibratePhase::AwaitingAction;
    display::show(hw, &Frame::banner(Banner::Average));
    match ctx.baseline {
        Some(b) => info!("CAL: waiting for action, baseline {:.4} C", b),
        None => info!("CAL: waiting for action, no baseline yet"),
    }
}

fn calibrate_update<H: StationHardware>(ctx: &mut StationContext, hw: &mut H) -> Option<Mode> {
    match (ctx.phase, ctx.button) {
        (_, Some(ButtonCode::Idle)) => Some(Mode::Idle),
        (_, Some(ButtonCode::Live)) => Some(Mode::Live),
        (CalibratePhase::AwaitingAction, Some(ButtonCode::SetBaseline)) => {
            set_baseline(ctx, hw);
            None
        }
        (CalibratePhase::AwaitingAction, Some(ButtonCode::ShowDifference)) => {
            begin_difference(ctx, hw);
            show_difference(ctx, hw);
            None
        }
        (CalibratePhase::ShowingDifference, _) => {
            show_difference(ctx, hw);
            None
        }
        (CalibratePhase::AwaitingAction, _) => None,
    }
}

fn calibrate_exit<H: StationHardware>(ctx: &mut StationContext, hw: &mut H) {
    if ctx.phase == CalibratePhase::ShowingDifference {
        info!("CAL: leaving difference display");
    }
    IndicatorDuty::OFF.apply(hw);
    display::clear(hw);
    ctx.phase = CalibratePhase::AwaitingAction;
}

// ── Calibrate sub-actions ─────────────────────────────────────────────────

/// Sweep, average, store, and show the new baseline.  A failed average
/// keeps the previous baseline.
fn set_baseline<H: StationHardware>(ctx: &mut StationContext, hw: &mut H) {
    display::show(hw, &Frame::banner(Banner::Average));
    led_patterns::sweep(hw, ctx.config.sweep_step_ms);
    hw.delay_ms(ctx.config.pre_sample_delay_ms);
    display::clear(hw);

    let samples = ctx.config.calibration_samples;
    match sensors::read_average(hw, samples, ctx.config.settle_delay_ms) {
        Ok(average) => {
            let frame = encode(average, Unit::Celsius, RenderPath::Plain).frame();
            display::show(hw, &frame);
            ctx.baseline = Some(average);
            ctx.push_event(StationEvent::BaselineSet(average));
            info!("CAL: baseline {:.4} C from {} samples", average, samples);
        }
        Err(e) => {
            warn!("CAL: baseline unchanged: {}", e);
            display::show(hw, &Frame::banner(Banner::Average));
            ctx.push_event(StationEvent::ReadingUnavailable(e));
        }
    }

    hw.delay_ms(ctx.config.calibrate_hold_ms);
}

fn begin_difference<H: StationHardware>(ctx: &mut StationContext, hw: &mut H) {
    display::show(hw, &Frame::banner(Banner::Difference));
    hw.delay_ms(ctx.config.banner_hold_ms);
    display::clear(hw);

    if ctx.baseline.is_none() {
        warn!("CAL: difference requested before calibration, using 0 C baseline");
    }
    ctx.phase = CalibratePhase::ShowingDifference;
}

/// One refresh of the difference display: `baseline - current`.
fn show_difference<H: StationHardware>(ctx: &mut StationContext, hw: &mut H) {
    match hw.read_celsius() {
        Ok(current) => {
            let stored = ctx.baseline_or_zero();
            let difference = stored - current;
            let frame = encode(difference, Unit::Celsius, RenderPath::Difference).frame();
            display::show(hw, &frame);
            ctx.indicator.drive(difference).apply(hw);
            ctx.push_event(StationEvent::Difference {
                stored,
                current,
                difference,
            });
        }
        Err(e) => {
            warn!("CAL: no reading this tick: {}", e);
            display::clear(hw);
            IndicatorDuty::OFF.apply(hw);
            ctx.push_event(StationEvent::ReadingUnavailable(e));
        }
    }
    hw.delay_ms(ctx.config.difference_refresh_ms);
}
