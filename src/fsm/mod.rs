//! Function-pointer finite state machine engine.
//!
//! Classic embedded FSM pattern ported to Rust:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  StateTable<H>                                               │
//! │  ┌───────────┬────────────┬────────────┬───────────────────┐ │
//! │  │ Mode      │ on_enter   │ on_exit    │ on_update         │ │
//! │  ├───────────┼────────────┼────────────┼───────────────────┤ │
//! │  │ Idle      │ fn(ctx,hw) │ —          │ fn(ctx,hw)->Opt<> │ │
//! │  │ Live      │ fn(ctx,hw) │ fn(ctx,hw) │ fn(ctx,hw)->Opt<> │ │
//! │  │ Calibrate │ fn(ctx,hw) │ fn(ctx,hw) │ fn(ctx,hw)->Opt<> │ │
//! │  └───────────┴────────────┴────────────┴───────────────────┘ │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each tick the engine calls `on_update` for the **current** mode.
//! If it returns `Some(next)`, the engine runs `on_exit` for the current
//! mode, then `on_enter` for the next, and updates the current pointer.
//! `Some(current)` is a real self-transition: exit and entry run again.
//! Handlers receive the shared [`StationContext`] and the hardware `H`
//! they render to.

pub mod context;
pub mod states;

use context::StationContext;
use log::info;

use crate::app::events::StationEvent;

// ---------------------------------------------------------------------------
// Mode identity
// ---------------------------------------------------------------------------

/// Operating modes.  Exactly one is active at a time.
/// Must stay in sync with the table built in [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Mode {
    Idle = 0,
    Live = 1,
    Calibrate = 2,
}

impl Mode {
    /// Total number of modes, used to size the table array.
    pub const COUNT: usize = 3;

    /// Convert a table index back to `Mode`.  Panics on out-of-range in
    /// debug builds; returns `Idle` in release.
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::Idle,
            1 => Self::Live,
            2 => Self::Calibrate,
            _ => {
                debug_assert!(false, "invalid mode index: {idx}");
                Self::Idle
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for `on_enter` and `on_exit` actions.
pub type StateActionFn<H> = fn(&mut StationContext, &mut H);

/// Signature for the per-tick update handler.
/// Returns `Some(next)` to trigger a transition, or `None` to stay.
pub type StateUpdateFn<H> = fn(&mut StationContext, &mut H) -> Option<Mode>;

// ---------------------------------------------------------------------------
// State descriptor (one row in the table)
// ---------------------------------------------------------------------------

/// Static descriptor for a single mode.
pub struct StateDescriptor<H> {
    pub id: Mode,
    pub name: &'static str,
    pub on_enter: Option<StateActionFn<H>>,
    pub on_exit: Option<StateActionFn<H>>,
    pub on_update: StateUpdateFn<H>,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

/// The finite state machine engine.
pub struct Fsm<H> {
    /// Fixed-size table indexed by `Mode as usize`.
    table: [StateDescriptor<H>; Mode::COUNT],
    current: usize,
}

impl<H> Fsm<H> {
    pub fn new(table: [StateDescriptor<H>; Mode::COUNT], initial: Mode) -> Self {
        debug_assert!(
            table.iter().enumerate().all(|(i, row)| row.id as usize == i),
            "state table rows out of order"
        );
        Self {
            table,
            current: initial as usize,
        }
    }

    /// Run the initial `on_enter` for the starting mode.
    /// Call once after construction, before the first `tick()`.
    pub fn start(&mut self, ctx: &mut StationContext, hw: &mut H) {
        info!("FSM starting in mode: {}", self.table[self.current].name);
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx, hw);
        }
    }

    /// Advance the FSM by one tick.
    pub fn tick(&mut self, ctx: &mut StationContext, hw: &mut H) {
        let next = (self.table[self.current].on_update)(ctx, hw);

        if let Some(next_mode) = next {
            self.transition(next_mode, ctx, hw);
        }
    }

    pub fn current_mode(&self) -> Mode {
        Mode::from_index(self.current)
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn transition(&mut self, next: Mode, ctx: &mut StationContext, hw: &mut H) {
        let from = self.current_mode();
        let next_idx = next as usize;

        info!(
            "FSM transition: {} -> {}",
            self.table[self.current].name, self.table[next_idx].name
        );

        if let Some(exit) = self.table[self.current].on_exit {
            exit(ctx, hw);
        }

        self.current = next_idx;

        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx, hw);
        }

        ctx.push_event(StationEvent::ModeChanged { from, to: next });
    }
}
