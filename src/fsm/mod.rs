//! Function-pointer finite state machine engine for the signal phases.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  PhaseTable                                                       │
//! │  ┌──────────────────────┬──────────┬──────────┬─────────────────┐ │
//! │  │ Phase                │ on_enter │ on_exit  │ on_update       │ │
//! │  ├──────────────────────┼──────────┼──────────┼─────────────────┤ │
//! │  │ VehicleGreen         │ fn(ctx)  │ -        │ fn(ctx)->Option │ │
//! │  │ VehicleYellowToRed   │ fn(ctx)  │ -        │ fn(ctx)->Option │ │
//! │  │ VehicleRed           │ fn(ctx)  │ fn(ctx)  │ fn(ctx)->Option │ │
//! │  │ RedToGreenTransition │ fn(ctx)  │ -        │ fn(ctx)->Option │ │
//! │  └──────────────────────┴──────────┴──────────┴─────────────────┘ │
//! └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each tick the engine calls `on_update` for the **current** phase.
//! If it returns `Some(next)`, the engine runs `on_exit` for the current
//! phase, stamps the entry time, then runs `on_enter` for the next one.
//! At most one transition happens per tick.  The caller sets
//! `ctx.now_ms` before every tick.

pub mod context;
pub mod states;

use context::FsmContext;
use log::debug;

// ---------------------------------------------------------------------------
// Phase identity
// ---------------------------------------------------------------------------

/// The four phases of the signal cycle.
/// Must stay in sync with the table built in [`states::build_phase_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Phase {
    VehicleGreen = 0,
    VehicleYellowToRed = 1,
    VehicleRed = 2,
    RedToGreenTransition = 3,
}

impl Phase {
    /// Total number of phases, used to size the table array.
    pub const COUNT: usize = 4;

    /// Phases in cycle order, starting from the power-on phase.
    pub const CYCLE: [Self; Self::COUNT] = [
        Self::VehicleGreen,
        Self::VehicleYellowToRed,
        Self::VehicleRed,
        Self::RedToGreenTransition,
    ];

    /// The phase that always follows this one.
    pub const fn next(self) -> Self {
        match self {
            Self::VehicleGreen => Self::VehicleYellowToRed,
            Self::VehicleYellowToRed => Self::VehicleRed,
            Self::VehicleRed => Self::RedToGreenTransition,
            Self::RedToGreenTransition => Self::VehicleGreen,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::VehicleGreen => "VehicleGreen",
            Self::VehicleYellowToRed => "VehicleYellowToRed",
            Self::VehicleRed => "VehicleRed",
            Self::RedToGreenTransition => "RedToGreenTransition",
        }
    }
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for `on_enter` and `on_exit` actions.
pub type PhaseActionFn = fn(&mut FsmContext);

/// Signature for the per-tick update handler.
/// Returns `Some(next)` to trigger a transition, or `None` to stay.
pub type PhaseUpdateFn = fn(&mut FsmContext) -> Option<Phase>;

// ---------------------------------------------------------------------------
// Phase descriptor (one row in the table)
// ---------------------------------------------------------------------------

/// Static descriptor for a single phase.
pub struct PhaseDescriptor {
    pub phase: Phase,
    pub on_enter: PhaseActionFn,
    pub on_exit: Option<PhaseActionFn>,
    pub on_update: PhaseUpdateFn,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

pub struct Fsm {
    /// Fixed-size table indexed by `Phase as usize`.
    table: [PhaseDescriptor; Phase::COUNT],
    current: Phase,
    /// Completed transitions since start (wraps).
    transitions: u32,
}

impl Fsm {
    pub fn new(table: [PhaseDescriptor; Phase::COUNT], initial: Phase) -> Self {
        Self {
            table,
            current: initial,
            transitions: 0,
        }
    }

    /// Enter the starting phase at `ctx.now_ms`.
    /// Call once after construction, before the first `tick()`.
    pub fn start(&mut self, ctx: &mut FsmContext) {
        debug!("FSM starting in phase: {}", self.current.name());
        ctx.phase_entered_ms = ctx.now_ms;
        (self.descriptor(self.current).on_enter)(ctx);
    }

    /// Evaluate the current phase's exit condition once.
    /// Returns the new phase if a transition happened.
    pub fn tick(&mut self, ctx: &mut FsmContext) -> Option<Phase> {
        let next = (self.descriptor(self.current).on_update)(ctx)?;
        self.transition(next, ctx);
        Some(next)
    }

    pub fn current_phase(&self) -> Phase {
        self.current
    }

    pub fn transitions(&self) -> u32 {
        self.transitions
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn descriptor(&self, phase: Phase) -> &PhaseDescriptor {
        let d = &self.table[phase as usize];
        debug_assert_eq!(d.phase, phase, "phase table out of order");
        d
    }

    fn transition(&mut self, next: Phase, ctx: &mut FsmContext) {
        debug!(
            "FSM transition: {} -> {} after {} ms",
            self.current.name(),
            next.name(),
            ctx.ms_in_phase()
        );

        if let Some(exit) = self.descriptor(self.current).on_exit {
            exit(ctx);
        }

        self.current = next;
        self.transitions = self.transitions.wrapping_add(1);
        ctx.phase_entered_ms = ctx.now_ms;

        (self.descriptor(next).on_enter)(ctx);
    }
}
