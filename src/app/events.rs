//! Outbound application events.
//!
//! The [`SignalController`](super::service::SignalController) queues these
//! and hands them to an [`EventSink`](super::ports::EventSink).  None of
//! them is needed for correct signal operation.

use crate::fsm::Phase;
use crate::fsm::context::LightOutputs;

/// Structured events emitted by the signal core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The controller entered its initial phase.
    Started { phase: Phase, at_ms: u32 },

    /// A debounced call-button press.  `queued` is false when a walk was
    /// already in progress and the press changed nothing.
    ButtonPressed { at_ms: u32, queued: bool },

    /// The signal moved to the next phase.
    PhaseChanged { from: Phase, to: Phase, at_ms: u32 },

    /// The pedestrian walk lamp came on.
    WalkStarted { at_ms: u32 },

    /// The walk interval elapsed and the request was cleared.
    WalkFinished { at_ms: u32 },

    /// Periodic status snapshot.
    Status(SignalStatus),
}

/// A point-in-time view of the controller suitable for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalStatus {
    pub phase: Phase,
    pub ms_in_phase: u32,
    pub pedestrian_requested: bool,
    pub walk_active: bool,
    pub lights: LightOutputs,
}
