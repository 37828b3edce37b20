//! Port traits — the hexagonal boundary between the signal core and the
//! outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ SignalController (domain)
//! ```
//!
//! Driven adapters (GPIO, clock, log) implement these traits.  The
//! [`SignalController`](super::service::SignalController) consumes them via
//! generics, so the core never touches hardware directly.

use crate::error::GpioError;
use crate::fsm::context::LightOutputs;

// ───────────────────────────────────────────────────────────────
// Button port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port for the pedestrian call button.
pub trait ButtonPort {
    /// Raw, undebounced pin level.
    fn read_button_raw(&mut self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Signal port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port for the lamp outputs.
pub trait SignalPort {
    /// Drive all five lamps to `lights`.  On error some lamps may already
    /// have been switched; the caller retries on its next poll.
    fn apply(&mut self, lights: &LightOutputs) -> Result<(), GpioError>;
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic millisecond clock.  Wraps at `u32::MAX`.
pub trait ClockPort {
    fn now_ms(&self) -> u32;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
