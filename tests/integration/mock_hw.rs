//! Mock adapters for integration tests.
//!
//! Records every lamp write and event so tests can assert on the full
//! history without touching real GPIO registers.

use std::cell::Cell;

use crosswalk::app::events::AppEvent;
use crosswalk::app::ports::{ButtonPort, ClockPort, EventSink, SignalPort};
use crosswalk::error::GpioError;
use crosswalk::fsm::context::LightOutputs;

// ── MockSignalHardware ────────────────────────────────────────

/// Button level is set by the test; lamp writes are recorded.  The next
/// `fail_writes` writes are rejected without being recorded.
#[derive(Default)]
pub struct MockSignalHardware {
    pub button_level: bool,
    pub applied: Vec<LightOutputs>,
    pub fail_writes: u32,
}

#[allow(dead_code)]
impl MockSignalHardware {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_applied(&self) -> Option<&LightOutputs> {
        self.applied.last()
    }
}

impl ButtonPort for MockSignalHardware {
    fn read_button_raw(&mut self) -> bool {
        self.button_level
    }
}

impl SignalPort for MockSignalHardware {
    fn apply(&mut self, lights: &LightOutputs) -> Result<(), GpioError> {
        if self.fail_writes > 0 {
            self.fail_writes -= 1;
            return Err(GpioError::WriteFailed);
        }
        self.applied.push(*lights);
        Ok(())
    }
}

// ── ManualClock ───────────────────────────────────────────────

/// Clock advanced explicitly by the test.
pub struct ManualClock {
    now: Cell<u32>,
}

#[allow(dead_code)]
impl ManualClock {
    pub fn new(start_ms: u32) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    pub fn set(&self, ms: u32) {
        self.now.set(ms);
    }

    pub fn advance(&self, ms: u32) {
        self.now.set(self.now.get().wrapping_add(ms));
    }
}

impl ClockPort for ManualClock {
    fn now_ms(&self) -> u32 {
        self.now.get()
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&mut self) -> Vec<AppEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn phase_changes(&self) -> Vec<(crosswalk::fsm::Phase, u32)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::PhaseChanged { to, at_ms, .. } => Some((*to, *at_ms)),
                _ => None,
            })
            .collect()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Rig ───────────────────────────────────────────────────────

/// Poll period used by the rig, matching a typical firmware loop.
pub const TICK_MS: u32 = 10;

/// A controller wired to mock ports, driven in fixed ticks.
pub struct Rig {
    pub controller: crosswalk::app::service::SignalController,
    pub hw: MockSignalHardware,
    pub clock: ManualClock,
    pub sink: RecordingSink,
}

#[allow(dead_code)]
impl Rig {
    pub fn new(config: &crosswalk::config::SignalConfig, start_ms: u32) -> Self {
        let mut hw = MockSignalHardware::new();
        let mut sink = RecordingSink::new();
        let clock = ManualClock::new(start_ms);
        let mut controller = crosswalk::app::service::SignalController::new(config, start_ms);
        controller.start(&mut hw, &mut sink);
        Self {
            controller,
            hw,
            clock,
            sink,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(&crosswalk::config::SignalConfig::default(), 0)
    }

    /// Advance the clock in `TICK_MS` steps, polling once per step.
    pub fn run_for(&mut self, ms: u32) {
        for _ in 0..ms / TICK_MS {
            self.clock.advance(TICK_MS);
            self.controller
                .step(&mut self.hw, &self.clock, &mut self.sink);
        }
    }

    /// Hold the button down from the next tick for `hold_ms`, then release.
    pub fn press(&mut self, hold_ms: u32) {
        self.hw.button_level = true;
        self.run_for(hold_ms);
        self.hw.button_level = false;
    }

    pub fn now(&self) -> u32 {
        self.clock.now_ms()
    }
}
