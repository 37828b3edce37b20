//! Signal controller — the hexagonal core.
//!
//! [`SignalController`] owns the debounce filter, the phase FSM and its
//! context.  It exposes a single per-tick entry point, [`tick`], plus a
//! convenience [`step`] that wires the ports around it.
//!
//! ```text
//!  ButtonPort ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!                 │     SignalController      │
//!   ClockPort ──▶ │  Debouncer · Phase FSM    │ ──▶ SignalPort
//!                 └──────────────────────────┘
//! ```
//!
//! Tick order is fixed: the button is sampled first, so a press confirmed
//! in the same tick as a phase timeout is already pending when the
//! transition runs.
//!
//! [`tick`]: SignalController::tick
//! [`step`]: SignalController::step

use heapless::Deque;
use log::debug;

use crate::config::SignalConfig;
use crate::drivers::button::{ButtonState, Debouncer};
use crate::fsm::context::{FsmContext, LightOutputs, PedestrianRequest};
use crate::fsm::states::build_phase_table;
use crate::fsm::{Fsm, Phase};

use super::events::{AppEvent, SignalStatus};
use super::ports::{ButtonPort, ClockPort, EventSink, SignalPort};

/// Events buffered between drains.  One tick produces at most three.
pub const EVENT_QUEUE_CAP: usize = 8;

// ───────────────────────────────────────────────────────────────
// SignalController
// ───────────────────────────────────────────────────────────────

pub struct SignalController {
    fsm: Fsm,
    ctx: FsmContext,
    debouncer: Debouncer,
    events: Deque<AppEvent, EVENT_QUEUE_CAP>,
    /// Lamps last written to a [`SignalPort`]; `None` before the first
    /// write and after a failed one.
    applied: Option<LightOutputs>,
    dropped_events: u32,
}

impl SignalController {
    /// Build the controller and enter vehicle green at `now_ms`.
    pub fn new(config: &SignalConfig, now_ms: u32) -> Self {
        let mut ctx = FsmContext::new(now_ms);
        let mut fsm = Fsm::new(build_phase_table(), Phase::VehicleGreen);
        fsm.start(&mut ctx);

        let mut controller = Self {
            fsm,
            ctx,
            debouncer: Debouncer::new(config.button_polarity, now_ms),
            events: Deque::new(),
            applied: None,
            dropped_events: 0,
        };
        controller.push_event(AppEvent::Started {
            phase: Phase::VehicleGreen,
            at_ms: now_ms,
        });
        controller
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one control cycle: debounce sample, then phase evaluation.
    /// Returns the lamp state after the tick.
    pub fn tick(&mut self, raw_input: bool, now_ms: u32) -> LightOutputs {
        self.ctx.now_ms = now_ms;

        if let Some(edge) = self.debouncer.sample(raw_input, now_ms) {
            let queued = self.ctx.pedestrian.register_press();
            self.push_event(AppEvent::ButtonPressed {
                at_ms: edge.at_ms,
                queued,
            });
        }

        let from = self.fsm.current_phase();
        let was_walking = self.ctx.pedestrian.active;

        if let Some(to) = self.fsm.tick(&mut self.ctx) {
            let walking = self.ctx.pedestrian.active;
            if was_walking && !walking {
                self.push_event(AppEvent::WalkFinished { at_ms: now_ms });
            }
            self.push_event(AppEvent::PhaseChanged {
                from,
                to,
                at_ms: now_ms,
            });
            if walking && !was_walking {
                self.push_event(AppEvent::WalkStarted { at_ms: now_ms });
            }
        }

        self.ctx.lights
    }

    /// Write the initial lamps and flush the start-up event.
    pub fn start(&mut self, signals: &mut impl SignalPort, sink: &mut impl EventSink) {
        self.apply_if_changed(signals);
        self.drain_events(sink);
    }

    /// Poll the ports once: read the button and clock, tick, write lamps
    /// if a phase entry changed them or the last write failed, and deliver
    /// queued events.
    pub fn step<H>(
        &mut self,
        hw: &mut H,
        clock: &impl ClockPort,
        sink: &mut impl EventSink,
    ) -> LightOutputs
    where
        H: ButtonPort + SignalPort,
    {
        let raw = hw.read_button_raw();
        let lights = self.tick(raw, clock.now_ms());
        self.apply_if_changed(hw);
        self.drain_events(sink);
        lights
    }

    /// Hand every queued event to `sink`, oldest first.
    pub fn drain_events(&mut self, sink: &mut impl EventSink) {
        while let Some(event) = self.events.pop_front() {
            sink.emit(&event);
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.fsm.current_phase()
    }

    pub fn lights(&self) -> LightOutputs {
        self.ctx.lights
    }

    pub fn pedestrian(&self) -> PedestrianRequest {
        self.ctx.pedestrian
    }

    pub fn button(&self) -> ButtonState {
        self.debouncer.state()
    }

    /// Milliseconds the current phase has lasted as of the last tick.
    pub fn ms_in_phase(&self) -> u32 {
        self.ctx.ms_in_phase()
    }

    /// Events discarded because nobody drained the queue.
    pub fn dropped_events(&self) -> u32 {
        self.dropped_events
    }

    pub fn status(&self) -> SignalStatus {
        SignalStatus {
            phase: self.phase(),
            ms_in_phase: self.ms_in_phase(),
            pedestrian_requested: self.ctx.pedestrian.requested,
            walk_active: self.ctx.pedestrian.active,
            lights: self.ctx.lights,
        }
    }

    // ── Internal ──────────────────────────────────────────────

    /// A failed write leaves `applied` unset so the next poll retries it.
    fn apply_if_changed(&mut self, signals: &mut impl SignalPort) {
        if self.applied == Some(self.ctx.lights) {
            return;
        }
        let lights = self.ctx.lights;
        self.applied = signals.apply(&lights).is_ok().then_some(lights);
    }

    /// Queue an event, dropping the oldest when full.
    fn push_event(&mut self, event: AppEvent) {
        if self.events.is_full() {
            self.events.pop_front();
            self.dropped_events = self.dropped_events.wrapping_add(1);
            debug!("event queue full, dropped oldest event");
        }
        let _ = self.events.push_back(event);
    }
}
