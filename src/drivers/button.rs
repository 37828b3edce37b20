//! Debounced pedestrian call button.
//!
//! ## Hardware
//!
//! Momentary switch on [`CALL_BUTTON_GPIO`](crate::pins::CALL_BUTTON_GPIO).
//! Either wiring works; [`ButtonPolarity`] says which level means pressed.
//! The main loop polls the pin once per tick, there is no ISR.
//!
//! ## Debounce
//!
//! | Step | Condition                                        | Effect                 |
//! |------|--------------------------------------------------|------------------------|
//! | 1    | raw level differs from the tracked raw level     | restart stability timer|
//! | 2    | raw level held >= 50ms and differs from stable   | adopt as stable level  |
//! | 3    | new stable level is the pressed level            | emit [`PressEdge`]     |
//!
//! Elapsed time is computed with wrapping subtraction, so the u32
//! millisecond clock may roll over (every ~49.7 days) without effect.

use embedded_hal::digital::InputPin;
use log::warn;

use crate::config::{ButtonPolarity, DEBOUNCE_MS};
use crate::error::GpioError;

/// A debounced transition into the pressed level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PressEdge {
    /// Tick time at which the press was confirmed.
    pub at_ms: u32,
}

/// Raw and filtered button levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonState {
    /// Level seen on the most recent sample.
    pub raw_level: bool,
    /// Debounced level.
    pub stable_level: bool,
    /// Time at which `raw_level` last changed.
    pub last_change_ms: u32,
}

// ---------------------------------------------------------------------------
// Debouncer — pure filter, no I/O
// ---------------------------------------------------------------------------

pub struct Debouncer {
    polarity: ButtonPolarity,
    state: ButtonState,
}

impl Debouncer {
    /// Start with both levels at the released level, so a button that is
    /// up at boot never produces an edge.
    pub fn new(polarity: ButtonPolarity, now_ms: u32) -> Self {
        let released = polarity.released_level();
        Self {
            polarity,
            state: ButtonState {
                raw_level: released,
                stable_level: released,
                last_change_ms: now_ms,
            },
        }
    }

    /// Feed one raw sample.  `now_ms` must not go backwards.
    pub fn sample(&mut self, raw_level: bool, now_ms: u32) -> Option<PressEdge> {
        let s = &mut self.state;

        if raw_level != s.raw_level {
            s.raw_level = raw_level;
            s.last_change_ms = now_ms;
        }

        if s.raw_level == s.stable_level || now_ms.wrapping_sub(s.last_change_ms) < DEBOUNCE_MS {
            return None;
        }

        s.stable_level = s.raw_level;
        (s.stable_level == self.polarity.pressed_level()).then_some(PressEdge { at_ms: now_ms })
    }

    pub fn state(&self) -> ButtonState {
        self.state
    }

    /// True while the debounced level is the pressed level.
    pub fn is_pressed(&self) -> bool {
        self.state.stable_level == self.polarity.pressed_level()
    }
}

// ---------------------------------------------------------------------------
// ButtonDriver — raw GPIO sampling
// ---------------------------------------------------------------------------

/// Reads the raw (undebounced) level of the call-button pin.
pub struct ButtonDriver<P> {
    pin: P,
    last_level: bool,
}

impl<P: InputPin> ButtonDriver<P> {
    /// `idle_level` is reported until the first successful read.
    pub fn new(pin: P, idle_level: bool) -> Self {
        Self {
            pin,
            last_level: idle_level,
        }
    }

    /// Single pin read, without fallback.
    pub fn try_read(&mut self) -> Result<bool, GpioError> {
        let level = self.pin.is_high().map_err(|_| GpioError::ReadFailed)?;
        self.last_level = level;
        Ok(level)
    }

    /// Current pin level.  A failed read repeats the previous level, which
    /// the debouncer treats as "no change".
    pub fn read_raw(&mut self) -> bool {
        self.try_read().unwrap_or_else(|e| {
            warn!("Button: {}, holding last level", e);
            self.last_level
        })
    }
}
