//! Hardware adapter — bridges the GPIO drivers to the domain port traits.
//!
//! Owns the call-button driver and the signal heads, exposing them through
//! [`ButtonPort`] and [`SignalPort`].  Generic over the `embedded-hal` pin
//! types, so the same adapter runs on ESP-IDF pin drivers and on the
//! in-memory pins used by host tests.

use embedded_hal::digital::{InputPin, OutputPin};
use log::error;

use crate::app::ports::{ButtonPort, SignalPort};
use crate::drivers::button::ButtonDriver;
use crate::drivers::signal_heads::SignalHeads;
use crate::error::GpioError;
use crate::fsm::context::LightOutputs;

/// Concrete adapter that combines all intersection I/O behind port traits.
pub struct HardwareAdapter<I, O> {
    button: ButtonDriver<I>,
    heads: SignalHeads<O>,
    write_failures: u32,
}

impl<I: InputPin, O: OutputPin> HardwareAdapter<I, O> {
    pub fn new(button: ButtonDriver<I>, heads: SignalHeads<O>) -> Self {
        Self {
            button,
            heads,
            write_failures: 0,
        }
    }

    /// Lamps currently lit, per the last write to each pin.
    pub fn lamps(&self) -> LightOutputs {
        self.heads.current()
    }

    /// Lamp writes that failed since boot.
    pub fn write_failures(&self) -> u32 {
        self.write_failures
    }
}

// ── ButtonPort implementation ─────────────────────────────────

impl<I: InputPin, O: OutputPin> ButtonPort for HardwareAdapter<I, O> {
    fn read_button_raw(&mut self) -> bool {
        self.button.read_raw()
    }
}

// ── SignalPort implementation ─────────────────────────────────

impl<I: InputPin, O: OutputPin> SignalPort for HardwareAdapter<I, O> {
    fn apply(&mut self, lights: &LightOutputs) -> Result<(), GpioError> {
        self.heads.set(lights).inspect_err(|e| {
            self.write_failures = self.write_failures.wrapping_add(1);
            error!(
                "Signal heads: {} (requested {:?}, lit {:?})",
                e,
                lights,
                self.heads.current()
            );
        })
    }
}
