//! Fuzz target: `SignalController`
//!
//! Interprets the input as a stream of (button level, elapsed ms) samples
//! and verifies after every tick:
//! - No panics, including across clock wraparound
//! - Lamps are always safe (one lamp per head, walk only on vehicle red)
//! - Phase changes always follow the fixed cycle
//!
//! cargo fuzz run fuzz_signal_controller

#![no_main]

use crosswalk::app::events::AppEvent;
use crosswalk::app::ports::EventSink;
use crosswalk::app::service::SignalController;
use crosswalk::config::{ButtonPolarity, SignalConfig};
use crosswalk::fsm::Phase;
use libfuzzer_sys::fuzz_target;

struct CycleCheck {
    expected_from: Phase,
}

impl EventSink for CycleCheck {
    fn emit(&mut self, event: &AppEvent) {
        if let AppEvent::PhaseChanged { from, to, .. } = event {
            assert_eq!(*from, self.expected_from);
            assert_eq!(*to, from.next());
            self.expected_from = *to;
        }
    }
}

fuzz_target!(|data: &[u8]| {
    let Some((&head, samples)) = data.split_first() else {
        return;
    };

    let config = SignalConfig {
        button_polarity: ButtonPolarity::from_button_to_ground(head & 1 != 0),
        ..SignalConfig::default()
    };
    // Start close enough to the wrap point that long inputs cross it.
    let mut now = u32::MAX - u32::from(head) * 1_000;
    let mut controller = SignalController::new(&config, now);
    let mut sink = CycleCheck {
        expected_from: Phase::VehicleGreen,
    };

    for &byte in samples {
        // Low bit is the pin level, the rest is elapsed time in 8 ms units.
        let level = byte & 1 != 0;
        now = now.wrapping_add(u32::from(byte >> 1) * 8);
        let lights = controller.tick(level, now);
        assert!(lights.is_safe(), "unsafe lamps: {:?}", lights);
        controller.drain_events(&mut sink);
    }
});
