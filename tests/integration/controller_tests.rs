//! Port-level behaviour of `SignalController::step`.

use crosswalk::app::events::AppEvent;
use crosswalk::config::{ButtonPolarity, SignalConfig};
use crosswalk::fsm::Phase;
use crosswalk::fsm::context::LightOutputs;

use crate::mock_hw::{Rig, TICK_MS};

#[test]
fn start_writes_initial_lamps_once() {
    let rig = Rig::with_defaults();
    assert_eq!(
        rig.hw.applied,
        vec![LightOutputs::for_phase(Phase::VehicleGreen, false)]
    );
    assert_eq!(
        rig.sink.events,
        vec![AppEvent::Started {
            phase: Phase::VehicleGreen,
            at_ms: 0
        }]
    );
}

#[test]
fn lamps_written_only_on_phase_entry() {
    let mut rig = Rig::with_defaults();
    rig.run_for(11_990);
    assert_eq!(rig.hw.applied.len(), 1);

    rig.run_for(TICK_MS);
    assert_eq!(rig.hw.applied.len(), 2);
    assert_eq!(rig.controller.phase(), Phase::VehicleYellowToRed);
}

#[test]
fn press_during_green_leaves_lamps_alone() {
    let mut rig = Rig::with_defaults();
    rig.run_for(1_000);
    rig.press(200);
    rig.run_for(1_000);

    assert_eq!(rig.hw.applied.len(), 1);
    assert_eq!(rig.controller.phase(), Phase::VehicleGreen);
    assert!(rig.controller.pedestrian().requested);
}

#[test]
fn contact_bounce_is_rejected() {
    let mut rig = Rig::with_defaults();
    // 20 ms high, 20 ms low, for half a second.
    for _ in 0..12 {
        rig.hw.button_level = true;
        rig.run_for(2 * TICK_MS);
        rig.hw.button_level = false;
        rig.run_for(2 * TICK_MS);
    }
    assert!(!rig.controller.pedestrian().requested);
    assert!(
        !rig.sink
            .events
            .iter()
            .any(|e| matches!(e, AppEvent::ButtonPressed { .. }))
    );
}

#[test]
fn short_press_below_debounce_is_rejected() {
    let mut rig = Rig::with_defaults();
    rig.press(40);
    rig.run_for(1_000);
    assert!(!rig.controller.pedestrian().requested);
}

#[test]
fn active_low_button_through_ports() {
    let config = SignalConfig {
        button_polarity: ButtonPolarity::ActiveLow,
        ..SignalConfig::default()
    };
    let mut rig = Rig::new(&config, 0);
    rig.hw.button_level = true;
    rig.run_for(1_000);
    assert!(!rig.controller.pedestrian().requested);

    rig.hw.button_level = false;
    rig.run_for(100);
    assert!(rig.controller.pedestrian().requested);
}

#[test]
fn draining_every_step_drops_nothing() {
    let mut rig = Rig::with_defaults();
    for _ in 0..5 {
        rig.press(100);
        rig.run_for(30_000);
    }
    assert_eq!(rig.controller.dropped_events(), 0);
}

#[test]
fn outputs_always_safe() {
    let mut rig = Rig::with_defaults();
    for _ in 0..3 {
        rig.press(60);
        rig.run_for(25_000);
    }
    assert!(rig.hw.applied.iter().all(LightOutputs::is_safe));
    assert!(
        rig.hw
            .applied
            .windows(2)
            .all(|w| w[0] != w[1])
    );
}

#[test]
fn rejected_lamp_write_is_retried_on_next_poll() {
    let mut rig = Rig::with_defaults();
    rig.run_for(11_990);

    rig.hw.fail_writes = 1;
    rig.run_for(TICK_MS);
    assert_eq!(rig.controller.phase(), Phase::VehicleYellowToRed);
    assert_eq!(rig.hw.applied.len(), 1);

    rig.run_for(TICK_MS);
    assert_eq!(
        rig.hw.last_applied(),
        Some(&LightOutputs::for_phase(Phase::VehicleYellowToRed, false))
    );
    rig.run_for(1_000);
    assert_eq!(rig.hw.applied.len(), 2);
}
