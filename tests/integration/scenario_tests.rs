//! End-to-end timing scenarios: a full controller driven through the
//! port traits with a manual clock.

use crosswalk::app::events::AppEvent;
use crosswalk::config::SignalConfig;
use crosswalk::fsm::Phase;
use crosswalk::fsm::context::LightOutputs;

use crate::mock_hw::Rig;

fn green() -> LightOutputs {
    LightOutputs::for_phase(Phase::VehicleGreen, false)
}

fn yellow() -> LightOutputs {
    LightOutputs::for_phase(Phase::VehicleYellowToRed, false)
}

fn red(walk: bool) -> LightOutputs {
    LightOutputs::for_phase(Phase::VehicleRed, walk)
}

// ── Press during green ────────────────────────────────────────

#[test]
fn press_during_green_grants_walk_at_next_red() {
    let mut rig = Rig::with_defaults();

    // Button goes down at t=5000 and is held for 100 ms.
    rig.run_for(4_990);
    rig.press(100);
    rig.run_for(26_000 - rig.now());

    assert_eq!(
        rig.sink.events,
        vec![
            AppEvent::Started {
                phase: Phase::VehicleGreen,
                at_ms: 0
            },
            AppEvent::ButtonPressed {
                at_ms: 5_050,
                queued: true
            },
            AppEvent::PhaseChanged {
                from: Phase::VehicleGreen,
                to: Phase::VehicleYellowToRed,
                at_ms: 12_000
            },
            AppEvent::PhaseChanged {
                from: Phase::VehicleYellowToRed,
                to: Phase::VehicleRed,
                at_ms: 14_000
            },
            AppEvent::WalkStarted { at_ms: 14_000 },
            AppEvent::WalkFinished { at_ms: 24_000 },
            AppEvent::PhaseChanged {
                from: Phase::VehicleRed,
                to: Phase::RedToGreenTransition,
                at_ms: 24_000
            },
            AppEvent::PhaseChanged {
                from: Phase::RedToGreenTransition,
                to: Phase::VehicleGreen,
                at_ms: 26_000
            },
        ]
    );
    assert_eq!(rig.hw.applied, vec![green(), yellow(), red(true), yellow(), green()]);
    assert!(!rig.controller.pedestrian().requested);
}

// ── No press ──────────────────────────────────────────────────

#[test]
fn unrequested_red_lasts_minimum_only() {
    let mut rig = Rig::with_defaults();
    rig.run_for(18_000);

    assert_eq!(
        rig.sink.phase_changes(),
        vec![
            (Phase::VehicleYellowToRed, 12_000),
            (Phase::VehicleRed, 14_000),
            (Phase::RedToGreenTransition, 16_000),
            (Phase::VehicleGreen, 18_000),
        ]
    );
    assert_eq!(rig.hw.applied, vec![green(), yellow(), red(false), yellow(), green()]);
    assert!(
        !rig.sink
            .events
            .iter()
            .any(|e| matches!(e, AppEvent::WalkStarted { .. }))
    );
}

// ── Press during an unrequested red ───────────────────────────

#[test]
fn press_during_red_waits_for_next_cycle() {
    let mut rig = Rig::with_defaults();

    // Red runs 14000..16000 without a walk; press lands at t=15000.
    rig.run_for(14_990);
    rig.press(100);
    assert_eq!(rig.controller.phase(), Phase::VehicleRed);
    assert!(rig.controller.pedestrian().requested);
    assert!(!rig.controller.pedestrian().active);
    assert_eq!(rig.hw.last_applied(), Some(&red(false)));

    rig.run_for(16_000 - rig.now());
    assert_eq!(rig.controller.phase(), Phase::RedToGreenTransition);
    assert!(rig.controller.pedestrian().requested);

    // Second cycle: green 18000, yellow 30000, red with walk 32000.
    rig.run_for(42_000 - rig.now());
    let walks: Vec<_> = rig
        .sink
        .events
        .iter()
        .filter(|e| matches!(e, AppEvent::WalkStarted { .. } | AppEvent::WalkFinished { .. }))
        .cloned()
        .collect();
    assert_eq!(
        walks,
        vec![
            AppEvent::WalkStarted { at_ms: 32_000 },
            AppEvent::WalkFinished { at_ms: 42_000 },
        ]
    );
}

// ── Press during an active walk ───────────────────────────────

#[test]
fn press_during_walk_is_ignored() {
    let mut rig = Rig::with_defaults();
    rig.run_for(4_990);
    rig.press(100);

    // Walk runs 14000..24000; press again at t=20000.
    rig.run_for(19_990 - rig.now());
    rig.press(100);
    assert!(rig.sink.events.contains(&AppEvent::ButtonPressed {
        at_ms: 20_050,
        queued: false
    }));

    // Next cycle: green 26000, yellow 38000, red 40000, no walk.
    rig.run_for(44_000 - rig.now());
    let changes = rig.sink.phase_changes();
    assert!(changes.contains(&(Phase::VehicleRed, 40_000)));
    assert!(changes.contains(&(Phase::RedToGreenTransition, 42_000)));
    let walk_count = rig
        .sink
        .events
        .iter()
        .filter(|e| matches!(e, AppEvent::WalkStarted { .. }))
        .count();
    assert_eq!(walk_count, 1);
}

// ── Held button ───────────────────────────────────────────────

#[test]
fn held_button_counts_once() {
    let mut rig = Rig::with_defaults();
    rig.run_for(990);
    // Held through green, yellow and the whole walk.
    rig.press(30_000);

    let presses = rig
        .sink
        .events
        .iter()
        .filter(|e| matches!(e, AppEvent::ButtonPressed { .. }))
        .count();
    assert_eq!(presses, 1);
}

// ── Clock wraparound ──────────────────────────────────────────

#[test]
fn cycle_timing_survives_clock_wrap() {
    let start = u32::MAX - 4_999;
    let mut rig = Rig::new(&SignalConfig::default(), start);

    rig.run_for(990);
    rig.press(100);
    rig.run_for(26_000 - 1_090);

    assert_eq!(
        rig.sink.phase_changes(),
        vec![
            (Phase::VehicleYellowToRed, start.wrapping_add(12_000)),
            (Phase::VehicleRed, start.wrapping_add(14_000)),
            (Phase::RedToGreenTransition, start.wrapping_add(24_000)),
            (Phase::VehicleGreen, start.wrapping_add(26_000)),
        ]
    );
    assert!(rig.sink.events.contains(&AppEvent::WalkStarted {
        at_ms: start.wrapping_add(14_000)
    }));
}
