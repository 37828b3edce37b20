//! Concrete phase handler functions and table builder.
//!
//! ```text
//!  VEHICLE GREEN ──[12 s]──▶ YELLOW TO RED ──[2 s]──▶ VEHICLE RED
//!        ▲                                                 │
//!        │                              [walk done 10 s] or [2 s, no walk]
//!        │                                                 ▼
//!        └──────────────[2 s]────────── RED TO GREEN ◀─────┘
//! ```
//!
//! A pending pedestrian request is only looked at when vehicle red is
//! entered; a press that arrives later in the same red phase waits for
//! the next cycle.

use super::context::{FsmContext, LightOutputs, PedestrianLights};
use super::{Phase, PhaseDescriptor};
use crate::config::{
    PEDESTRIAN_WALK_MS, RED_TO_GREEN_MS, VEHICLE_GREEN_MS, VEHICLE_RED_MIN_MS, VEHICLE_YELLOW_MS,
};

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static phase table.  Called once at startup.
pub fn build_phase_table() -> [PhaseDescriptor; Phase::COUNT] {
    [
        PhaseDescriptor {
            phase: Phase::VehicleGreen,
            on_enter: vehicle_green_enter,
            on_exit: None,
            on_update: vehicle_green_update,
        },
        PhaseDescriptor {
            phase: Phase::VehicleYellowToRed,
            on_enter: yellow_to_red_enter,
            on_exit: None,
            on_update: yellow_to_red_update,
        },
        PhaseDescriptor {
            phase: Phase::VehicleRed,
            on_enter: vehicle_red_enter,
            on_exit: Some(vehicle_red_exit),
            on_update: vehicle_red_update,
        },
        PhaseDescriptor {
            phase: Phase::RedToGreenTransition,
            on_enter: red_to_green_enter,
            on_exit: None,
            on_update: red_to_green_update,
        },
    ]
}

/// Shared exit test for the purely timed phases.
fn after(ctx: &FsmContext, duration_ms: u32, next: Phase) -> Option<Phase> {
    (ctx.ms_in_phase() >= duration_ms).then_some(next)
}

// ═══════════════════════════════════════════════════════════════════════════
//  VEHICLE GREEN
// ═══════════════════════════════════════════════════════════════════════════

fn vehicle_green_enter(ctx: &mut FsmContext) {
    ctx.lights = LightOutputs::for_phase(Phase::VehicleGreen, false);
}

fn vehicle_green_update(ctx: &mut FsmContext) -> Option<Phase> {
    after(ctx, VEHICLE_GREEN_MS, Phase::VehicleYellowToRed)
}

// ═══════════════════════════════════════════════════════════════════════════
//  VEHICLE YELLOW (green → red)
// ═══════════════════════════════════════════════════════════════════════════

fn yellow_to_red_enter(ctx: &mut FsmContext) {
    ctx.lights = LightOutputs::for_phase(Phase::VehicleYellowToRed, false);
}

fn yellow_to_red_update(ctx: &mut FsmContext) -> Option<Phase> {
    after(ctx, VEHICLE_YELLOW_MS, Phase::VehicleRed)
}

// ═══════════════════════════════════════════════════════════════════════════
//  VEHICLE RED — the only phase that can grant a walk
// ═══════════════════════════════════════════════════════════════════════════

fn vehicle_red_enter(ctx: &mut FsmContext) {
    let now = ctx.now_ms;
    let walking = ctx.pedestrian.try_activate(now);
    ctx.lights = LightOutputs::for_phase(Phase::VehicleRed, walking);
}

fn vehicle_red_update(ctx: &mut FsmContext) -> Option<Phase> {
    if ctx.pedestrian.active {
        (ctx.ms_walking() >= PEDESTRIAN_WALK_MS).then_some(Phase::RedToGreenTransition)
    } else {
        after(ctx, VEHICLE_RED_MIN_MS, Phase::RedToGreenTransition)
    }
}

fn vehicle_red_exit(ctx: &mut FsmContext) {
    if ctx.pedestrian.active {
        ctx.pedestrian.complete();
        ctx.lights.pedestrian = PedestrianLights::DONT_WALK;
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  VEHICLE YELLOW (red → green)
// ═══════════════════════════════════════════════════════════════════════════

fn red_to_green_enter(ctx: &mut FsmContext) {
    ctx.lights = LightOutputs::for_phase(Phase::RedToGreenTransition, false);
}

fn red_to_green_update(ctx: &mut FsmContext) -> Option<Phase> {
    after(ctx, RED_TO_GREEN_MS, Phase::VehicleGreen)
}
