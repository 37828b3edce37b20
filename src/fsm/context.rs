//! Shared mutable context threaded through every phase handler.
//!
//! `FsmContext` holds the clock reading for the current tick, the phase
//! entry timestamp, pedestrian-request bookkeeping and the light outputs.
//! Handlers read and write it; nothing else in the firmware mutates it.

use super::Phase;

// ---------------------------------------------------------------------------
// Light outputs (written on phase entry; consumed by the signal port)
// ---------------------------------------------------------------------------

/// Vehicle signal head lamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VehicleLights {
    pub red: bool,
    pub yellow: bool,
    pub green: bool,
}

impl VehicleLights {
    pub const RED: Self = Self { red: true, yellow: false, green: false };
    pub const YELLOW: Self = Self { red: false, yellow: true, green: false };
    pub const GREEN: Self = Self { red: false, yellow: false, green: true };

    /// At most one lamp lit.
    pub fn is_exclusive(&self) -> bool {
        u8::from(self.red) + u8::from(self.yellow) + u8::from(self.green) <= 1
    }
}

/// Pedestrian signal head lamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PedestrianLights {
    /// "Don't walk".
    pub red: bool,
    /// "Walk".
    pub green: bool,
}

impl PedestrianLights {
    pub const DONT_WALK: Self = Self { red: true, green: false };
    pub const WALK: Self = Self { red: false, green: true };

    /// At most one lamp lit.
    pub fn is_exclusive(&self) -> bool {
        !(self.red && self.green)
    }
}

/// Every lamp command at the intersection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LightOutputs {
    pub vehicle: VehicleLights,
    pub pedestrian: PedestrianLights,
}

impl LightOutputs {
    /// Lamps for `phase`.  `walk_active` only matters during vehicle red.
    pub fn for_phase(phase: Phase, walk_active: bool) -> Self {
        match phase {
            Phase::VehicleGreen => Self {
                vehicle: VehicleLights::GREEN,
                pedestrian: PedestrianLights::DONT_WALK,
            },
            Phase::VehicleYellowToRed | Phase::RedToGreenTransition => Self {
                vehicle: VehicleLights::YELLOW,
                pedestrian: PedestrianLights::DONT_WALK,
            },
            Phase::VehicleRed => Self {
                vehicle: VehicleLights::RED,
                pedestrian: if walk_active {
                    PedestrianLights::WALK
                } else {
                    PedestrianLights::DONT_WALK
                },
            },
        }
    }

    /// Both heads exclusive, and "walk" only while vehicles see red.
    pub fn is_safe(&self) -> bool {
        self.vehicle.is_exclusive()
            && self.pedestrian.is_exclusive()
            && (!self.pedestrian.green || self.vehicle.red)
    }
}

// ---------------------------------------------------------------------------
// Pedestrian request
// ---------------------------------------------------------------------------

/// Call-button bookkeeping.
///
/// `requested` is latched by a press and only honoured when vehicle red is
/// next entered; `active` is true for the duration of the walk interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PedestrianRequest {
    pub requested: bool,
    pub active: bool,
    pub walk_started_ms: u32,
}

impl PedestrianRequest {
    /// Record a press.  Returns `false` if a walk is already being served.
    pub fn register_press(&mut self) -> bool {
        if self.active {
            return false;
        }
        self.requested = true;
        true
    }

    /// Start the walk if one is pending.  Returns `true` if it started.
    pub fn try_activate(&mut self, now_ms: u32) -> bool {
        if !self.requested || self.active {
            return false;
        }
        self.active = true;
        self.walk_started_ms = now_ms;
        true
    }

    /// End the walk and clear the request.
    pub fn complete(&mut self) {
        self.active = false;
        self.requested = false;
    }

    /// True when a press is waiting for the next vehicle red.
    pub fn is_pending(&self) -> bool {
        self.requested && !self.active
    }
}

// ---------------------------------------------------------------------------
// FsmContext
// ---------------------------------------------------------------------------

/// The shared context passed to every phase handler function.
pub struct FsmContext {
    // -- Timing --
    /// Clock reading for the tick being processed.
    pub now_ms: u32,
    /// Clock reading when the current phase was entered.
    pub phase_entered_ms: u32,

    // -- Pedestrian --
    pub pedestrian: PedestrianRequest,

    // -- Outputs --
    /// Lamp commands; only rewritten by phase entry (and walk completion).
    pub lights: LightOutputs,
}

impl FsmContext {
    pub fn new(now_ms: u32) -> Self {
        Self {
            now_ms,
            phase_entered_ms: now_ms,
            pedestrian: PedestrianRequest::default(),
            lights: LightOutputs::default(),
        }
    }

    /// Milliseconds since the current phase was entered (wrap-safe).
    pub fn ms_in_phase(&self) -> u32 {
        self.now_ms.wrapping_sub(self.phase_entered_ms)
    }

    /// Milliseconds since the walk interval started (wrap-safe).
    pub fn ms_walking(&self) -> u32 {
        self.now_ms.wrapping_sub(self.pedestrian.walk_started_ms)
    }
}
