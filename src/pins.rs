//! GPIO assignments for the crosswalk controller board (ESP32 DevKit).
//!
//! Single source of truth: the hardware init code references this module
//! rather than hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Vehicle signal head
// ---------------------------------------------------------------------------

pub const VEHICLE_RED_GPIO: i32 = 23;
pub const VEHICLE_YELLOW_GPIO: i32 = 22;
pub const VEHICLE_GREEN_GPIO: i32 = 21;

// ---------------------------------------------------------------------------
// Pedestrian signal head
// ---------------------------------------------------------------------------

/// "Don't walk" lamp.
pub const PEDESTRIAN_RED_GPIO: i32 = 17;
/// "Walk" lamp.
pub const PEDESTRIAN_GREEN_GPIO: i32 = 16;

// ---------------------------------------------------------------------------
// Pedestrian call button
// ---------------------------------------------------------------------------

/// Momentary push-button.  Pull direction follows
/// [`ButtonPolarity`](crate::config::ButtonPolarity).
pub const CALL_BUTTON_GPIO: i32 = 13;
