//! Signal timing constants and runtime configuration.
//!
//! Phase durations are fixed at compile time; the cycle is the same on
//! every installation.  Only the wiring of the call button and the loop
//! pacing are runtime values, supplied when the controller is built.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Phase timing (milliseconds)
// ---------------------------------------------------------------------------

/// Vehicle green before the yellow warning starts.
pub const VEHICLE_GREEN_MS: u32 = 12_000;
/// Vehicle yellow on the way from green to red.
pub const VEHICLE_YELLOW_MS: u32 = 2_000;
/// Shortest vehicle red, used when no pedestrian is waiting.
pub const VEHICLE_RED_MIN_MS: u32 = 2_000;
/// Pedestrian walk interval granted during vehicle red.
pub const PEDESTRIAN_WALK_MS: u32 = 10_000;
/// Vehicle yellow on the way from red back to green.
pub const RED_TO_GREEN_MS: u32 = 2_000;

/// The raw button level must hold this long before it is believed.
pub const DEBOUNCE_MS: u32 = 50;

// ---------------------------------------------------------------------------
// Button wiring
// ---------------------------------------------------------------------------

/// Which logic level means "pressed" on the call-button input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonPolarity {
    /// Button shorts the pin to ground; input uses the internal pull-up.
    ActiveLow,
    /// Button shorts the pin to the supply; input uses the internal pull-down.
    ActiveHigh,
}

impl ButtonPolarity {
    /// Map the classic `BUTTON_TO_GND` wiring flag onto a polarity.
    pub const fn from_button_to_ground(button_to_ground: bool) -> Self {
        if button_to_ground {
            Self::ActiveLow
        } else {
            Self::ActiveHigh
        }
    }

    /// Raw level read while the button is held down.
    pub const fn pressed_level(self) -> bool {
        matches!(self, Self::ActiveHigh)
    }

    /// Raw level read while the button is released (the pull resistor level).
    pub const fn released_level(self) -> bool {
        !self.pressed_level()
    }
}

// ---------------------------------------------------------------------------
// SignalConfig
// ---------------------------------------------------------------------------

/// Runtime configuration for one intersection controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalConfig {
    /// Wiring of the pedestrian call button.
    pub button_polarity: ButtonPolarity,
    /// Main-loop polling period (milliseconds).
    pub poll_interval_ms: u32,
    /// Status line period (milliseconds); 0 disables status lines.
    pub status_interval_ms: u32,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            button_polarity: ButtonPolarity::ActiveHigh,
            poll_interval_ms: 5,
            status_interval_ms: 60_000,
        }
    }
}

impl SignalConfig {
    /// Parse a JSON override and validate it.  Missing fields take their
    /// default values.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|_| ConfigError::Malformed)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would break debouncing or flood the log.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed(
                "poll_interval_ms must be non-zero",
            ));
        }
        if self.poll_interval_ms >= DEBOUNCE_MS {
            return Err(ConfigError::ValidationFailed(
                "poll_interval_ms must be shorter than the debounce interval",
            ));
        }
        if self.status_interval_ms != 0 && self.status_interval_ms < self.poll_interval_ms {
            return Err(ConfigError::ValidationFailed(
                "status_interval_ms must be 0 or at least poll_interval_ms",
            ));
        }
        Ok(())
    }
}
