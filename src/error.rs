//! Unified error types for the crosswalk firmware.
//!
//! The signal core itself cannot fail; these types cover the peripheral
//! layer (GPIO) and configuration loading.  All variants are `Copy` so
//! drivers can hand them up without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation outside the signal core funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Configuration is invalid or could not be parsed.
    Config(ConfigError),
    /// A GPIO operation failed.
    Gpio(GpioError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Gpio(e) => write!(f, "gpio: {e}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The override was not valid JSON for [`SignalConfig`](crate::config::SignalConfig).
    Malformed,
    /// A field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed => write!(f, "malformed config"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {msg}"),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// GPIO errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpioError {
    /// Pin configuration was rejected by the HAL (carries the ESP-IDF code).
    ConfigFailed(i32),
    /// Reading an input pin failed.
    ReadFailed,
    /// Driving an output pin failed.
    WriteFailed,
}

impl fmt::Display for GpioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigFailed(rc) => write!(f, "pin config failed (rc={rc})"),
            Self::ReadFailed => write!(f, "input read failed"),
            Self::WriteFailed => write!(f, "output write failed"),
        }
    }
}

impl From<GpioError> for Error {
    fn from(e: GpioError) -> Self {
        Self::Gpio(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
