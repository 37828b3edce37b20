//! GPIO drivers and one-shot hardware initialisation.

pub mod button;
#[cfg(all(feature = "espidf", target_os = "espidf"))]
pub mod hw_init;
pub mod signal_heads;
