//! Crosswalk signal controller library.
//!
//! Exposes the pure-logic modules for integration testing and fuzzing.
//! ESP-IDF code is compiled only when the `espidf` feature is enabled on
//! the espidf target; every other build gets the host fallbacks.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod drivers;
pub mod error;
pub mod fsm;
pub mod pins;
