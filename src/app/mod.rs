//! Application core — pure signal logic, zero I/O.
//!
//! The debounce filter and phase FSM are orchestrated by
//! [`service::SignalController`].  All interaction with hardware happens
//! through **port traits** defined in [`ports`], keeping this layer fully
//! testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
