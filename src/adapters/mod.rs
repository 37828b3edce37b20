//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements           | Connects to              |
//! |-------------|----------------------|--------------------------|
//! | `hardware`  | ButtonPort           | call-button GPIO         |
//! |             | SignalPort           | lamp GPIOs               |
//! | `log_sink`  | EventSink            | Serial log output        |
//! | `time`      | ClockPort            | ESP32 system timer       |

pub mod hardware;
pub mod log_sink;
pub mod time;
