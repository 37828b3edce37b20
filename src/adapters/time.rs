//! ESP32 time adapter.
//!
//! Provides the monotonic millisecond clock for the signal controller.
//!
//! - **`espidf` feature on the espidf target**: wraps `esp_timer_get_time()`
//!   from the ESP-IDF high-resolution timer (microsecond precision, monotonic).
//! - **otherwise**: uses `std::time::Instant` for host-side simulation.

use crate::app::ports::ClockPort;

/// Time adapter for the ESP32 platform.
pub struct Esp32TimeAdapter {
    #[cfg(not(all(feature = "espidf", target_os = "espidf")))]
    start: std::time::Instant,
}

impl Default for Esp32TimeAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl Esp32TimeAdapter {
    pub fn new() -> Self {
        Self {
            #[cfg(not(all(feature = "espidf", target_os = "espidf")))]
            start: std::time::Instant::now(),
        }
    }

    /// Microseconds since boot (monotonic).
    #[cfg(all(feature = "espidf", target_os = "espidf"))]
    pub fn uptime_us(&self) -> u64 {
        // SAFETY: esp_timer_get_time only reads the system timer.
        (unsafe { esp_idf_svc::sys::esp_timer_get_time() }) as u64
    }

    /// Microseconds since adapter creation (monotonic).
    #[cfg(not(all(feature = "espidf", target_os = "espidf")))]
    pub fn uptime_us(&self) -> u64 {
        self.start.elapsed().as_micros() as u64
    }
}

impl ClockPort for Esp32TimeAdapter {
    /// Truncated to u32, wrapping every ~49.7 days; consumers subtract
    /// with `wrapping_sub`.
    fn now_ms(&self) -> u32 {
        (self.uptime_us() / 1000) as u32
    }
}
