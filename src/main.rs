//! Crosswalk Firmware — Main Entry Point
//!
//! Hexagonal architecture around a polled, fixed-cycle signal controller.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter        LogEventSink       Esp32TimeAdapter    │
//! │  (Button+Signal)        (EventSink)        (ClockPort)         │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │            SignalController (pure logic)               │    │
//! │  │  Debouncer · Phase FSM                                 │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use log::{error, info, warn};

use crosswalk::adapters::log_sink::LogEventSink;
use crosswalk::adapters::time::Esp32TimeAdapter;
use crosswalk::app::events::AppEvent;
use crosswalk::app::ports::{ClockPort, EventSink};
use crosswalk::app::service::SignalController;
use crosswalk::config::SignalConfig;
use crosswalk::drivers::hw_init::init_signal_hardware;

/// Build-time JSON override, e.g. `{"button_polarity":"active_low"}`.
const CONFIG_JSON: Option<&str> = option_env!("CROSSWALK_CONFIG_JSON");

fn load_config() -> SignalConfig {
    let Some(json) = CONFIG_JSON else {
        return SignalConfig::default();
    };
    match SignalConfig::from_json(json) {
        Ok(config) => {
            info!("Config override applied: {:?}", config);
            config
        }
        Err(e) => {
            warn!("Config override rejected ({}), using defaults", e);
            SignalConfig::default()
        }
    }
}

fn main() -> Result<()> {
    // ── 1. Platform init ──────────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!(
        "Crosswalk v{} starting (phases: green {}s, yellow {}s, walk {}s)",
        env!("CARGO_PKG_VERSION"),
        crosswalk::config::VEHICLE_GREEN_MS / 1000,
        crosswalk::config::VEHICLE_YELLOW_MS / 1000,
        crosswalk::config::PEDESTRIAN_WALK_MS / 1000,
    );

    // ── 2. Configuration ──────────────────────────────────────
    let config = load_config();

    // ── 3. Hardware ───────────────────────────────────────────
    let mut hw = match init_signal_hardware(&config) {
        Ok(hw) => hw,
        Err(e) => {
            // Without lamps there is nothing safe to do.
            error!("GPIO init failed: {}, halting", e);
            #[allow(clippy::empty_loop)]
            loop {}
        }
    };

    // ── 4. Controller ─────────────────────────────────────────
    let clock = Esp32TimeAdapter::new();
    let mut sink = LogEventSink::new();
    let mut controller = SignalController::new(&config, clock.now_ms());
    controller.start(&mut hw, &mut sink);

    info!("System ready. Entering control loop.");

    // ── 5. Control loop ───────────────────────────────────────
    let poll = std::time::Duration::from_millis(u64::from(config.poll_interval_ms));
    let mut last_status_ms = clock.now_ms();

    loop {
        controller.step(&mut hw, &clock, &mut sink);

        if config.status_interval_ms > 0 {
            let now = clock.now_ms();
            if now.wrapping_sub(last_status_ms) >= config.status_interval_ms {
                last_status_ms = now;
                sink.emit(&AppEvent::Status(controller.status()));
                if hw.write_failures() > 0 || controller.dropped_events() > 0 {
                    warn!(
                        "Health | lamp write failures={} dropped events={}",
                        hw.write_failures(),
                        controller.dropped_events(),
                    );
                }
            }
        }

        std::thread::sleep(poll);
    }
}
