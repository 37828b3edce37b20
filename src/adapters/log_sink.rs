//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing one line per application event to
//! the ESP-IDF logger (UART console in production).

use log::info;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::fsm::context::LightOutputs;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

/// Compact lamp summary, e.g. `car=G ped=R`.
fn lamps(lights: &LightOutputs) -> (&'static str, &'static str) {
    let car = match (lights.vehicle.red, lights.vehicle.yellow, lights.vehicle.green) {
        (true, _, _) => "R",
        (_, true, _) => "Y",
        (_, _, true) => "G",
        _ => "-",
    };
    let ped = match (lights.pedestrian.red, lights.pedestrian.green) {
        (_, true) => "WALK",
        (true, _) => "R",
        _ => "-",
    };
    (car, ped)
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { phase, at_ms } => {
                info!("START | phase={:?} t={}ms", phase, at_ms);
            }
            AppEvent::ButtonPressed { at_ms, queued: true } => {
                info!("BTN | pedestrian requested t={}ms", at_ms);
            }
            AppEvent::ButtonPressed { at_ms, queued: false } => {
                info!("BTN | pedestrian press during walk, ignored t={}ms", at_ms);
            }
            AppEvent::PhaseChanged { from, to, at_ms } => {
                info!("PHASE | {:?} -> {:?} t={}ms", from, to, at_ms);
            }
            AppEvent::WalkStarted { at_ms } => {
                info!("WALK | started t={}ms", at_ms);
            }
            AppEvent::WalkFinished { at_ms } => {
                info!("WALK | finished t={}ms", at_ms);
            }
            AppEvent::Status(s) => {
                let (car, ped) = lamps(&s.lights);
                info!(
                    "STATUS | phase={:?} for {}ms | car={} ped={} | request={} walk={}",
                    s.phase, s.ms_in_phase, car, ped, s.pedestrian_requested, s.walk_active,
                );
            }
        }
    }
}
