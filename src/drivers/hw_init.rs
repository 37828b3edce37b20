//! One-shot GPIO initialisation for the intersection board.
//!
//! Claims the five lamp outputs and the call-button input listed in
//! [`pins`](crate::pins), configures the button pull to match the wiring,
//! and hands back a ready [`HardwareAdapter`].  Called once from `main()`
//! before the polling loop starts.

use esp_idf_hal::gpio::{AnyIOPin, AnyOutputPin, Input, Output, PinDriver, Pull};
use esp_idf_svc::sys::EspError;
use log::info;

use crate::adapters::hardware::HardwareAdapter;
use crate::config::{ButtonPolarity, SignalConfig};
use crate::drivers::button::ButtonDriver;
use crate::drivers::signal_heads::SignalHeads;
use crate::error::{GpioError, Result};
use crate::pins;

pub type ButtonPin = PinDriver<'static, AnyIOPin, Input>;
pub type LampPin = PinDriver<'static, AnyOutputPin, Output>;

/// The board's I/O behind the port traits.
pub type SignalHardware = HardwareAdapter<ButtonPin, LampPin>;

fn config_failed(e: EspError) -> GpioError {
    GpioError::ConfigFailed(e.code())
}

fn lamp(gpio: i32) -> core::result::Result<LampPin, GpioError> {
    // SAFETY: each lamp GPIO is claimed exactly once, here, at boot; the
    // `Peripherals` singleton is never taken, so no other driver owns it.
    let pin = unsafe { AnyOutputPin::new(gpio) };
    PinDriver::output(pin).map_err(config_failed)
}

/// Validate `config` and bring up every intersection GPIO.
pub fn init_signal_hardware(config: &SignalConfig) -> Result<SignalHardware> {
    config.validate()?;
    let polarity = config.button_polarity;

    let heads = SignalHeads::new(
        [
            lamp(pins::VEHICLE_RED_GPIO)?,
            lamp(pins::VEHICLE_YELLOW_GPIO)?,
            lamp(pins::VEHICLE_GREEN_GPIO)?,
        ],
        [
            lamp(pins::PEDESTRIAN_RED_GPIO)?,
            lamp(pins::PEDESTRIAN_GREEN_GPIO)?,
        ],
    )?;

    // SAFETY: as above, the button GPIO is claimed once at boot.
    let pin = unsafe { AnyIOPin::new(pins::CALL_BUTTON_GPIO) };
    let mut button = PinDriver::input(pin).map_err(config_failed)?;
    let pull = match polarity {
        ButtonPolarity::ActiveLow => Pull::Up,
        ButtonPolarity::ActiveHigh => Pull::Down,
    };
    button.set_pull(pull).map_err(config_failed)?;

    info!(
        "hw_init: lamps on GPIO {}/{}/{} + {}/{}, button GPIO {} ({:?}, pull {:?})",
        pins::VEHICLE_RED_GPIO,
        pins::VEHICLE_YELLOW_GPIO,
        pins::VEHICLE_GREEN_GPIO,
        pins::PEDESTRIAN_RED_GPIO,
        pins::PEDESTRIAN_GREEN_GPIO,
        pins::CALL_BUTTON_GPIO,
        polarity,
        pull,
    );

    Ok(HardwareAdapter::new(
        ButtonDriver::new(button, polarity.released_level()),
        heads,
    ))
}
