//! Vehicle and pedestrian signal head driver.
//!
//! Five active-high lamp outputs, written as one group.  Lamps that go
//! dark are switched before lamps that light up (break-before-make), so
//! two lamps of the same head are never lit at once, even for the few
//! microseconds between pin writes.

use embedded_hal::digital::{OutputPin, PinState};

use crate::error::GpioError;
use crate::fsm::context::{LightOutputs, PedestrianLights, VehicleLights};

pub struct SignalHeads<P> {
    /// Red, yellow, green.
    vehicle: [P; 3],
    /// Don't walk, walk.
    pedestrian: [P; 2],
    /// Level last written to each pin, in `vehicle` then `pedestrian` order.
    lit: [bool; 5],
}

impl<P: OutputPin> SignalHeads<P> {
    /// Takes ownership of the lamp pins and switches every lamp off.
    pub fn new(vehicle: [P; 3], pedestrian: [P; 2]) -> Result<Self, GpioError> {
        let mut heads = Self {
            vehicle,
            pedestrian,
            lit: [false; 5],
        };
        heads.set(&LightOutputs::default())?;
        Ok(heads)
    }

    /// Drive every lamp to `lights`.  On error the lamps written before the
    /// failure keep their new level and [`current`](Self::current) says so.
    pub fn set(&mut self, lights: &LightOutputs) -> Result<(), GpioError> {
        let levels = [
            lights.vehicle.red,
            lights.vehicle.yellow,
            lights.vehicle.green,
            lights.pedestrian.red,
            lights.pedestrian.green,
        ];

        for lit_pass in [false, true] {
            let pins = self.vehicle.iter_mut().chain(self.pedestrian.iter_mut());
            for ((pin, on), lit) in pins.zip(levels).zip(self.lit.iter_mut()) {
                if on == lit_pass {
                    pin.set_state(PinState::from(on))
                        .map_err(|_| GpioError::WriteFailed)?;
                    *lit = on;
                }
            }
        }
        Ok(())
    }

    /// Lamps as actually written to the pins.
    pub fn current(&self) -> LightOutputs {
        let [red, yellow, green, ped_red, ped_green] = self.lit;
        LightOutputs {
            vehicle: VehicleLights { red, yellow, green },
            pedestrian: PedestrianLights {
                red: ped_red,
                green: ped_green,
            },
        }
    }
}
