//! Indicator pins on a Raspberry Pi.

use std::collections::HashMap;

use rppal::gpio::{Gpio, OutputPin};

use crate::{
    error::{Error, Result},
    indicator::PinBackend,
};

/// Drives the GPIO header of a Raspberry Pi.
///
/// Pins keep their level when the process exits, so the LEDs stay lit until the next run.
pub struct RppalPins {
    gpio: Gpio,
    outputs: HashMap<u8, OutputPin>,
}

impl RppalPins {
    pub fn new() -> Result<Self> {
        Ok(Self {
            gpio: Gpio::new()?,
            outputs: HashMap::new(),
        })
    }

    fn output(&mut self, pin: u8) -> Result<&mut OutputPin> {
        self.outputs.get_mut(&pin).ok_or(Error::InvalidPin(pin))
    }
}

impl PinBackend for RppalPins {
    fn configure(&mut self, pin: u8) -> Result<()> {
        let mut output = self.gpio.get(pin)?.into_output_low();
        output.set_reset_on_drop(false);
        self.outputs.insert(pin, output);
        Ok(())
    }

    fn set_high(&mut self, pin: u8) -> Result<()> {
        self.output(pin)?.set_high();
        Ok(())
    }

    fn set_low(&mut self, pin: u8) -> Result<()> {
        self.output(pin)?.set_low();
        Ok(())
    }

    fn reset_all(&mut self) -> Result<()> {
        for output in self.outputs.values_mut() {
            output.set_low();
        }
        Ok(())
    }
}
