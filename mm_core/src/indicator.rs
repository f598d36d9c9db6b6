//! Indicator LEDs showing which bin is due.
//!
//! Every bin except [`GarbageBin::None`] has an output pin of its own. The pins are driven
//! through a [`PinBackend`], so the same logic runs against real hardware or just logs.

#[cfg(feature = "rpi")]
pub mod rpi;

use std::{collections::HashMap, fmt, str::FromStr};

use tracing::{debug, info};

use crate::{
    error::{Error, Result},
    garbage_bin::GarbageBin,
};

/// Physical header pin and BCM number of every GPIO on the 40-pin header.
static BOARD_TO_BCM: [(u8, u8); 28] = [
    (3, 2),
    (5, 3),
    (7, 4),
    (8, 14),
    (10, 15),
    (11, 17),
    (12, 18),
    (13, 27),
    (15, 22),
    (16, 23),
    (18, 24),
    (19, 10),
    (21, 9),
    (22, 25),
    (23, 11),
    (24, 8),
    (26, 7),
    (27, 0),
    (28, 1),
    (29, 5),
    (31, 6),
    (32, 12),
    (33, 13),
    (35, 19),
    (36, 16),
    (37, 26),
    (38, 20),
    (40, 21),
];

/// The scheme pin numbers are given in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PinNumbering {
    /// Physical pin numbers of the header.
    #[default]
    Board,
    /// Broadcom GPIO numbers.
    Bcm,
}

impl PinNumbering {
    /// Convert `pin` to its BCM number.
    pub fn to_bcm(self, pin: u8) -> Result<u8> {
        match self {
            PinNumbering::Board => BOARD_TO_BCM
                .iter()
                .find(|(board, _)| *board == pin)
                .map(|(_, bcm)| *bcm)
                .ok_or(Error::InvalidPin(pin)),
            PinNumbering::Bcm if pin <= 27 => Ok(pin),
            PinNumbering::Bcm => Err(Error::InvalidPin(pin)),
        }
    }
}

impl FromStr for PinNumbering {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "board" => Ok(PinNumbering::Board),
            "bcm" => Ok(PinNumbering::Bcm),
            _ => Err(format!("unknown pin numbering '{s}', expected 'board' or 'bcm'")),
        }
    }
}

impl fmt::Display for PinNumbering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PinNumbering::Board => f.write_str("board"),
            PinNumbering::Bcm => f.write_str("bcm"),
        }
    }
}

/// The pin of every indicated bin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinMap {
    pub gray: u8,
    pub yellow: u8,
    pub blue: u8,
    pub extra: u8,
}

impl PinMap {
    pub fn pin(&self, bin: GarbageBin) -> Option<u8> {
        match bin {
            GarbageBin::None => None,
            GarbageBin::Gray => Some(self.gray),
            GarbageBin::Yellow => Some(self.yellow),
            GarbageBin::Blue => Some(self.blue),
            GarbageBin::Extra => Some(self.extra),
        }
    }
}

impl Default for PinMap {
    fn default() -> Self {
        Self {
            gray: 11,
            yellow: 13,
            blue: 15,
            extra: 16,
        }
    }
}

/// Low-level control of output pins, addressed by BCM number.
pub trait PinBackend {
    /// Set up `pin` as an output with low level.
    fn configure(&mut self, pin: u8) -> Result<()>;

    fn set_high(&mut self, pin: u8) -> Result<()>;

    fn set_low(&mut self, pin: u8) -> Result<()>;

    /// Set every configured pin low.
    fn reset_all(&mut self) -> Result<()>;
}

/// Drives one indicator per bin.
#[derive(Debug)]
pub struct Indicator<B> {
    backend: B,
    pins: HashMap<GarbageBin, u8>,
}

impl<B: PinBackend> Indicator<B> {
    /// Resolve the pins of `pin_map` given in `numbering`.
    ///
    /// Fails when a pin is no GPIO or two bins share a pin.
    pub fn new(backend: B, pin_map: PinMap, numbering: PinNumbering) -> Result<Self> {
        let mut pins = HashMap::new();
        for bin in GarbageBin::INDICATED {
            let Some(pin) = pin_map.pin(bin) else {
                continue;
            };
            let bcm = numbering.to_bcm(pin)?;
            if pins.values().any(|used| *used == bcm) {
                return Err(Error::InvalidPin(pin));
            }
            pins.insert(bin, bcm);
        }
        Ok(Self { backend, pins })
    }

    /// Reset the pins and configure every indicator as a low output.
    ///
    /// Call this once before [`Indicator::show`].
    pub fn init(&mut self) -> Result<()> {
        self.backend.reset_all()?;
        for bin in GarbageBin::INDICATED {
            if let Some(pin) = self.pins.get(&bin) {
                debug!("Configuring GPIO {pin} for {bin}");
                self.backend.configure(*pin)?;
            }
        }
        Ok(())
    }

    /// Turn on the indicator of `bin`, or all indicators off for [`GarbageBin::None`].
    ///
    /// Indicators of other bins keep their state.
    pub fn show(&mut self, bin: GarbageBin) -> Result<()> {
        if let Some(pin) = self.pins.get(&bin) {
            return self.backend.set_high(*pin);
        }
        for bin in GarbageBin::INDICATED {
            if let Some(pin) = self.pins.get(&bin) {
                self.backend.set_low(*pin)?;
            }
        }
        Ok(())
    }

    /// The BCM pin of `bin`.
    pub fn pin(&self, bin: GarbageBin) -> Option<u8> {
        self.pins.get(&bin).copied()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

/// A backend which only logs and remembers pin levels.
#[derive(Debug, Default)]
pub struct LogPins {
    levels: HashMap<u8, bool>,
}

impl LogPins {
    /// The level of `pin`, `None` if it has not been configured.
    pub fn level(&self, pin: u8) -> Option<bool> {
        self.levels.get(&pin).copied()
    }

    fn set(&mut self, pin: u8, high: bool) -> Result<()> {
        let level = self.levels.get_mut(&pin).ok_or(Error::InvalidPin(pin))?;
        *level = high;
        info!("GPIO {pin} -> {}", if high { "high" } else { "low" });
        Ok(())
    }
}

impl PinBackend for LogPins {
    fn configure(&mut self, pin: u8) -> Result<()> {
        self.levels.insert(pin, false);
        Ok(())
    }

    fn set_high(&mut self, pin: u8) -> Result<()> {
        self.set(pin, true)
    }

    fn set_low(&mut self, pin: u8) -> Result<()> {
        self.set(pin, false)
    }

    fn reset_all(&mut self) -> Result<()> {
        let mut pins: Vec<u8> = self.levels.keys().copied().collect();
        pins.sort_unstable();
        for pin in pins {
            self.set_low(pin)?;
        }
        Ok(())
    }
}
