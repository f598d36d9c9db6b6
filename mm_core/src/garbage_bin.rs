//! The bins that can be put out for collection.

use std::fmt;

use bitmask_enum::bitmask;

/// A garbage bin, or `None` when nothing is to be indicated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GarbageBin {
    /// Nothing to indicate, used to reset the display.
    None,
    /// Residual waste.
    Gray,
    /// Recyclables.
    Yellow,
    /// Paper and cardboard.
    Blue,
    /// Any other pickup, e.g. bulky waste or hazardous materials.
    Extra,
}

impl GarbageBin {
    /// All bins which have an indicator of their own.
    pub const INDICATED: [GarbageBin; 4] = [
        GarbageBin::Gray,
        GarbageBin::Yellow,
        GarbageBin::Blue,
        GarbageBin::Extra,
    ];
}

impl fmt::Display for GarbageBin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GarbageBin::None => "NONE",
            GarbageBin::Gray => "GRAY",
            GarbageBin::Yellow => "YELLOW",
            GarbageBin::Blue => "BLUE",
            GarbageBin::Extra => "EXTRA",
        };
        f.write_str(name)
    }
}

/// A set of bins, e.g. the bins indicated during one run.
#[bitmask(u8)]
pub enum BinSet {
    Gray,
    Yellow,
    Blue,
    Extra,
}

impl From<GarbageBin> for BinSet {
    fn from(value: GarbageBin) -> Self {
        match value {
            GarbageBin::None => BinSet::none(),
            GarbageBin::Gray => BinSet::Gray,
            GarbageBin::Yellow => BinSet::Yellow,
            GarbageBin::Blue => BinSet::Blue,
            GarbageBin::Extra => BinSet::Extra,
        }
    }
}

impl BinSet {
    /// The bins contained in this set, in indicator order.
    pub fn bins(self) -> Vec<GarbageBin> {
        GarbageBin::INDICATED
            .into_iter()
            .filter(|bin| self.contains(BinSet::from(*bin)))
            .collect()
    }
}
