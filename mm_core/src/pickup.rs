//! Show the bins due at a given instant.

use chrono::{DateTime, Utc};
use tracing::info;

use crate::{
    calendar::CalendarEvent,
    category::CategoryClassifier,
    error::Result,
    garbage_bin::{BinSet, GarbageBin},
    indicator::{Indicator, PinBackend},
    scanner::find_active,
};

/// Turn on the indicator of every category of every event active at `now`.
///
/// If no event is active all indicators are turned off. Returns the bins turned on.
pub fn indicate<B: PinBackend>(
    events: &[CalendarEvent],
    now: DateTime<Utc>,
    classifier: &CategoryClassifier,
    indicator: &mut Indicator<B>,
) -> Result<BinSet> {
    let (active_events, garbage_day) = find_active(events, now);
    let mut shown = BinSet::none();
    for event in active_events {
        info!("Name: '{}'", event.name);
        for (i, category) in event.categories.iter().enumerate() {
            let category = category.trim();
            let bin = classifier.classify(category);
            info!("Category[{i}]: '{category}' -> {bin}");
            indicator.show(bin)?;
            shown |= BinSet::from(bin);
        }
    }
    if !garbage_day {
        info!("No garbage pickup today");
        indicator.show(GarbageBin::None)?;
    }
    Ok(shown)
}
