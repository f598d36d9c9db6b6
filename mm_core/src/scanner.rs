//! Find the events taking place at a given instant.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::calendar::CalendarEvent;

pub static LOG_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// How an event relates to an instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timing {
    Active,
    Past,
    Future,
    /// None of the above. Cannot happen as long as an event does not end before it begins.
    Ambiguous,
}

impl Timing {
    /// Classify `event` relative to `now`, checking active, past and future in this order.
    pub fn of(event: &CalendarEvent, now: DateTime<Utc>) -> Self {
        let (begin, end) = (event.begin, event.end);
        if begin <= now && end >= now {
            Timing::Active
        } else if begin < now && end < now {
            Timing::Past
        } else if begin > now {
            Timing::Future
        } else {
            Timing::Ambiguous
        }
    }
}

/// Find all events active at `now`, logging the timing of every event.
///
/// The flag tells whether any event is active.
pub fn find_active(events: &[CalendarEvent], now: DateTime<Utc>) -> (Vec<&CalendarEvent>, bool) {
    let mut matches = vec![];
    for event in events {
        let span = format!(
            "{} - {}",
            event.begin.format(LOG_FORMAT),
            event.end.format(LOG_FORMAT)
        );
        match Timing::of(event, now) {
            Timing::Active => {
                info!("{span} is now");
                matches.push(event);
            }
            Timing::Past => debug!("{span} is in the past"),
            Timing::Future => debug!("{span} is in the future"),
            Timing::Ambiguous => warn!("{span} is what?"),
        }
    }
    let is_any_active = !matches.is_empty();
    (matches, is_any_active)
}
