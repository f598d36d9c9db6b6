//! Read the events of an iCalendar file.

use std::{
    fs::read_to_string,
    io::{BufReader, Cursor},
    path::Path,
};

use chrono::{
    DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc,
};
use chrono_tz::Tz;
use ical::{parser::ical::component::IcalEvent, property::Property, IcalParser};

use crate::error::{Error, Result};

static DATE_FORMAT: &str = "%Y%m%d";
static DATE_TIME_FORMAT: &str = "%Y%m%dT%H%M%S";

/// A single calendar event as read from the calendar file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    pub name: String,
    pub begin: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub categories: Vec<String>,
}

/// Read all events from a calendar file.
pub fn read(path: &Path) -> Result<Vec<CalendarEvent>> {
    let ics = read_to_string(path)?;
    parse(&ics)
}

/// Parse all events of all calendars in the iCalendar text.
pub fn parse(ics: &str) -> Result<Vec<CalendarEvent>> {
    let parser = IcalParser::new(BufReader::new(Cursor::new(ics)));
    let mut events = vec![];
    for ical_calendar_result in parser {
        let ical_calendar = ical_calendar_result?;
        for ical_event in &ical_calendar.events {
            events.push(CalendarEvent::try_from(ical_event)?);
        }
    }
    Ok(events)
}

impl TryFrom<&IcalEvent> for CalendarEvent {
    type Error = Error;

    fn try_from(ical_event: &IcalEvent) -> Result<Self> {
        let name = ical_event
            .get_ical_property_value("SUMMARY")
            .map(|summary| unescape(summary, None).concat())
            .unwrap_or_default();
        let invalid = |reason: String| Error::InvalidEvent {
            name: name.clone(),
            reason,
        };
        let begin = ical_event
            .get_ical_property("DTSTART")
            .ok_or_else(|| invalid(String::from("missing DTSTART")))?;
        let begin = EventTime::from_property(begin)
            .ok_or_else(|| invalid(format!("invalid DTSTART {:?}", begin.value)))?;
        let end = match ical_event.get_ical_property("DTEND") {
            Some(end) => EventTime::from_property(end)
                .ok_or_else(|| invalid(format!("invalid DTEND {:?}", end.value)))?
                .instant(),
            // an all-day event without end lasts the whole day, any other event is an instant
            None => match begin {
                EventTime::Date(_) => begin.instant() + Duration::days(1),
                EventTime::DateTime(instant) => instant,
            },
        };
        let categories = ical_event
            .properties
            .iter()
            .filter(|property| property.name == "CATEGORIES")
            .filter_map(|property| property.value.as_deref())
            .flat_map(|value| unescape(value, Some(',')))
            .collect();
        Ok(CalendarEvent {
            begin: begin.instant(),
            end,
            categories,
            name,
        })
    }
}

trait GetIcalProperty {
    fn get_ical_property(&self, name: &str) -> Option<&Property>;

    fn get_ical_property_value(&self, name: &str) -> Option<&String> {
        self.get_ical_property(name)
            .and_then(|property| property.value.as_ref())
    }
}

impl GetIcalProperty for IcalEvent {
    fn get_ical_property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|property| property.name == name)
    }
}

/// The value of a `DTSTART` or `DTEND` property.
#[derive(Debug, Clone, Copy)]
enum EventTime {
    Date(NaiveDate),
    DateTime(DateTime<Utc>),
}

impl EventTime {
    fn from_property(property: &Property) -> Option<Self> {
        let value = property.value.as_deref()?.trim();
        if let Ok(date) = NaiveDate::parse_from_str(value, DATE_FORMAT) {
            return Some(EventTime::Date(date));
        }
        if let Some(utc) = value.strip_suffix('Z') {
            let naive = NaiveDateTime::parse_from_str(utc, DATE_TIME_FORMAT).ok()?;
            return Some(EventTime::DateTime(Utc.from_utc_datetime(&naive)));
        }
        let naive = NaiveDateTime::parse_from_str(value, DATE_TIME_FORMAT).ok()?;
        let Some(tz) = property_param(property, "TZID").and_then(|tzid| tzid.parse::<Tz>().ok())
        else {
            // floating times and unknown zones are taken as UTC
            return Some(EventTime::DateTime(Utc.from_utc_datetime(&naive)));
        };
        let instant = match tz.from_local_datetime(&naive) {
            LocalResult::Single(date_time) | LocalResult::Ambiguous(date_time, _) => {
                date_time.with_timezone(&Utc)
            }
            // skipped by a DST transition, use the offset in force before it (RFC 5545 3.3.5)
            LocalResult::None => {
                let before = tz
                    .offset_from_local_datetime(&(naive - Duration::days(1)))
                    .earliest()?
                    .fix();
                let shift = Duration::seconds(before.local_minus_utc().into());
                Utc.from_utc_datetime(&(naive - shift))
            }
        };
        Some(EventTime::DateTime(instant))
    }

    fn instant(self) -> DateTime<Utc> {
        match self {
            EventTime::Date(date) => Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)),
            EventTime::DateTime(instant) => instant,
        }
    }
}

fn property_param<'a>(property: &'a Property, name: &str) -> Option<&'a str> {
    property
        .params
        .as_ref()?
        .iter()
        .find(|(param_name, _)| param_name.eq_ignore_ascii_case(name))
        .and_then(|(_, values)| values.first())
        .map(|value| value.trim_matches('"'))
}

/// Unescape an iCalendar text value, splitting it at unescaped `separator`s.
fn unescape(value: &str, separator: Option<char>) -> Vec<String> {
    let mut parts = vec![];
    let mut current = String::new();
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('n' | 'N') => current.push('\n'),
                Some(escaped) => current.push(escaped),
                None => current.push('\\'),
            },
            _ if Some(c) == separator => parts.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    parts.push(current);
    parts
}
