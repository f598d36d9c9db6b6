//! This module implements the command line interface and the configuration built from it.

use std::path::PathBuf;

use clap::Parser;
use mm_core::{
    area::{Area, DEFAULT_BASE_URL},
    chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc},
    fetcher::CalendarSource,
    indicator::{PinMap, PinNumbering},
};

/// Exit code for invalid command lines.
pub const USAGE_ERROR: u8 = 2;

/// Show which garbage bin is due for collection.
#[derive(Debug, Parser)]
#[command(version)]
pub struct Arguments {
    /// log debug messages
    #[arg(long)]
    pub debug: bool,
    /// the area whose calendar is used [default: jarssum-widdelswehr]
    #[arg(long, env = "MUELLMANN_AREA", value_parser = parse_area)]
    pub area: Option<Area>,
    /// a fixed calendar URL, used instead of an area's calendar
    #[arg(long, env = "MUELLMANN_URL")]
    pub url: Option<String>,
    /// the URL the area calendars are found below
    #[arg(long, env = "MUELLMANN_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,
    /// the instant to check instead of now, e.g. 2022-01-14T04:00:00
    #[arg(long, env = "MUELLMANN_DATE", value_parser = parse_date)]
    pub date: Option<DateTime<Utc>>,
    /// the directory the calendar is cached in
    #[arg(long, env = "MUELLMANN_CACHE_DIR", default_value = ".")]
    pub cache_dir: PathBuf,
    /// download the calendar even if it is cached
    #[arg(long)]
    pub refresh: bool,
    /// the pin of the gray bin
    #[arg(long, env = "MUELLMANN_PIN_GRAY", default_value_t = PinMap::default().gray)]
    pub pin_gray: u8,
    /// the pin of the yellow bin
    #[arg(long, env = "MUELLMANN_PIN_YELLOW", default_value_t = PinMap::default().yellow)]
    pub pin_yellow: u8,
    /// the pin of the blue bin
    #[arg(long, env = "MUELLMANN_PIN_BLUE", default_value_t = PinMap::default().blue)]
    pub pin_blue: u8,
    /// the pin of any other pickup
    #[arg(long, env = "MUELLMANN_PIN_EXTRA", default_value_t = PinMap::default().extra)]
    pub pin_extra: u8,
    /// how pins are numbered, `board` or `bcm`
    #[arg(long, env = "MUELLMANN_NUMBERING", default_value_t = PinNumbering::Board)]
    pub numbering: PinNumbering,
    /// do not count "Pappe" and "Karton" as paper
    #[arg(long)]
    pub no_cardboard: bool,
    /// only log pin changes instead of driving the GPIO header
    #[arg(long)]
    pub dry_run: bool,
}

/// Everything a run needs to know, fixed once the command line is parsed.
#[derive(Debug, Clone)]
pub struct Config {
    pub source: CalendarSource,
    pub now: DateTime<Utc>,
    pub debug: bool,
    pub cache_dir: PathBuf,
    pub refresh: bool,
    pub pin_map: PinMap,
    pub numbering: PinNumbering,
    pub cardboard: bool,
    pub dry_run: bool,
}

impl From<Arguments> for Config {
    fn from(value: Arguments) -> Self {
        let source = match value.url {
            Some(url) => CalendarSource::Url(url),
            None => CalendarSource::Area {
                area: value.area.unwrap_or_default(),
                base_url: value.base_url,
            },
        };
        Config {
            source,
            now: value.date.unwrap_or_else(Utc::now),
            debug: value.debug,
            cache_dir: value.cache_dir,
            refresh: value.refresh,
            pin_map: PinMap {
                gray: value.pin_gray,
                yellow: value.pin_yellow,
                blue: value.pin_blue,
                extra: value.pin_extra,
            },
            numbering: value.numbering,
            cardboard: !value.no_cardboard,
            dry_run: value.dry_run,
        }
    }
}

/// The exit code for a command line which could not be parsed.
///
/// Help and version requests are no errors.
pub fn exit_code(error: &clap::Error) -> u8 {
    if error.use_stderr() {
        USAGE_ERROR
    } else {
        0
    }
}

fn parse_area(value: &str) -> Result<Area, String> {
    value.parse().map_err(|err: mm_core::Error| err.to_string())
}

/// Parse an RFC 3339 timestamp, or a date with optional time taken as UTC.
fn parse_date(value: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(date_time) = DateTime::parse_from_rfc3339(value) {
        return Ok(date_time.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
        .map_err(|_| format!("invalid date '{value}', expected e.g. 2022-01-14T04:00:00"))
}
