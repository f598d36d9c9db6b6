//! The municipal areas which have a calendar of their own.

use std::{fmt, str::FromStr};

use crate::error::Error;

pub static DEFAULT_BASE_URL: &str =
    "https://www.bee-emden.de/abfall/entsorgungssystem/abfuhrkalender/ics";
pub static CALENDAR_FILE: &str = "abfuhrkalender.ics";

static AREAS: [&str; 17] = [
    "barenburg",
    "borssum-hilmarsum",
    "conrebbersweg",
    "constantia",
    "fruechteburg",
    "harsweg",
    "herrentor",
    "jarssum-widdelswehr",
    "larrelt",
    "logumer-vorwerk",
    "petkum",
    "port-arthur-transvaal",
    "stadtzentrum",
    "twixlum",
    "uphusen-marienwehr",
    "wolthusen",
    "wybelsum",
];

/// A validated area identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Area(&'static str);

impl Area {
    /// Every known area.
    pub fn all() -> impl Iterator<Item = Area> {
        AREAS.iter().map(|name| Area(*name))
    }

    pub fn name(&self) -> &'static str {
        self.0
    }

    /// The remote calendar of this area below `base_url`.
    pub fn calendar_url(&self, base_url: &str) -> String {
        format!("{}/{}/{CALENDAR_FILE}", base_url.trim_end_matches('/'), self.0)
    }

    /// The name of the local copy of this area's calendar.
    pub fn cache_file_name(&self) -> String {
        format!("{}-{CALENDAR_FILE}", self.0)
    }
}

impl Default for Area {
    fn default() -> Self {
        Area("jarssum-widdelswehr")
    }
}

impl FromStr for Area {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AREAS
            .iter()
            .find(|name| **name == s)
            .map(|name| Area(*name))
            .ok_or_else(|| Error::UnknownArea(s.to_owned()))
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use crate::{
        area::{Area, DEFAULT_BASE_URL},
        error::Error,
    };

    #[test]
    fn test_from_str() {
        let area = Area::from_str("petkum").unwrap();
        assert_eq!(area.name(), "petkum");
        assert!(matches!(
            Area::from_str("unknown-place"),
            Err(Error::UnknownArea(name)) if name == "unknown-place"
        ));
        assert!(Area::from_str("Petkum").is_err());
        assert!(Area::all().all(|area| Area::from_str(area.name()).ok() == Some(area)));
    }

    #[test]
    fn test_urls_and_files() {
        let area = Area::default();
        assert_eq!(
            area.calendar_url(DEFAULT_BASE_URL),
            "https://www.bee-emden.de/abfall/entsorgungssystem/abfuhrkalender/ics/jarssum-widdelswehr/abfuhrkalender.ics"
        );
        assert_eq!(
            area.calendar_url("http://localhost:8080/"),
            "http://localhost:8080/jarssum-widdelswehr/abfuhrkalender.ics"
        );
        assert_eq!(area.cache_file_name(), "jarssum-widdelswehr-abfuhrkalender.ics");
    }
}
