//! Map free-text category labels of calendar events to garbage bins.

use regex::{Regex, RegexBuilder};

use crate::garbage_bin::GarbageBin;

static PATTERN_YELLOW: &str = "gelb";
static PATTERN_GRAY: &str = "grau|rest";
static PATTERN_BLUE: &str = "blau|papier";
static PATTERN_BLUE_CARDBOARD: &str = "blau|papier|pappe|karton";

/// Classifies category labels by ordered, case-insensitive prefix matching.
///
/// The first rule whose pattern matches at the start of the trimmed label wins.
/// Labels matching no rule are [`GarbageBin::Extra`].
#[derive(Debug, Clone)]
pub struct CategoryClassifier {
    rules: Vec<(Regex, GarbageBin)>,
}

impl CategoryClassifier {
    /// Build the classifier.
    ///
    /// With `cardboard` the blue bin also matches labels starting with `pappe` or `karton`.
    pub fn new(cardboard: bool) -> Result<Self, regex::Error> {
        let blue = if cardboard {
            PATTERN_BLUE_CARDBOARD
        } else {
            PATTERN_BLUE
        };
        let rules = [
            (PATTERN_YELLOW, GarbageBin::Yellow),
            (PATTERN_GRAY, GarbageBin::Gray),
            (blue, GarbageBin::Blue),
        ]
        .into_iter()
        .map(|(pattern, bin)| Ok((prefix_regex(pattern)?, bin)))
        .collect::<Result<Vec<_>, regex::Error>>()?;
        Ok(Self { rules })
    }

    /// Find out which garbage bin the given category label represents.
    pub fn classify(&self, label: &str) -> GarbageBin {
        let label = label.trim();
        self.rules
            .iter()
            .find(|(regex, _)| regex.is_match(label))
            .map_or(GarbageBin::Extra, |(_, bin)| *bin)
    }
}

/// Anchor the alternation at the start of the haystack only.
fn prefix_regex(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(&format!("^(?:{pattern})"))
        .case_insensitive(true)
        .build()
}

#[cfg(test)]
mod tests {
    use crate::{category::CategoryClassifier, garbage_bin::GarbageBin};

    fn classifier() -> CategoryClassifier {
        CategoryClassifier::new(true).unwrap()
    }

    #[test]
    fn test_classify_known_labels() {
        let classifier = classifier();
        assert_eq!(classifier.classify("Gelber Sack"), GarbageBin::Yellow);
        assert_eq!(classifier.classify("GELBE TONNE"), GarbageBin::Yellow);
        assert_eq!(classifier.classify("Restmüll"), GarbageBin::Gray);
        assert_eq!(classifier.classify("Graue Tonne"), GarbageBin::Gray);
        assert_eq!(classifier.classify("Papier"), GarbageBin::Blue);
        assert_eq!(classifier.classify("Blaue Tonne (Papier)"), GarbageBin::Blue);
        assert_eq!(classifier.classify("Pappe"), GarbageBin::Blue);
        assert_eq!(classifier.classify("Kartonagen"), GarbageBin::Blue);
    }

    #[test]
    fn test_classify_is_prefix_anchored() {
        let classifier = classifier();
        assert_eq!(classifier.classify("Sperrmüll"), GarbageBin::Extra);
        assert_eq!(classifier.classify("Tonne Restmüll"), GarbageBin::Extra);
        assert_eq!(classifier.classify("Altpapier"), GarbageBin::Extra);
        assert_eq!(classifier.classify("Die gelbe Tonne"), GarbageBin::Extra);
    }

    #[test]
    fn test_classify_trims_label() {
        let classifier = classifier();
        assert_eq!(classifier.classify("  Restmüll \r\n"), GarbageBin::Gray);
        assert_eq!(classifier.classify(""), GarbageBin::Extra);
        assert_eq!(classifier.classify("   "), GarbageBin::Extra);
    }

    #[test]
    fn test_classify_rule_order() {
        let classifier = classifier();
        // "gelb" is checked before "grau|rest" and before "blau|papier".
        assert_eq!(classifier.classify("Gelb-Rest-Papier"), GarbageBin::Yellow);
        assert_eq!(classifier.classify("Rest-Papier"), GarbageBin::Gray);
        assert_eq!(classifier.classify("Papier-Rest"), GarbageBin::Blue);
    }

    #[test]
    fn test_classify_without_cardboard() {
        let classifier = CategoryClassifier::new(false).unwrap();
        assert_eq!(classifier.classify("Pappe"), GarbageBin::Extra);
        assert_eq!(classifier.classify("Karton"), GarbageBin::Extra);
        assert_eq!(classifier.classify("Papier"), GarbageBin::Blue);
        assert_eq!(classifier.classify("blau"), GarbageBin::Blue);
    }
}
