//! Product flavour extraction.

use super::patterns::{FLAVOURS, FLAVOUR_LABEL};
use super::FieldExtractor;

/// Flavour extractor over the built-in vocabulary plus optional extras.
pub struct FlavourExtractor {
    extra: Vec<String>,
}

impl FlavourExtractor {
    pub fn new() -> Self {
        Self { extra: Vec::new() }
    }

    /// Append product names checked after the built-in vocabulary.
    pub fn with_extra_flavours<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extra.extend(
            names
                .into_iter()
                .map(|n| n.as_ref().trim().to_ascii_uppercase())
                .filter(|n| !n.is_empty()),
        );
        self
    }

    fn vocabulary(&self) -> impl Iterator<Item = &str> {
        FLAVOURS.iter().copied().chain(self.extra.iter().map(String::as_str))
    }
}

impl Default for FlavourExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for FlavourExtractor {
    type Output = String;

    /// `text` is expected to be uppercased already.
    fn extract(&self, text: &str) -> Option<Self::Output> {
        if let Some(name) = self.vocabulary().find(|name| text.contains(name)) {
            return Some(title_case(name));
        }

        FLAVOUR_LABEL
            .captures(text)
            .map(|caps| title_case(&caps[1]))
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.vocabulary()
            .filter(|name| text.contains(name))
            .map(title_case)
            .collect()
    }
}

/// Extract the flavour from uppercased label text using the built-in vocabulary.
pub fn find_flavour(upper: &str) -> Option<String> {
    FlavourExtractor::new().extract(upper)
}

/// Capitalize each space-separated word and lowercase the rest.
pub fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("MOUNTAIN DEW"), "Mountain Dew");
        assert_eq!(title_case("7UP"), "7up");
        assert_eq!(title_case("pepsi"), "Pepsi");
    }

    #[test]
    fn test_specific_name_checked_first() {
        assert_eq!(find_flavour("MOUNTAIN DEW 500ML"), Some("Mountain Dew".to_string()));
    }

    #[test]
    fn test_short_name_alone() {
        assert_eq!(find_flavour("DEW 500ML"), Some("Dew".to_string()));
    }

    #[test]
    fn test_list_order_beats_text_order() {
        // COLA appears first in the text but PEPSI is earlier in the vocabulary
        assert_eq!(find_flavour("COLA BY PEPSI"), Some("Pepsi".to_string()));
    }

    #[test]
    fn test_flavour_label_fallback() {
        assert_eq!(find_flavour("FLAVOUR GUAVA 250ML"), Some("Guava".to_string()));
        assert_eq!(find_flavour("FLAVOR  JEERA"), Some("Jeera".to_string()));
    }

    #[test]
    fn test_no_flavour() {
        assert_eq!(find_flavour("NET VOL 500ML"), None);
        assert_eq!(find_flavour(""), None);
    }

    #[test]
    fn test_extra_vocabulary() {
        let extractor = FlavourExtractor::new().with_extra_flavours(["nimbooz"]);
        assert_eq!(extractor.extract("NIMBOOZ 250ML"), Some("Nimbooz".to_string()));
        // Built-ins still take precedence
        assert_eq!(extractor.extract("NIMBOOZ LEMON"), Some("Lemon".to_string()));
    }

    #[test]
    fn test_extract_all() {
        let all = FlavourExtractor::new().extract_all("MOUNTAIN DEW");
        assert_eq!(all, vec!["Mountain Dew".to_string(), "Dew".to_string()]);
    }
}
