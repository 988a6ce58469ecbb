//! Charter classification of free text.
//!
//! Rules are loaded from configuration as `(label, regex)` pairs and kept in
//! their configured order. The first rule whose pattern matches anywhere in
//! the text decides the label.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Bucket used by callers when no rule matches.
pub const DEFAULT_CHARTER: &str = "General";

/// One configured charter rule, as it appears in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharterRule {
    pub label: String,
    pub regex: String,
}

impl CharterRule {
    #[must_use]
    pub fn new(label: impl Into<String>, regex: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            regex: regex.into(),
        }
    }
}

/// Compiled, immutable rule list.
#[derive(Debug, Clone, Default)]
pub struct CharterClassifier {
    rules: Vec<(String, Regex)>,
}

impl CharterClassifier {
    /// Compile the rules case-insensitively, preserving order.
    ///
    /// # Errors
    /// Returns [`Error::Pattern`] naming the first rule whose regex does not compile.
    pub fn new(rules: &[CharterRule]) -> Result<Self> {
        let rules = rules
            .iter()
            .map(|rule| {
                RegexBuilder::new(&rule.regex)
                    .case_insensitive(true)
                    .build()
                    .map(|re| (rule.label.clone(), re))
                    .map_err(|source| Error::Pattern {
                        label: rule.label.clone(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { rules })
    }

    /// Label of the first matching rule.
    #[must_use]
    pub fn classify(&self, text: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|(_, re)| re.is_match(text))
            .map(|(label, _)| label.as_str())
    }

    #[must_use]
    pub fn classify_or<'a>(&'a self, text: &str, default: &'a str) -> &'a str {
        self.classify(text).unwrap_or(default)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|(label, _)| label.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn classifier() -> CharterClassifier {
        CharterClassifier::new(&[
            CharterRule::new("Infra", "server"),
            CharterRule::new("Growth", "signup"),
        ])
        .expect("rules should compile")
    }

    #[test]
    fn test_first_matching_rule_wins() {
        let c = classifier();
        assert_eq!(c.classify("server migration for signup flow"), Some("Infra"));
        assert_eq!(c.classify("signup flow on the new server"), Some("Infra"));
        assert_eq!(c.classify("signup funnel review"), Some("Growth"));
    }

    #[test]
    fn test_matching_ignores_case() {
        assert_eq!(classifier().classify("SERVER outage"), Some("Infra"));
    }

    #[test]
    fn test_miss_falls_back_to_default() {
        let c = classifier();
        assert_eq!(c.classify("quarterly planning"), None);
        assert_eq!(c.classify_or("quarterly planning", DEFAULT_CHARTER), "General");
    }

    #[test]
    fn test_classification_is_independent_of_history() {
        let c = classifier();
        let first = c.classify("signup then server").map(str::to_owned);
        let _ = c.classify("unrelated");
        let _ = c.classify("server");
        assert_eq!(c.classify("signup then server").map(str::to_owned), first);
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_invalid_pattern_names_the_rule() {
        let err = CharterClassifier::new(&[CharterRule::new("Broken", "(unclosed")])
            .expect_err("unbalanced group should not compile");
        assert!(err.to_string().contains("Broken"));
    }

    #[test]
    fn test_empty_classifier_matches_nothing() {
        let c = CharterClassifier::default();
        assert!(c.is_empty());
        assert_eq!(c.classify("server"), None);
    }
}
