//! Classifier configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Fraction of the largest early-page font size a line needs to count as title text.
pub const TITLE_SIZE_RATIO: f32 = 0.9;

/// Fraction of the largest early-page font size a bold line needs to count as a heading.
pub const HEADING_SIZE_RATIO: f32 = 0.75;

/// Largest vertical distance between two lines of one wrapped title.
pub const TITLE_LINE_GAP: f32 = 5.0;

/// Titles are only looked for on the first this-many pages.
pub const TITLE_PAGES: u32 = 2;

/// Longest line (in words) still treated as a stylistic heading.
pub const MAX_HEADING_WORDS: usize = 8;

/// Titles this short (in words) are checked against the rejected-title list.
pub const MAX_REJECTED_TITLE_WORDS: usize = 4;

/// Large-font phrases that are flyer boilerplate rather than titles.
pub const DEFAULT_REJECTED_TITLES: &[&str] = &["hope to see you there!", "rsvp", "address"];

/// Table and form column labels that are never headings.
pub const DEFAULT_EXCLUDED_LABELS: &[&str] = &["s.no", "name", "age", "relationship", "date"];

/// How a built-in word list is overridden.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListOverride {
    /// Use the built-in list.
    #[default]
    Default,
    /// Replace the built-in list entirely.
    Replace(Vec<String>),
    /// Append to the built-in list.
    Extend(Vec<String>),
}

impl ListOverride {
    /// Resolve against the built-in list, lower-casing every entry.
    pub fn resolve(&self, defaults: &[&str]) -> Vec<String> {
        let mut list: Vec<String> = match self {
            ListOverride::Default => defaults.iter().map(|s| s.to_string()).collect(),
            ListOverride::Replace(v) => v.clone(),
            ListOverride::Extend(v) => defaults
                .iter()
                .map(|s| s.to_string())
                .chain(v.iter().cloned())
                .collect(),
        };
        for entry in &mut list {
            *entry = entry.trim().to_lowercase();
        }
        list
    }
}

/// A positive heading detection rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadingStrategy {
    /// Explicit section numbering ("2.3 Evaluation"); level from numbering depth.
    Numbered,
    /// Bold, short, large-enough lines; always top level.
    Stylistic,
}

/// Tunables for title and heading detection.
///
/// Defaults are the module constants above; change them only when a corpus
/// needs it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// See [`TITLE_SIZE_RATIO`]
    pub title_size_ratio: f32,

    /// See [`HEADING_SIZE_RATIO`]
    pub heading_size_ratio: f32,

    /// See [`TITLE_LINE_GAP`]
    pub title_line_gap: f32,

    /// See [`TITLE_PAGES`]
    pub title_pages: u32,

    /// See [`MAX_HEADING_WORDS`]
    pub max_heading_words: usize,

    /// See [`MAX_REJECTED_TITLE_WORDS`]
    pub max_rejected_title_words: usize,

    /// Override for [`DEFAULT_REJECTED_TITLES`]
    pub rejected_titles: ListOverride,

    /// Override for [`DEFAULT_EXCLUDED_LABELS`]
    pub excluded_labels: ListOverride,

    /// Heading strategies in priority order; the first match wins
    pub strategies: Vec<HeadingStrategy>,
}

impl ClassifierConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that ratios and limits are usable.
    pub fn validate(&self) -> Result<()> {
        for (name, ratio) in [
            ("title_size_ratio", self.title_size_ratio),
            ("heading_size_ratio", self.heading_size_ratio),
        ] {
            if !ratio.is_finite() || ratio <= 0.0 {
                return Err(Error::Config(format!(
                    "{} must be a positive number, got {}",
                    name, ratio
                )));
            }
        }
        if !self.title_line_gap.is_finite() || self.title_line_gap < 0.0 {
            return Err(Error::Config(format!(
                "title_line_gap must be non-negative, got {}",
                self.title_line_gap
            )));
        }
        if self.title_pages == 0 {
            return Err(Error::Config("title_pages must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Set the title size ratio.
    pub fn with_title_size_ratio(mut self, ratio: f32) -> Self {
        self.title_size_ratio = ratio;
        self
    }

    /// Set the heading size ratio.
    pub fn with_heading_size_ratio(mut self, ratio: f32) -> Self {
        self.heading_size_ratio = ratio;
        self
    }

    /// Set the title line gap.
    pub fn with_title_line_gap(mut self, gap: f32) -> Self {
        self.title_line_gap = gap;
        self
    }

    /// Set how many leading pages may hold the title.
    pub fn with_title_pages(mut self, pages: u32) -> Self {
        self.title_pages = pages;
        self
    }

    /// Override the rejected-title list.
    pub fn with_rejected_titles(mut self, list: ListOverride) -> Self {
        self.rejected_titles = list;
        self
    }

    /// Override the excluded-label list.
    pub fn with_excluded_labels(mut self, list: ListOverride) -> Self {
        self.excluded_labels = list;
        self
    }

    /// Set the heading strategies, in priority order.
    pub fn with_strategies(mut self, strategies: Vec<HeadingStrategy>) -> Self {
        self.strategies = strategies;
        self
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            title_size_ratio: TITLE_SIZE_RATIO,
            heading_size_ratio: HEADING_SIZE_RATIO,
            title_line_gap: TITLE_LINE_GAP,
            title_pages: TITLE_PAGES,
            max_heading_words: MAX_HEADING_WORDS,
            max_rejected_title_words: MAX_REJECTED_TITLE_WORDS,
            rejected_titles: ListOverride::Default,
            excluded_labels: ListOverride::Default,
            strategies: vec![HeadingStrategy::Numbered, HeadingStrategy::Stylistic],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_override_resolve() {
        let defaults = &["rsvp", "address"];
        assert_eq!(ListOverride::Default.resolve(defaults), vec!["rsvp", "address"]);
        assert_eq!(
            ListOverride::Replace(vec!["Menu".into()]).resolve(defaults),
            vec!["menu"]
        );
        assert_eq!(
            ListOverride::Extend(vec![" Welcome ".into()]).resolve(defaults),
            vec!["rsvp", "address", "welcome"]
        );
    }

    #[test]
    fn test_config_defaults() {
        let config = ClassifierConfig::default();
        assert_eq!(config.title_size_ratio, 0.9);
        assert_eq!(config.heading_size_ratio, 0.75);
        assert_eq!(config.title_line_gap, 5.0);
        assert_eq!(
            config.strategies,
            vec![HeadingStrategy::Numbered, HeadingStrategy::Stylistic]
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_partial_json() {
        let config = ClassifierConfig::from_json(
            r#"{"title_line_gap": 8.0, "excluded_labels": {"extend": ["Signature"]}}"#,
        )
        .unwrap();
        assert_eq!(config.title_line_gap, 8.0);
        assert_eq!(config.title_size_ratio, TITLE_SIZE_RATIO);
        assert_eq!(
            config.excluded_labels,
            ListOverride::Extend(vec!["Signature".to_string()])
        );
    }

    #[test]
    fn test_config_rejects_bad_values() {
        assert!(matches!(
            ClassifierConfig::from_json(r#"{"heading_size_ratio": 0.0}"#),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            ClassifierConfig::from_json(r#"{"title_pages": 0}"#),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            ClassifierConfig::from_json("not json"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_config_builder() {
        let config = ClassifierConfig::new()
            .with_title_line_gap(2.0)
            .with_strategies(vec![HeadingStrategy::Numbered]);
        assert_eq!(config.title_line_gap, 2.0);
        assert_eq!(config.strategies.len(), 1);
    }
}
