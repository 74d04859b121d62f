//! Outline classification.
//!
//! Turns a flat, ordered list of [`Fragment`]s into an [`Outline`]: a title
//! picked from the large type on the first pages, and headings found by an
//! ordered chain of strategies (explicit numbering first, then bold short
//! lines). Classification is pure and deterministic; all state lives inside
//! a single [`OutlineClassifier::classify`] call.
//!
//! # Example
//!
//! ```
//! use pdfoutline::{classify::OutlineClassifier, Fragment, HeadingLevel};
//!
//! let fragments = vec![
//!     Fragment::new("Project Proposal", 24.0, 1, 10.0).bold(),
//!     Fragment::new("1 Introduction", 14.0, 1, 100.0),
//!     Fragment::new("1.1 Background", 12.0, 2, 50.0),
//! ];
//!
//! let outline = OutlineClassifier::default().classify(&fragments);
//! assert_eq!(outline.title, "Project Proposal");
//! assert_eq!(outline.headings[1].level, HeadingLevel::H2);
//! ```

mod config;
mod filter;
mod heading;
mod level;
mod title;

pub use config::{
    ClassifierConfig, HeadingStrategy, ListOverride, DEFAULT_EXCLUDED_LABELS,
    DEFAULT_REJECTED_TITLES, HEADING_SIZE_RATIO, MAX_HEADING_WORDS, MAX_REJECTED_TITLE_WORDS,
    TITLE_LINE_GAP, TITLE_PAGES, TITLE_SIZE_RATIO,
};
pub use filter::{is_bullet_point, is_numbered, is_probable_heading};
pub use heading::{detect_headings, DetectionContext};
pub use level::level_for_numbering;
pub use title::{detect_title, group_title_lines, max_title_font_size};

use crate::model::{Fragment, Outline};

/// Infers titles and headings from typeset fragments.
#[derive(Debug, Clone)]
pub struct OutlineClassifier {
    config: ClassifierConfig,
    rejected_titles: Vec<String>,
    excluded_labels: Vec<String>,
}

impl OutlineClassifier {
    /// Create a classifier, resolving the configured word lists once.
    pub fn new(config: ClassifierConfig) -> Self {
        let rejected_titles = config.rejected_titles.resolve(DEFAULT_REJECTED_TITLES);
        let excluded_labels = config.excluded_labels.resolve(DEFAULT_EXCLUDED_LABELS);
        Self {
            config,
            rejected_titles,
            excluded_labels,
        }
    }

    /// Classify one document's fragments.
    ///
    /// Fragments must be in reading order. An empty input yields an empty
    /// outline.
    pub fn classify(&self, fragments: &[Fragment]) -> Outline {
        if fragments.is_empty() {
            return Outline::new();
        }

        let max_size = max_title_font_size(fragments, self.config.title_pages);
        let title = detect_title(fragments, max_size, &self.config, &self.rejected_titles);

        let ctx = DetectionContext {
            max_size,
            config: &self.config,
        };
        let headings = detect_headings(fragments, &title, &ctx, &self.excluded_labels);

        log::debug!(
            "Classified {} fragments: title {:?}, {} headings",
            fragments.len(),
            title,
            headings.len()
        );

        Outline { title, headings }
    }
}

impl Default for OutlineClassifier {
    fn default() -> Self {
        Self::new(ClassifierConfig::default())
    }
}
