//! Heading detection: one pass over all fragments, an ordered chain of
//! strategies, and first-occurrence deduplication.

use std::collections::HashSet;

use super::config::{ClassifierConfig, HeadingStrategy};
use super::filter::{is_bullet_point, is_numbered, is_probable_heading, normalize, word_count};
use super::level::level_for_numbering;
use crate::model::{Fragment, Heading, HeadingLevel};

/// Per-document facts every strategy can consult.
#[derive(Debug, Clone, Copy)]
pub struct DetectionContext<'a> {
    /// Largest font size on the title pages
    pub max_size: f32,
    /// Active configuration
    pub config: &'a ClassifierConfig,
}

impl HeadingStrategy {
    /// Level for `text` if this strategy recognizes the fragment as a heading.
    pub fn evaluate(&self, fragment: &Fragment, text: &str, ctx: &DetectionContext<'_>) -> Option<HeadingLevel> {
        match self {
            HeadingStrategy::Numbered => is_numbered(text).then(|| level_for_numbering(text)),
            HeadingStrategy::Stylistic => {
                let max_words = ctx.config.max_heading_words;
                let matched = fragment.bold
                    && is_probable_heading(text, max_words)
                    && fragment.font_size > 0.0
                    && fragment.font_size >= ctx.max_size * ctx.config.heading_size_ratio
                    && !is_bullet_point(text)
                    && word_count(text) <= max_words;
                matched.then_some(HeadingLevel::H1)
            }
        }
    }
}

/// Scan `fragments` in order and emit leveled headings.
///
/// `title` is skipped verbatim; `excluded` holds normalized table/form labels.
pub fn detect_headings(
    fragments: &[Fragment],
    title: &str,
    ctx: &DetectionContext<'_>,
    excluded: &[String],
) -> Vec<Heading> {
    let mut headings = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for fragment in fragments {
        let text = fragment.trimmed();
        if text.is_empty() || text == title {
            continue;
        }

        // First occurrence claims the text whether or not it becomes a heading
        let key = normalize(text);
        if !seen.insert(key.clone()) {
            continue;
        }

        if excluded.contains(&key) {
            log::debug!("Skipping table label {:?}", text);
            continue;
        }

        if word_count(text) < 2 && !is_numbered(text) {
            continue;
        }

        let level = ctx
            .config
            .strategies
            .iter()
            .find_map(|strategy| strategy.evaluate(fragment, text, ctx));

        if let Some(level) = level {
            log::debug!("Heading {} on page {}: {:?}", level, fragment.page, text);
            headings.push(Heading::new(level, text, fragment.page));
        }
    }

    headings
}
