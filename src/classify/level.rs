//! Heading depth from section numbering.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::HeadingLevel;

static NUMBER_PREFIX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+(\.\d+)*").unwrap());

/// Map a numbered heading to its depth by counting the dots in its leading
/// number: "3" is H1, "3.2" is H2, "3.2.1" and deeper are H3.
///
/// Text without a numeric prefix maps to H2.
pub fn level_for_numbering(text: &str) -> HeadingLevel {
    let Some(prefix) = NUMBER_PREFIX_RE.find(text) else {
        return HeadingLevel::H2;
    };
    match prefix.as_str().matches('.').count() {
        0 => HeadingLevel::H1,
        1 => HeadingLevel::H2,
        _ => HeadingLevel::H3,
    }
}
