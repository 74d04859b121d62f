//! JSON rendering of outlines and fragment lists.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::{Fragment, Outline};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

fn serialize<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };
    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Render an outline as `{"title": ..., "outline": [...]}`.
pub fn to_json(outline: &Outline, format: JsonFormat) -> Result<String> {
    serialize(outline, format)
}

/// Render extracted fragments as a JSON array.
pub fn fragments_to_json(fragments: &[Fragment], format: JsonFormat) -> Result<String> {
    serialize(fragments, format)
}

/// Parse a fragment list previously written by [`fragments_to_json`] or an
/// external extractor.
pub fn fragments_from_json(json: &str) -> Result<Vec<Fragment>> {
    serde_json::from_str(json).map_err(|e| Error::Render(format!("Invalid fragment list: {}", e)))
}

/// Write an outline to `path`.
pub fn write_json<P: AsRef<Path>>(outline: &Outline, path: P, format: JsonFormat) -> Result<()> {
    let json = to_json(outline, format)?;
    fs::write(path, json)?;
    Ok(())
}
