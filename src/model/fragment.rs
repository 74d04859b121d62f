//! Typeset text fragments, the classifier's input.

use serde::{Deserialize, Serialize};

/// One visual line of extracted text with its dominant style and position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    /// Line text (trimmed by the classifier at consumption time)
    pub text: String,

    /// Dominant font size of the line, in points
    pub font_size: f32,

    /// Whether the dominant font face is a bold variant
    pub bold: bool,

    /// Page number (1-indexed)
    pub page: u32,

    /// Vertical position of the line origin, measured from the top of the page
    pub y: f32,
}

impl Fragment {
    /// Create a regular-weight fragment.
    pub fn new(text: impl Into<String>, font_size: f32, page: u32, y: f32) -> Self {
        Self {
            text: text.into(),
            font_size,
            bold: false,
            page,
            y,
        }
    }

    /// Mark the fragment as bold.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Set boldness explicitly.
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    /// The text with surrounding whitespace removed.
    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }
}
