//! Line assembly: spans sharing a baseline become one fragment.

use std::cmp::Ordering;

use super::content::{is_spaceless_script_char, TextSpan};
use crate::model::Fragment;

/// Spans whose baselines differ by less than this share of the font size sit on one line.
const BASELINE_TOLERANCE: f32 = 0.3;

/// Horizontal gap, as a share of the font size, that separates two words.
const WORD_GAP: f32 = 0.15;

/// A visual line built from one or more spans.
#[derive(Debug, Clone)]
pub struct TextLine {
    /// Spans sorted left to right
    pub spans: Vec<TextSpan>,
    /// Baseline of the first span (bottom-up)
    pub y: f32,
}

impl TextLine {
    /// Build a line, ordering spans by X.
    pub fn from_spans(mut spans: Vec<TextSpan>) -> Self {
        spans.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal));
        let y = spans.first().map(|s| s.y).unwrap_or(0.0);
        Self { spans, y }
    }

    /// Font size weighted by character count.
    pub fn dominant_font_size(&self) -> f32 {
        let total: usize = self.spans.iter().map(|s| s.text.chars().count()).sum();
        if total == 0 {
            return self.spans.first().map(|s| s.font_size).unwrap_or(0.0);
        }
        let weighted: f32 = self
            .spans
            .iter()
            .map(|s| s.font_size * s.text.chars().count() as f32)
            .sum();
        weighted / total as f32
    }

    /// Whether more than half of the characters are set in a bold face.
    pub fn is_bold(&self) -> bool {
        let (bold, total) = self.spans.iter().fold((0usize, 0usize), |(b, t), s| {
            let n = s.text.chars().count();
            (if s.bold { b + n } else { b }, t + n)
        });
        total > 0 && bold * 2 > total
    }

    /// Combined text, with a space between spans that are visibly apart.
    pub fn text(&self) -> String {
        let mut result = String::new();
        let mut prev: Option<&TextSpan> = None;

        for span in &self.spans {
            if let Some(p) = prev {
                let gap = span.x - (p.x + p.estimated_width());
                let apart = gap > span.font_size * WORD_GAP;
                let cjk_pair = p.text.chars().last().is_some_and(is_spaceless_script_char)
                    && span.text.chars().next().is_some_and(is_spaceless_script_char);
                let has_space = p.text.ends_with(char::is_whitespace)
                    || span.text.starts_with(char::is_whitespace);
                if apart && !cjk_pair && !has_space {
                    result.push(' ');
                }
            }
            result.push_str(&span.text);
            prev = Some(span);
        }

        result.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Convert to a fragment, flipping the baseline to a top-down coordinate.
    pub fn into_fragment(self, page: u32, page_height: f32) -> Fragment {
        Fragment {
            text: self.text(),
            font_size: self.dominant_font_size(),
            bold: self.is_bold(),
            page,
            y: page_height - self.y,
        }
    }
}

/// Group a page's spans into lines, top to bottom.
pub fn group_spans_into_lines(mut spans: Vec<TextSpan>) -> Vec<TextLine> {
    // PDF Y grows upward, so the top line has the largest baseline
    spans.sort_by(|a, b| {
        b.y.partial_cmp(&a.y)
            .unwrap_or(Ordering::Equal)
            .then(a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal))
    });

    let mut lines = Vec::new();
    let mut current: Vec<TextSpan> = Vec::new();
    let mut current_y: Option<f32> = None;

    for span in spans {
        let tolerance = span.font_size * BASELINE_TOLERANCE;
        match current_y {
            Some(y) if (span.y - y).abs() <= tolerance => current.push(span),
            _ => {
                if !current.is_empty() {
                    lines.push(TextLine::from_spans(std::mem::take(&mut current)));
                }
                current_y = Some(span.y);
                current.push(span);
            }
        }
    }

    if !current.is_empty() {
        lines.push(TextLine::from_spans(current));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(text: &str, x: f32, y: f32, size: f32, font: &str) -> TextSpan {
        TextSpan::new(text.to_string(), x, y, size, font.to_string())
    }

    #[test]
    fn test_group_lines_top_down() {
        let spans = vec![
            span("second", 72.0, 700.0, 12.0, "Helvetica"),
            span("first", 72.0, 740.0, 12.0, "Helvetica"),
            span("line", 120.0, 741.0, 12.0, "Helvetica"),
        ];
        let lines = group_spans_into_lines(spans);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text(), "first line");
        assert_eq!(lines[1].text(), "second");
    }

    #[test]
    fn test_adjacent_spans_join_without_space() {
        // "Re" ends at 72 + 2 * 6 = 84, exactly where "port" starts
        let line = TextLine::from_spans(vec![
            span("Re", 72.0, 700.0, 12.0, "Helvetica"),
            span("port", 84.0, 700.0, 12.0, "Helvetica"),
        ]);
        assert_eq!(line.text(), "Report");
    }

    #[test]
    fn test_dominant_size_and_bold() {
        let line = TextLine::from_spans(vec![
            span("Heading", 72.0, 700.0, 20.0, "Arial-Bold"),
            span("x", 200.0, 700.0, 10.0, "Arial"),
        ]);
        assert!(line.is_bold());
        let size = line.dominant_font_size();
        assert!((size - 18.75).abs() < 0.01);
    }

    #[test]
    fn test_into_fragment_flips_y() {
        let line = TextLine::from_spans(vec![span("Title Here", 72.0, 720.0, 24.0, "Times-Bold")]);
        let frag = line.into_fragment(1, 792.0);
        assert_eq!(frag.y, 72.0);
        assert_eq!(frag.page, 1);
        assert!(frag.bold);
        assert_eq!(frag.text, "Title Here");
    }
}
