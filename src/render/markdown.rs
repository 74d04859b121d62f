//! Markdown rendering of outlines, as a nested table of contents.

use crate::model::Outline;

/// Render an outline as Markdown: the title as a top-level heading, then
/// one indented bullet per heading with its page number.
pub fn to_markdown(outline: &Outline) -> String {
    let mut out = String::new();

    if !outline.title.is_empty() {
        out.push_str("# ");
        out.push_str(&outline.title);
        out.push_str("\n\n");
    }

    for heading in &outline.headings {
        let indent = "  ".repeat(usize::from(heading.level.depth() - 1));
        out.push_str(&format!(
            "{}- {} (p. {})\n",
            indent, heading.text, heading.page
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Heading, HeadingLevel};

    #[test]
    fn test_markdown_toc() {
        let outline = Outline {
            title: "Project Proposal".to_string(),
            headings: vec![
                Heading::new(HeadingLevel::H1, "1 Introduction", 1),
                Heading::new(HeadingLevel::H2, "1.1 Background", 2),
                Heading::new(HeadingLevel::H3, "1.1.1 Prior Work", 2),
            ],
        };
        assert_eq!(
            to_markdown(&outline),
            "# Project Proposal\n\n- 1 Introduction (p. 1)\n  - 1.1 Background (p. 2)\n    - 1.1.1 Prior Work (p. 2)\n"
        );
    }

    #[test]
    fn test_markdown_without_title() {
        let outline = Outline {
            title: String::new(),
            headings: vec![Heading::new(HeadingLevel::H1, "Key Dates", 3)],
        };
        assert_eq!(to_markdown(&outline), "- Key Dates (p. 3)\n");
        assert_eq!(to_markdown(&Outline::new()), "");
    }
}
