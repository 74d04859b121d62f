//! Integration tests for outline classification over fragment sequences.

use std::collections::HashSet;

use pdfoutline::render::{to_json, JsonFormat};
use pdfoutline::{
    classify, ClassifierConfig, Fragment, Heading, HeadingLevel, Outline, OutlineClassifier,
};

/// A brochure-like document mixing titles, numbered sections, bold labels,
/// bullets, a form table, and a running header.
fn brochure() -> Vec<Fragment> {
    vec![
        Fragment::new("Spring Open House", 26.0, 1, 40.0).bold(),
        Fragment::new("Riverside Community College", 12.0, 1, 70.0),
        Fragment::new("Program Highlights", 20.0, 1, 120.0).bold(),
        Fragment::new("• Hands-on Workshops", 20.0, 1, 150.0).bold(),
        Fragment::new("- Campus Tours", 20.0, 1, 170.0).bold(),
        Fragment::new("● 3 credits", 20.0, 1, 190.0).bold(),
        Fragment::new("Name", 12.0, 1, 220.0).bold(),
        Fragment::new("Relationship", 12.0, 1, 220.0).bold(),
        Fragment::new("Riverside Community College", 10.0, 2, 10.0),
        Fragment::new("1 Admissions", 14.0, 2, 60.0),
        Fragment::new("1.1 Deadlines", 12.0, 2, 90.0),
        Fragment::new("1.1.1 Early Decision", 11.0, 2, 120.0),
        Fragment::new("Apply early to secure housing.", 11.0, 2, 140.0),
        Fragment::new("Contact Us:", 20.0, 3, 30.0).bold(),
        Fragment::new("Visit Our Campus", 20.0, 3, 60.0).bold(),
        Fragment::new("PROGRAM HIGHLIGHTS", 20.0, 3, 90.0).bold(),
    ]
}

#[test]
fn test_empty_sequence() {
    let outline = classify(&[]);
    assert_eq!(outline, Outline::new());
    assert_eq!(
        to_json(&outline, JsonFormat::Compact).unwrap(),
        r#"{"title":"","outline":[]}"#
    );
}

#[test]
fn test_scenario_project_proposal() {
    let fragments = vec![
        Fragment::new("Project Proposal", 24.0, 1, 10.0).bold(),
        Fragment::new("1 Introduction", 14.0, 1, 100.0),
        Fragment::new("1.1 Background", 12.0, 2, 50.0),
    ];
    let outline = classify(&fragments);
    assert_eq!(outline.title, "Project Proposal");
    assert_eq!(
        outline.headings,
        vec![
            Heading::new(HeadingLevel::H1, "1 Introduction", 1),
            Heading::new(HeadingLevel::H2, "1.1 Background", 2),
        ]
    );
}

#[test]
fn test_scenario_multi_line_title() {
    let fragments = vec![
        Fragment::new("Annual", 30.0, 1, 100.0).bold(),
        Fragment::new("Report", 30.0, 1, 103.0).bold(),
        Fragment::new("Fiscal year overview and outlook", 11.0, 1, 160.0),
    ];
    assert_eq!(classify(&fragments).title, "Annual Report");
}

#[test]
fn test_scenario_rsvp_rejected() {
    let fragments = vec![
        Fragment::new("RSVP", 32.0, 1, 50.0).bold(),
        Fragment::new("Please reply by Friday", 12.0, 1, 120.0),
    ];
    assert_eq!(classify(&fragments).title, "");
}

#[test]
fn test_brochure_outline() {
    let outline = classify(&brochure());
    assert_eq!(outline.title, "Spring Open House");
    assert_eq!(
        outline.headings,
        vec![
            Heading::new(HeadingLevel::H1, "Program Highlights", 1),
            Heading::new(HeadingLevel::H1, "1 Admissions", 2),
            Heading::new(HeadingLevel::H2, "1.1 Deadlines", 2),
            Heading::new(HeadingLevel::H3, "1.1.1 Early Decision", 2),
            Heading::new(HeadingLevel::H1, "Visit Our Campus", 3),
        ]
    );
}

#[test]
fn test_no_duplicate_normalized_headings() {
    let outline = classify(&brochure());
    let mut seen = HashSet::new();
    for heading in &outline.headings {
        assert!(
            seen.insert(heading.text.trim().to_lowercase()),
            "duplicate heading {:?}",
            heading.text
        );
    }
}

#[test]
fn test_title_never_repeated_as_heading() {
    let mut fragments = brochure();
    fragments.push(Fragment::new("Spring Open House", 26.0, 4, 40.0).bold());
    let outline = classify(&fragments);
    assert!(!outline.title.is_empty());
    assert!(outline.headings.iter().all(|h| h.text != outline.title));
}

#[test]
fn test_numbering_wins_regardless_of_style() {
    for (bold, size) in [(false, 8.0), (true, 8.0), (false, 40.0), (true, 40.0)] {
        let fragments = vec![
            Fragment::new("Technical Report", 30.0, 1, 10.0).bold(),
            Fragment::new("2.3 Evaluation of Results", size, 1, 100.0).with_bold(bold),
            Fragment::new("3 Methods", size, 1, 200.0).with_bold(bold),
            Fragment::new("3.2.1 Metrics", size, 2, 50.0).with_bold(bold),
        ];
        let levels: Vec<_> = classify(&fragments)
            .headings
            .iter()
            .map(|h| (h.text.clone(), h.level))
            .collect();
        assert!(levels.contains(&("2.3 Evaluation of Results".to_string(), HeadingLevel::H2)));
        assert!(levels.contains(&("3 Methods".to_string(), HeadingLevel::H1)));
        assert!(levels.contains(&("3.2.1 Metrics".to_string(), HeadingLevel::H3)));
    }
}

#[test]
fn test_name_label_never_emitted() {
    for text in ["Name", "NAME", "name", "  Name  "] {
        let fragments = vec![
            Fragment::new("Registration Form", 24.0, 1, 10.0).bold(),
            Fragment::new(text, 24.0, 1, 100.0).bold(),
        ];
        let outline = classify(&fragments);
        assert!(outline.headings.iter().all(|h| !h.text.eq_ignore_ascii_case("name")));
    }
}

#[test]
fn test_bullet_never_emitted() {
    let fragments = vec![
        Fragment::new("Menu", 24.0, 1, 10.0).bold(),
        Fragment::new("• Option A", 24.0, 1, 100.0).bold(),
    ];
    assert!(classify(&fragments).headings.is_empty());
}

#[test]
fn test_classification_is_idempotent() {
    let fragments = brochure();
    let classifier = OutlineClassifier::new(ClassifierConfig::default());
    let first = to_json(&classifier.classify(&fragments), JsonFormat::Pretty).unwrap();
    let second = to_json(&classifier.classify(&fragments), JsonFormat::Pretty).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_heading_scale_comes_from_title_pages() {
    // The huge banner on page 5 does not raise the bar for headings
    let fragments = vec![
        Fragment::new("Field Guide", 20.0, 1, 10.0).bold(),
        Fragment::new("Common Species", 16.0, 3, 10.0).bold(),
        Fragment::new("Back Cover Banner", 72.0, 5, 10.0).bold(),
    ];
    let outline = classify(&fragments);
    assert_eq!(outline.title, "Field Guide");
    assert_eq!(
        outline.headings,
        vec![
            Heading::new(HeadingLevel::H1, "Common Species", 3),
            Heading::new(HeadingLevel::H1, "Back Cover Banner", 5),
        ]
    );
}

#[test]
fn test_second_page_title_sets_heading_scale() {
    let fragments = vec![
        Fragment::new("Draft for review", 14.0, 1, 40.0),
        Fragment::new("Regional Transit Strategy", 40.0, 2, 60.0).bold(),
        Fragment::new("Market Overview", 24.0, 3, 40.0).bold(),
        Fragment::new("Funding Sources", 30.0, 3, 200.0).bold(),
    ];
    let outline = classify(&fragments);
    assert_eq!(outline.title, "Regional Transit Strategy");
    assert_eq!(
        outline.headings,
        vec![Heading::new(HeadingLevel::H1, "Funding Sources", 3)]
    );
}
