//! # pdfoutline
//!
//! Infer a document's title and heading outline from typeset text.
//!
//! PDFs rarely carry usable structure, so this library works from
//! typography alone: every visual line is extracted with its font size,
//! boldness, page, and position, and a heuristic classifier picks the title
//! from the large type on the first pages and finds headings by explicit
//! section numbering or by bold, short lines.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfoutline::{outline_file, render};
//!
//! fn main() -> pdfoutline::Result<()> {
//!     let outline = outline_file("document.pdf")?;
//!     println!("{}", render::to_json(&outline, render::JsonFormat::Pretty)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Classifying fragments directly
//!
//! ```
//! use pdfoutline::{classify, Fragment};
//!
//! let outline = classify(&[
//!     Fragment::new("Annual", 28.0, 1, 50.0).bold(),
//!     Fragment::new("Report", 28.0, 1, 53.0).bold(),
//!     Fragment::new("2.1 Revenue by Region", 12.0, 2, 90.0),
//! ]);
//! assert_eq!(outline.title, "Annual Report");
//! assert_eq!(outline.headings[0].level.as_str(), "H2");
//! ```

pub mod batch;
pub mod classify;
pub mod error;
pub mod extract;
pub mod model;
pub mod render;

// Re-export commonly used types
pub use batch::{process_directory, BatchOptions, BatchReport, DocumentReport};
pub use classify::{ClassifierConfig, HeadingStrategy, ListOverride, OutlineClassifier};
pub use error::{Error, Result};
pub use extract::{ErrorMode, ExtractOptions, FragmentExtractor};
pub use model::{Fragment, Heading, HeadingLevel, Outline};
pub use render::JsonFormat;

use std::path::Path;

/// Classify fragments with the default configuration.
///
/// Never fails: an empty input gives an empty title and no headings.
pub fn classify(fragments: &[Fragment]) -> Outline {
    OutlineClassifier::default().classify(fragments)
}

/// Extract one fragment per visual line from a PDF file.
///
/// # Example
///
/// ```no_run
/// let fragments = pdfoutline::extract_fragments("document.pdf").unwrap();
/// println!("{} lines", fragments.len());
/// ```
pub fn extract_fragments<P: AsRef<Path>>(path: P) -> Result<Vec<Fragment>> {
    FragmentExtractor::open(path)?.extract()
}

/// Extract fragments from PDF bytes.
pub fn extract_fragments_from_bytes(data: &[u8]) -> Result<Vec<Fragment>> {
    FragmentExtractor::from_bytes(data)?.extract()
}

/// Extract and classify a PDF file with default settings.
///
/// # Example
///
/// ```no_run
/// let outline = pdfoutline::outline_file("report.pdf").unwrap();
/// for heading in &outline.headings {
///     println!("{} {} (p. {})", heading.level, heading.text, heading.page);
/// }
/// ```
pub fn outline_file<P: AsRef<Path>>(path: P) -> Result<Outline> {
    PdfOutline::new().outline(path)
}

/// Extract and classify PDF bytes with default settings.
pub fn outline_bytes(data: &[u8]) -> Result<Outline> {
    PdfOutline::new().outline_bytes(data)
}

/// Builder combining extraction options and classifier configuration.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::{ClassifierConfig, ListOverride, PdfOutline};
///
/// let outline = PdfOutline::new()
///     .lenient()
///     .with_config(
///         ClassifierConfig::new()
///             .with_excluded_labels(ListOverride::Extend(vec!["Signature".into()])),
///     )
///     .outline("form.pdf")?;
/// # Ok::<(), pdfoutline::Error>(())
/// ```
pub struct PdfOutline {
    extract_options: ExtractOptions,
    config: ClassifierConfig,
}

impl PdfOutline {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            extract_options: ExtractOptions::default(),
            config: ClassifierConfig::default(),
        }
    }

    /// Skip unreadable pages instead of failing.
    pub fn lenient(mut self) -> Self {
        self.extract_options = self.extract_options.lenient();
        self
    }

    /// Only read the first `pages` pages.
    pub fn with_max_pages(mut self, pages: u32) -> Self {
        self.extract_options = self.extract_options.with_max_pages(pages);
        self
    }

    /// Set the classifier configuration.
    pub fn with_config(mut self, config: ClassifierConfig) -> Self {
        self.config = config;
        self
    }

    /// Extract and classify a PDF file.
    pub fn outline<P: AsRef<Path>>(self, path: P) -> Result<Outline> {
        let extractor = FragmentExtractor::open_with_options(path, self.extract_options.clone())?;
        self.run(&extractor)
    }

    /// Extract and classify PDF bytes.
    pub fn outline_bytes(self, data: &[u8]) -> Result<Outline> {
        let extractor =
            FragmentExtractor::from_bytes_with_options(data, self.extract_options.clone())?;
        self.run(&extractor)
    }

    fn run<B: extract::PdfBackend>(self, extractor: &FragmentExtractor<B>) -> Result<Outline> {
        self.config.validate()?;
        let fragments = extractor.extract()?;
        Ok(OutlineClassifier::new(self.config).classify(&fragments))
    }
}

impl Default for PdfOutline {
    fn default() -> Self {
        Self::new()
    }
}
