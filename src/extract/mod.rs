//! Fragment extraction from PDF documents.
//!
//! Produces the classifier's input: one [`Fragment`] per visual line, in
//! reading order (page ascending, top to bottom), carrying the line's
//! dominant font size, boldness, and top-down vertical position.

mod backend;
mod content;
mod lines;

pub use backend::{
    decode_text_simple, BackendFontInfo, ContentOp, LopdfBackend, PageId, PdfBackend, PdfValue,
    SimpleDecoder, TextDecoder, DEFAULT_PAGE_HEIGHT,
};
pub use content::{is_bold_font, SpanCollector, TextSpan};
pub use lines::{group_spans_into_lines, TextLine};

use std::io::Read;
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::Fragment;

const PDF_MAGIC: &[u8] = b"%PDF-";

/// How page-level failures are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any page error
    #[default]
    Strict,
    /// Skip pages that cannot be read and continue
    Lenient,
}

/// Options for fragment extraction.
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,

    /// Stop after this many pages (None = all pages)
    pub max_pages: Option<u32>,
}

impl ExtractOptions {
    /// Create new extraction options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip unreadable pages instead of failing.
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Only read the first `pages` pages.
    pub fn with_max_pages(mut self, pages: u32) -> Self {
        self.max_pages = Some(pages);
        self
    }
}

/// Check the `%PDF-x.y` header and return the version.
pub fn check_pdf_header(data: &[u8]) -> Result<String> {
    let rest = data.strip_prefix(PDF_MAGIC).ok_or(Error::UnknownFormat)?;
    let version = rest.get(..3).ok_or(Error::UnknownFormat)?;
    match version {
        [major, b'.', minor] if major.is_ascii_digit() && minor.is_ascii_digit() => {
            Ok(String::from_utf8_lossy(version).to_string())
        }
        _ => Err(Error::UnsupportedVersion(
            String::from_utf8_lossy(version).to_string(),
        )),
    }
}

/// Turns a PDF backend into an ordered fragment sequence.
pub struct FragmentExtractor<B: PdfBackend> {
    backend: B,
    options: ExtractOptions,
}

impl FragmentExtractor<LopdfBackend> {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ExtractOptions::default())
    }

    /// Open a PDF file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ExtractOptions) -> Result<Self> {
        let data = std::fs::read(path.as_ref())?;
        Self::from_bytes_with_options(&data, options)
    }

    /// Read a PDF from memory.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ExtractOptions::default())
    }

    /// Read a PDF from memory with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ExtractOptions) -> Result<Self> {
        let version = check_pdf_header(data)?;
        let backend = LopdfBackend::load_bytes(data)?;
        log::debug!("Loaded PDF {} ({} pages)", version, backend.pages().len());
        Ok(Self::with_backend(backend, options))
    }

    /// Read a PDF from a reader.
    pub fn from_reader<R: Read>(mut reader: R, options: ExtractOptions) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes_with_options(&data, options)
    }
}

impl<B: PdfBackend> FragmentExtractor<B> {
    /// Extract from any backend.
    pub fn with_backend(backend: B, options: ExtractOptions) -> Self {
        Self { backend, options }
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.backend.pages().len() as u32
    }

    /// Extract fragments from a single page (1-indexed).
    pub fn extract_page(&self, page_num: u32) -> Result<Vec<Fragment>> {
        let pages = self.backend.pages();
        let page_id = *pages
            .get(&page_num)
            .ok_or(Error::PageOutOfRange(page_num, pages.len() as u32))?;

        let spans = SpanCollector::new(&self.backend, page_id)?.collect()?;
        let height = self.backend.page_height(page_id);

        Ok(group_spans_into_lines(spans)
            .into_iter()
            .map(|line| line.into_fragment(page_num, height))
            .filter(|f| !f.text.trim().is_empty())
            .collect())
    }

    /// Extract fragments from every page, in reading order.
    pub fn extract(&self) -> Result<Vec<Fragment>> {
        let limit = self.options.max_pages.unwrap_or(u32::MAX);
        let mut fragments = Vec::new();

        for &page_num in self.backend.pages().keys().take_while(|&&n| n <= limit) {
            match self.extract_page(page_num) {
                Ok(page_fragments) => fragments.extend(page_fragments),
                Err(e) if self.options.error_mode == ErrorMode::Lenient => {
                    log::warn!("Skipping page {}: {}", page_num, e);
                }
                Err(e) => return Err(e),
            }
        }

        log::debug!("Extracted {} fragments", fragments.len());
        Ok(fragments)
    }
}
