//! PDF backend abstraction.
//!
//! The fragment extractor only talks to [`PdfBackend`]; `lopdf` types stay
//! behind [`LopdfBackend`].

use std::collections::{BTreeMap, HashMap};

use lopdf::{Document as LopdfDocument, Object, ObjectId};

use crate::error::{Error, Result};

/// Page identifier: (object number, generation number).
pub type PageId = (u32, u16);

/// US Letter height, used when a page carries no usable MediaBox.
pub const DEFAULT_PAGE_HEIGHT: f32 = 792.0;

/// A font resource on a page.
#[derive(Debug, Clone)]
pub struct BackendFontInfo {
    /// Resource name used by `Tf` (e.g. `F1`)
    pub name: Vec<u8>,
    /// Base font name (e.g. `Helvetica-Bold`)
    pub base_font: String,
}

/// An operand from a content stream.
#[derive(Debug, Clone, PartialEq)]
pub enum PdfValue {
    Integer(i64),
    Real(f32),
    Name(Vec<u8>),
    Str(Vec<u8>),
    Array(Vec<PdfValue>),
    Other,
}

impl PdfValue {
    /// Numeric value of an integer or real operand.
    pub fn as_number(&self) -> Option<f32> {
        match self {
            PdfValue::Integer(i) => Some(*i as f32),
            PdfValue::Real(r) => Some(*r),
            _ => None,
        }
    }
}

/// One content stream operation.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentOp {
    pub operator: String,
    pub operands: Vec<PdfValue>,
}

impl ContentOp {
    /// Create an operation.
    pub fn new(operator: impl Into<String>, operands: Vec<PdfValue>) -> Self {
        Self {
            operator: operator.into(),
            operands,
        }
    }

    /// Numeric operand at `idx`.
    pub fn number(&self, idx: usize) -> Option<f32> {
        self.operands.get(idx).and_then(PdfValue::as_number)
    }
}

/// Read access to a PDF document, as much as fragment extraction needs.
pub trait PdfBackend {
    /// All pages, keyed by 1-based page number.
    fn pages(&self) -> BTreeMap<u32, PageId>;

    /// Height of the page's media box in points.
    fn page_height(&self, page: PageId) -> f32;

    /// Font resources available on a page.
    fn page_fonts(&self, page: PageId) -> Result<Vec<BackendFontInfo>>;

    /// Decompressed content stream bytes of a page.
    fn page_content(&self, page: PageId) -> Result<Vec<u8>>;

    /// Parse content stream bytes into operations.
    fn decode_content(&self, data: &[u8]) -> Result<Vec<ContentOp>>;

    /// Text decoder for a page, with every font's encoding resolved up front.
    fn text_decoder<'a>(&'a self, page: PageId) -> Result<Box<dyn TextDecoder + 'a>>;
}

/// Decodes string operands for one page.
pub trait TextDecoder {
    /// Decode `bytes` drawn with the font resource `font_name`.
    fn decode(&self, font_name: &[u8], bytes: &[u8]) -> String;
}

/// Decoder that ignores font encodings; see [`decode_text_simple`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleDecoder;

impl TextDecoder for SimpleDecoder {
    fn decode(&self, _font_name: &[u8], bytes: &[u8]) -> String {
        decode_text_simple(bytes)
    }
}

/// Decode string bytes without a font encoding: UTF-16BE with BOM, then
/// UTF-8, then Latin-1.
pub fn decode_text_simple(bytes: &[u8]) -> String {
    if let Some(body) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = body
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }

    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

/// [`PdfBackend`] over an in-memory `lopdf::Document`.
pub struct LopdfBackend {
    doc: LopdfDocument,
}

impl LopdfBackend {
    /// Load from an in-memory byte slice.
    pub fn load_bytes(data: &[u8]) -> Result<Self> {
        let doc = LopdfDocument::load_mem(data)?;
        Ok(Self::from_document(doc))
    }

    /// Wrap an already loaded document.
    pub fn from_document(doc: LopdfDocument) -> Self {
        Self { doc }
    }

    /// Follow a reference to the object it names.
    fn resolve<'a>(&'a self, obj: &'a Object) -> Option<&'a Object> {
        match obj {
            Object::Reference(id) => self.doc.get_object(*id).ok(),
            other => Some(other),
        }
    }

    /// MediaBox of the page or the nearest ancestor that defines one.
    fn media_box(&self, page: ObjectId) -> Option<Vec<f32>> {
        let mut node = self.doc.get_dictionary(page).ok()?;
        // Page trees are shallow; the bound guards against reference cycles
        for _ in 0..32 {
            if let Some(Object::Array(items)) = node.get(b"MediaBox").ok().and_then(|o| self.resolve(o)) {
                let values: Vec<f32> = items
                    .iter()
                    .filter_map(|o| match self.resolve(o)? {
                        Object::Integer(i) => Some(*i as f32),
                        Object::Real(r) => Some(*r),
                        _ => None,
                    })
                    .collect();
                if values.len() == 4 {
                    return Some(values);
                }
            }
            let parent = node.get(b"Parent").ok()?.as_reference().ok()?;
            node = self.doc.get_dictionary(parent).ok()?;
        }
        None
    }
}

impl PdfBackend for LopdfBackend {
    fn pages(&self) -> BTreeMap<u32, PageId> {
        self.doc.get_pages()
    }

    fn page_height(&self, page: PageId) -> f32 {
        match self.media_box(page) {
            Some(b) if (b[3] - b[1]).abs() > 0.0 => (b[3] - b[1]).abs(),
            _ => DEFAULT_PAGE_HEIGHT,
        }
    }

    fn page_fonts(&self, page: PageId) -> Result<Vec<BackendFontInfo>> {
        let fonts = self
            .doc
            .get_page_fonts(page)
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        Ok(fonts
            .iter()
            .map(|(name, dict)| BackendFontInfo {
                name: name.clone(),
                base_font: dict
                    .get(b"BaseFont")
                    .ok()
                    .and_then(|o| o.as_name().ok())
                    .map(|n| String::from_utf8_lossy(n).to_string())
                    .unwrap_or_else(|| "Unknown".to_string()),
            })
            .collect())
    }

    fn page_content(&self, page: PageId) -> Result<Vec<u8>> {
        let page_dict = self
            .doc
            .get_dictionary(page)
            .map_err(|e| Error::PdfParse(e.to_string()))?;
        let contents = page_dict
            .get(b"Contents")
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        let refs: Vec<ObjectId> = match contents {
            Object::Reference(r) => vec![*r],
            Object::Array(arr) => arr.iter().filter_map(|o| o.as_reference().ok()).collect(),
            _ => return Err(Error::PdfParse("Invalid content stream".to_string())),
        };

        let mut content = Vec::new();
        for r in refs {
            match self.doc.get_object(r) {
                Ok(Object::Stream(s)) => {
                    let data = s
                        .decompressed_content()
                        .unwrap_or_else(|_| s.content.clone());
                    content.extend_from_slice(&data);
                    content.push(b'\n');
                }
                _ => log::debug!("Skipping non-stream content object {:?}", r),
            }
        }
        Ok(content)
    }

    fn decode_content(&self, data: &[u8]) -> Result<Vec<ContentOp>> {
        let content =
            lopdf::content::Content::decode(data).map_err(|e| Error::PdfParse(e.to_string()))?;

        Ok(content
            .operations
            .into_iter()
            .map(|op| ContentOp {
                operands: op.operands.iter().map(convert_object).collect(),
                operator: op.operator,
            })
            .collect())
    }

    fn text_decoder<'a>(&'a self, page: PageId) -> Result<Box<dyn TextDecoder + 'a>> {
        let fonts = self
            .doc
            .get_page_fonts(page)
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        let mut encodings: HashMap<Vec<u8>, EncodedDecodeFn<'a>> = HashMap::new();
        for (name, dict) in fonts {
            match dict.get_font_encoding(&self.doc) {
                Ok(enc) => {
                    let decode: EncodedDecodeFn<'a> =
                        Box::new(move |bytes: &[u8]| LopdfDocument::decode_text(&enc, bytes).ok());
                    encodings.insert(name, decode);
                }
                Err(e) => log::debug!(
                    "No encoding for font {}: {}",
                    String::from_utf8_lossy(&name),
                    e
                ),
            }
        }

        Ok(Box::new(LopdfTextDecoder { encodings }))
    }
}

type EncodedDecodeFn<'a> = Box<dyn Fn(&[u8]) -> Option<String> + 'a>;

/// Per-page decoder holding each font's resolved lopdf encoding.
struct LopdfTextDecoder<'a> {
    encodings: HashMap<Vec<u8>, EncodedDecodeFn<'a>>,
}

impl TextDecoder for LopdfTextDecoder<'_> {
    fn decode(&self, font_name: &[u8], bytes: &[u8]) -> String {
        self.encodings
            .get(font_name)
            .and_then(|decode| decode(bytes))
            .unwrap_or_else(|| decode_text_simple(bytes))
    }
}

fn convert_object(obj: &Object) -> PdfValue {
    match obj {
        Object::Integer(i) => PdfValue::Integer(*i),
        Object::Real(r) => PdfValue::Real(*r),
        Object::Name(n) => PdfValue::Name(n.clone()),
        Object::String(b, _) => PdfValue::Str(b.clone()),
        Object::Array(arr) => PdfValue::Array(arr.iter().map(convert_object).collect()),
        _ => PdfValue::Other,
    }
}
