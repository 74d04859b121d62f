//! Content stream interpretation: text operators to positioned spans.

use std::collections::HashMap;

use super::backend::{ContentOp, PageId, PdfBackend, PdfValue, TextDecoder};
use crate::error::Result;

/// `TJ` adjustments beyond this (thousandths of an em) read as a word space.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// A run of text drawn with one font at one position.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSpan {
    /// Decoded text
    pub text: String,
    /// X position of the origin
    pub x: f32,
    /// Baseline in PDF user space (bottom-up)
    pub y: f32,
    /// Effective font size after the text matrix scale
    pub font_size: f32,
    /// Base font name
    pub font_name: String,
    /// Whether the font name marks a bold face
    pub bold: bool,
}

impl TextSpan {
    /// Create a span, deriving boldness from the font name.
    pub fn new(text: String, x: f32, y: f32, font_size: f32, font_name: String) -> Self {
        let bold = is_bold_font(&font_name);
        Self {
            text,
            x,
            y,
            font_size,
            font_name,
            bold,
        }
    }

    /// Rough horizontal extent, for spacing decisions between spans.
    pub fn estimated_width(&self) -> f32 {
        self.text.chars().count() as f32 * self.font_size * 0.5
    }
}

/// Whether a base font name denotes a bold face.
pub fn is_bold_font(font_name: &str) -> bool {
    let lower = font_name.to_lowercase();
    lower.contains("bold") || lower.contains("black") || lower.contains("heavy")
}

/// Text matrix state inside a `BT`/`ET` block.
#[derive(Debug, Clone)]
struct TextMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
    /// Line start, which `Td`/`T*` move relative to
    line_e: f32,
    line_f: f32,
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
            line_e: 0.0,
            line_f: 0.0,
        }
    }
}

impl TextMatrix {
    fn set(&mut self, m: [f32; 6]) {
        let [a, b, c, d, e, f] = m;
        *self = Self {
            a,
            b,
            c,
            d,
            e,
            f,
            line_e: e,
            line_f: f,
        };
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.line_e += tx * self.a + ty * self.c;
        self.line_f += tx * self.b + ty * self.d;
        self.e = self.line_e;
        self.f = self.line_f;
    }

    fn position(&self) -> (f32, f32) {
        (self.e, self.f)
    }

    fn scale(&self) -> f32 {
        (self.b * self.b + self.d * self.d).sqrt()
    }
}

/// Walks a page's operations and collects text spans.
pub struct SpanCollector<'a, B: PdfBackend + ?Sized> {
    backend: &'a B,
    page: PageId,
    fonts: HashMap<Vec<u8>, String>,
    decoder: Box<dyn TextDecoder + 'a>,
}

impl<'a, B: PdfBackend + ?Sized> SpanCollector<'a, B> {
    /// Prepare a collector for one page, loading its font table and
    /// resolving font encodings once.
    pub fn new(backend: &'a B, page: PageId) -> Result<Self> {
        let fonts = backend
            .page_fonts(page)?
            .into_iter()
            .map(|f| (f.name, f.base_font))
            .collect();
        let decoder = backend.text_decoder(page)?;
        Ok(Self {
            backend,
            page,
            fonts,
            decoder,
        })
    }

    /// Collect spans from the page's content stream.
    pub fn collect(&self) -> Result<Vec<TextSpan>> {
        let data = self.backend.page_content(self.page)?;
        let ops = self.backend.decode_content(&data)?;
        Ok(self.collect_ops(&ops))
    }

    /// Collect spans from already decoded operations.
    pub fn collect_ops(&self, ops: &[ContentOp]) -> Vec<TextSpan> {
        let mut spans = Vec::new();
        let mut matrix = TextMatrix::default();
        let mut font_key: Vec<u8> = Vec::new();
        let mut font_name = String::new();
        let mut font_size: f32 = 12.0;
        let mut leading: f32 = 0.0;
        let mut in_text = false;

        for op in ops {
            match op.operator.as_str() {
                "BT" => {
                    in_text = true;
                    matrix = TextMatrix::default();
                }
                "ET" => in_text = false,
                "Tf" => {
                    if let Some(PdfValue::Name(key)) = op.operands.first() {
                        font_name = self
                            .fonts
                            .get(key)
                            .cloned()
                            .unwrap_or_else(|| String::from_utf8_lossy(key).to_string());
                        font_key = key.clone();
                    }
                    font_size = op.number(1).unwrap_or(font_size);
                }
                "TL" => leading = op.number(0).unwrap_or(leading),
                "Td" => matrix.translate(op.number(0).unwrap_or(0.0), op.number(1).unwrap_or(0.0)),
                "TD" => {
                    let ty = op.number(1).unwrap_or(0.0);
                    leading = -ty;
                    matrix.translate(op.number(0).unwrap_or(0.0), ty);
                }
                "Tm" => {
                    if op.operands.len() >= 6 {
                        let mut m = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];
                        for (i, slot) in m.iter_mut().enumerate() {
                            *slot = op.number(i).unwrap_or(*slot);
                        }
                        matrix.set(m);
                    }
                }
                "T*" => matrix.translate(0.0, -leading),
                "Tj" | "TJ" | "'" | "\"" => {
                    if op.operator == "'" || op.operator == "\"" {
                        matrix.translate(0.0, -leading);
                    }
                    if !in_text {
                        continue;
                    }
                    let text = match op.operator.as_str() {
                        "TJ" => self.decode_array(&font_key, op.operands.first()),
                        "\"" => self.decode_string(&font_key, op.operands.get(2)),
                        _ => self.decode_string(&font_key, op.operands.first()),
                    };
                    if text.trim().is_empty() {
                        continue;
                    }
                    let (x, y) = matrix.position();
                    spans.push(TextSpan::new(
                        text,
                        x,
                        y,
                        font_size * matrix.scale(),
                        font_name.clone(),
                    ));
                }
                _ => {}
            }
        }

        spans
    }

    fn decode_string(&self, font_key: &[u8], operand: Option<&PdfValue>) -> String {
        match operand {
            Some(PdfValue::Str(bytes)) => self.decoder.decode(font_key, bytes),
            _ => String::new(),
        }
    }

    /// Decode a `TJ` array, turning large negative kerning into spaces.
    fn decode_array(&self, font_key: &[u8], operand: Option<&PdfValue>) -> String {
        let Some(PdfValue::Array(items)) = operand else {
            return String::new();
        };

        let mut combined = String::new();
        for item in items {
            match item {
                PdfValue::Str(bytes) => {
                    combined.push_str(&self.decoder.decode(font_key, bytes));
                }
                other => {
                    let Some(adjust) = other.as_number() else {
                        continue;
                    };
                    let wants_space = -adjust > TJ_SPACE_THRESHOLD
                        && combined
                            .chars()
                            .last()
                            .is_some_and(|c| !c.is_whitespace() && !is_spaceless_script_char(c));
                    if wants_space {
                        combined.push(' ');
                    }
                }
            }
        }
        combined
    }
}

/// Characters from scripts written without word spaces (Chinese, Japanese).
/// Hangul is excluded: Korean separates words with spaces.
pub fn is_spaceless_script_char(c: char) -> bool {
    matches!(c as u32,
        0x4E00..=0x9FFF
        | 0x3400..=0x4DBF
        | 0x20000..=0x2EBEF
        | 0x3040..=0x309F
        | 0x30A0..=0x30FF
        | 0x3000..=0x303F)
}
