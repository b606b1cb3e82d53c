//! Content-stream interpretation: positioned glyphs from page operators.
//!
//! Tracks the graphics state (`q`/`Q`/`cm`) and the text state
//! (`BT`..`ET`, `Tf`, `Td`, `TD`, `Tm`, `T*`, `TL`, `Tc`, `Tw`, `Tz`, `Ts`)
//! and emits one [`Glyph`] per decoded character of every text-showing
//! operator (`Tj`, `TJ`, `'`, `"`). Form XObjects are not entered.

use std::collections::{BTreeMap, HashMap};

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document as LopdfDocument, Object, ObjectId};
use unicode_normalization::UnicodeNormalization;

use super::backend::{decode_text_simple, resolve};
use crate::error::{Error, Result};
use crate::model::Glyph;

/// Width used when a font carries no metrics, in 1/1000 em.
const DEFAULT_GLYPH_WIDTH: f32 = 500.0;

/// Default width for composite fonts without `/DW`, in 1/1000 em.
const DEFAULT_CID_WIDTH: f32 = 1000.0;

/// A `TJ` adjustment wider than this (1/1000 em) is treated as a word gap.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// Extract the glyphs of one page.
pub fn extract_page_glyphs(
    doc: &LopdfDocument,
    page_id: ObjectId,
    page_number: u32,
) -> Result<Vec<Glyph>> {
    let fonts = doc
        .get_page_fonts(page_id)
        .map_err(|e| Error::ContentUnextractable(format!("page {}: {}", page_number, e)))?;
    let data = doc
        .get_page_content(page_id)
        .map_err(|e| Error::ContentUnextractable(format!("page {}: {}", page_number, e)))?;
    let content = Content::decode(&data)
        .map_err(|e| Error::ContentUnextractable(format!("page {}: {}", page_number, e)))?;

    let mut interpreter = GlyphInterpreter::new(doc, fonts, page_number);
    interpreter.run(&content.operations);
    Ok(interpreter.finish())
}

/// 2D affine transform `[a b c d e f]` in PDF row-vector convention.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

impl Matrix {
    pub const IDENTITY: Matrix = Matrix {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    pub fn new(a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> Self {
        Self { a, b, c, d, e, f }
    }

    pub fn translation(tx: f32, ty: f32) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    /// `self × other`: apply `self` first, then `other`.
    pub fn multiply(&self, other: &Matrix) -> Matrix {
        Matrix {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    /// Length of the transformed unit y vector.
    pub fn vertical_scale(&self) -> f32 {
        (self.c * self.c + self.d * self.d).sqrt()
    }

    fn from_operands(operands: &[Object]) -> Option<Self> {
        let v = numbers(operands, 6)?;
        Some(Self::new(v[0], v[1], v[2], v[3], v[4], v[5]))
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Glyph advance widths of one font.
#[derive(Debug, Clone, PartialEq)]
pub struct FontMetrics {
    composite: bool,
    first_char: u32,
    widths: Vec<f32>,
    cid_widths: HashMap<u32, f32>,
    default_width: f32,
}

impl FontMetrics {
    /// Metrics of a simple (single-byte) font.
    pub fn simple(first_char: u32, widths: Vec<f32>, missing_width: f32) -> Self {
        Self {
            composite: false,
            first_char,
            widths,
            cid_widths: HashMap::new(),
            default_width: missing_width,
        }
    }

    /// Metrics of a composite (two-byte) font.
    pub fn composite(cid_widths: HashMap<u32, f32>, default_width: f32) -> Self {
        Self {
            composite: true,
            first_char: 0,
            widths: Vec::new(),
            cid_widths,
            default_width,
        }
    }

    /// Read metrics from a font dictionary.
    pub fn from_font_dict(doc: &LopdfDocument, font: &Dictionary) -> Self {
        let subtype = font.get(b"Subtype").ok().and_then(|o| o.as_name().ok());
        if subtype == Some(b"Type0".as_slice()) {
            return Self::composite_from_dict(doc, font);
        }

        let first_char = font
            .get(b"FirstChar")
            .ok()
            .and_then(|o| number(resolve(doc, o)))
            .map_or(0, |n| n.max(0.0) as u32);
        let widths = font
            .get(b"Widths")
            .ok()
            .and_then(|o| resolve(doc, o).as_array().ok())
            .map(|arr| {
                arr.iter()
                    .map(|w| number(resolve(doc, w)).unwrap_or(0.0))
                    .collect()
            })
            .unwrap_or_default();
        let missing_width = font
            .get(b"FontDescriptor")
            .ok()
            .and_then(|o| resolve(doc, o).as_dict().ok())
            .and_then(|fd| fd.get(b"MissingWidth").ok())
            .and_then(|o| number(resolve(doc, o)))
            .unwrap_or(DEFAULT_GLYPH_WIDTH);

        Self::simple(first_char, widths, missing_width)
    }

    fn composite_from_dict(doc: &LopdfDocument, font: &Dictionary) -> Self {
        let descendant = font
            .get(b"DescendantFonts")
            .ok()
            .and_then(|o| resolve(doc, o).as_array().ok())
            .and_then(|arr| arr.first())
            .and_then(|o| resolve(doc, o).as_dict().ok());

        let Some(descendant) = descendant else {
            return Self::composite(HashMap::new(), DEFAULT_CID_WIDTH);
        };

        let default_width = descendant
            .get(b"DW")
            .ok()
            .and_then(|o| number(resolve(doc, o)))
            .unwrap_or(DEFAULT_CID_WIDTH);
        let cid_widths = descendant
            .get(b"W")
            .ok()
            .and_then(|o| resolve(doc, o).as_array().ok())
            .map(|w| parse_cid_widths(doc, w))
            .unwrap_or_default();

        Self::composite(cid_widths, default_width)
    }

    /// Bytes per character code.
    pub fn code_len(&self) -> usize {
        if self.composite {
            2
        } else {
            1
        }
    }

    /// Advance width of `code`, in 1/1000 em.
    pub fn width(&self, code: u32) -> f32 {
        if self.composite {
            return self
                .cid_widths
                .get(&code)
                .copied()
                .unwrap_or(self.default_width);
        }
        code.checked_sub(self.first_char)
            .and_then(|i| self.widths.get(i as usize))
            .copied()
            .filter(|w| *w > 0.0)
            .unwrap_or(self.default_width)
    }
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self::simple(0, Vec::new(), DEFAULT_GLYPH_WIDTH)
    }
}

/// Widest `c_first c_last w` span accepted; CIDs are 16-bit.
const MAX_CID_RANGE: u32 = 0xFFFF;

/// Parse a CIDFont `/W` array: `c [w1 w2 ...]` or `c_first c_last w`.
fn parse_cid_widths(doc: &LopdfDocument, w: &[Object]) -> HashMap<u32, f32> {
    let mut widths = HashMap::new();
    let mut i = 0;

    while i < w.len() {
        let Some(first) = number(resolve(doc, &w[i])) else {
            break;
        };
        let first = first.max(0.0) as u32;

        match w.get(i + 1).map(|o| resolve(doc, o)) {
            Some(Object::Array(list)) => {
                for (offset, width) in list.iter().enumerate() {
                    let Some(cid) = u32::try_from(offset)
                        .ok()
                        .and_then(|offset| first.checked_add(offset))
                    else {
                        log::warn!("/W list starting at CID {} overflows", first);
                        return widths;
                    };
                    if let Some(width) = number(resolve(doc, width)) {
                        widths.insert(cid, width);
                    }
                }
                i += 2;
            }
            Some(last) => {
                let last = number(last);
                let width = w.get(i + 2).and_then(|o| number(resolve(doc, o)));
                let (Some(last), Some(width)) = (last, width) else {
                    break;
                };
                let last = last.max(0.0) as u32;
                if last < first || last - first > MAX_CID_RANGE {
                    log::warn!("Skipping /W range {}..={}", first, last);
                } else {
                    for cid in first..=last {
                        widths.insert(cid, width);
                    }
                }
                i += 3;
            }
            None => break,
        }
    }

    widths
}

/// Text state parameters saved and restored with `q`/`Q`.
#[derive(Debug, Clone)]
struct TextState {
    font: Option<Vec<u8>>,
    size: f32,
    char_spacing: f32,
    word_spacing: f32,
    horizontal_scale: f32,
    leading: f32,
    rise: f32,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            font: None,
            size: 0.0,
            char_spacing: 0.0,
            word_spacing: 0.0,
            horizontal_scale: 1.0,
            leading: 0.0,
            rise: 0.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct GraphicsState {
    ctm: Matrix,
    text: TextState,
}

struct PageFont<'a> {
    dict: &'a Dictionary,
    metrics: FontMetrics,
}

/// One decoded character code, ready for placement.
struct ShownCode {
    text: String,
    width: f32,
    is_space: bool,
}

/// Walks a page's operators and collects glyphs.
pub struct GlyphInterpreter<'a> {
    doc: &'a LopdfDocument,
    fonts: BTreeMap<Vec<u8>, PageFont<'a>>,
    page: u32,
    state: GraphicsState,
    stack: Vec<GraphicsState>,
    text_matrix: Matrix,
    line_matrix: Matrix,
    in_text: bool,
    glyphs: Vec<Glyph>,
}

impl<'a> GlyphInterpreter<'a> {
    /// Create an interpreter over the page's font resources.
    pub fn new(
        doc: &'a LopdfDocument,
        fonts: BTreeMap<Vec<u8>, &'a Dictionary>,
        page: u32,
    ) -> Self {
        let fonts = fonts
            .into_iter()
            .map(|(name, dict)| {
                let metrics = FontMetrics::from_font_dict(doc, dict);
                (name, PageFont { dict, metrics })
            })
            .collect();

        Self {
            doc,
            fonts,
            page,
            state: GraphicsState::default(),
            stack: Vec::new(),
            text_matrix: Matrix::IDENTITY,
            line_matrix: Matrix::IDENTITY,
            in_text: false,
            glyphs: Vec::new(),
        }
    }

    /// Interpret a sequence of operations.
    pub fn run(&mut self, operations: &[Operation]) {
        for op in operations {
            self.apply(op);
        }
    }

    /// The glyphs collected so far, in content order.
    pub fn finish(self) -> Vec<Glyph> {
        self.glyphs
    }

    fn apply(&mut self, op: &Operation) {
        let operands = op.operands.as_slice();

        match op.operator.as_str() {
            "q" => self.stack.push(self.state.clone()),
            "Q" => {
                if let Some(saved) = self.stack.pop() {
                    self.state = saved;
                }
            }
            "cm" => {
                if let Some(m) = Matrix::from_operands(operands) {
                    self.state.ctm = m.multiply(&self.state.ctm);
                }
            }
            "BT" => {
                self.in_text = true;
                self.text_matrix = Matrix::IDENTITY;
                self.line_matrix = Matrix::IDENTITY;
            }
            "ET" => self.in_text = false,
            "Tf" => {
                if let [Object::Name(name), size, ..] = operands {
                    self.state.text.font = Some(name.clone());
                    self.state.text.size = number(size).unwrap_or(0.0);
                }
            }
            "Td" => {
                if let Some(v) = numbers(operands, 2) {
                    self.move_line(v[0], v[1]);
                }
            }
            "TD" => {
                if let Some(v) = numbers(operands, 2) {
                    self.state.text.leading = -v[1];
                    self.move_line(v[0], v[1]);
                }
            }
            "Tm" => {
                if let Some(m) = Matrix::from_operands(operands) {
                    self.text_matrix = m;
                    self.line_matrix = m;
                }
            }
            "T*" => self.next_line(),
            "TL" => self.set_param(operands, |t, v| t.leading = v),
            "Tc" => self.set_param(operands, |t, v| t.char_spacing = v),
            "Tw" => self.set_param(operands, |t, v| t.word_spacing = v),
            "Tz" => self.set_param(operands, |t, v| t.horizontal_scale = v / 100.0),
            "Ts" => self.set_param(operands, |t, v| t.rise = v),
            "Tj" => {
                if let Some(Object::String(bytes, _)) = operands.first() {
                    self.show(bytes);
                }
            }
            "TJ" => {
                if let Some(Object::Array(items)) = operands.first() {
                    self.show_adjusted(items);
                }
            }
            "'" => {
                self.next_line();
                if let Some(Object::String(bytes, _)) = operands.first() {
                    self.show(bytes);
                }
            }
            "\"" => {
                if let [aw, ac, Object::String(bytes, _), ..] = operands {
                    self.state.text.word_spacing = number(aw).unwrap_or(0.0);
                    self.state.text.char_spacing = number(ac).unwrap_or(0.0);
                    self.next_line();
                    self.show(bytes);
                }
            }
            _ => {}
        }
    }

    fn set_param(&mut self, operands: &[Object], set: impl FnOnce(&mut TextState, f32)) {
        if let Some(v) = operands.first().and_then(number) {
            set(&mut self.state.text, v);
        }
    }

    fn move_line(&mut self, tx: f32, ty: f32) {
        self.line_matrix = Matrix::translation(tx, ty).multiply(&self.line_matrix);
        self.text_matrix = self.line_matrix;
    }

    fn next_line(&mut self) {
        let leading = self.state.text.leading;
        self.move_line(0.0, -leading);
    }

    /// Advance the text matrix horizontally by `tx` text-space units.
    fn advance(&mut self, tx: f32) {
        self.text_matrix = Matrix::translation(tx, 0.0).multiply(&self.text_matrix);
    }

    /// Origin and effective size of the next glyph in user space.
    fn placement(&self) -> (f32, f32, f32) {
        let trm = Matrix::translation(0.0, self.state.text.rise)
            .multiply(&self.text_matrix)
            .multiply(&self.state.ctm);
        let size = self.state.text.size * self.text_matrix.multiply(&self.state.ctm).vertical_scale();
        (trm.e, trm.f, round_size(size))
    }

    fn push_glyph(&mut self, ch: char) {
        let (x, y, size) = self.placement();
        self.glyphs.push(Glyph::new(ch, x, y, size, self.page));
    }

    fn show(&mut self, bytes: &[u8]) -> Option<char> {
        if !self.in_text {
            return None;
        }

        let text = &self.state.text;
        let (size, tc, tw, th) = (
            text.size,
            text.char_spacing,
            text.word_spacing,
            text.horizontal_scale,
        );

        let mut last = None;
        for code in self.decode(bytes) {
            for ch in code.text.nfkc().filter(|c| !c.is_control()) {
                self.push_glyph(ch);
                last = Some(ch);
            }
            let spacing = if code.is_space { tc + tw } else { tc };
            self.advance((code.width / 1000.0 * size + spacing) * th);
        }
        last
    }

    fn show_adjusted(&mut self, items: &[Object]) {
        if !self.in_text {
            return;
        }

        let mut last: Option<char> = None;
        for item in items {
            match item {
                Object::String(bytes, _) => {
                    if let Some(ch) = self.show(bytes) {
                        last = Some(ch);
                    }
                }
                other => {
                    let Some(adjustment) = number(other) else {
                        continue;
                    };
                    if -adjustment > TJ_SPACE_THRESHOLD {
                        if let Some(prev) = last {
                            if !prev.is_whitespace() && !is_spaceless_script_char(prev) {
                                self.push_glyph(' ');
                                last = Some(' ');
                            }
                        }
                    }
                    let tx = -adjustment / 1000.0
                        * self.state.text.size
                        * self.state.text.horizontal_scale;
                    self.advance(tx);
                }
            }
        }
    }

    /// Split a string operand into character codes and decode each one.
    fn decode(&self, bytes: &[u8]) -> Vec<ShownCode> {
        let font = self
            .state
            .text
            .font
            .as_ref()
            .and_then(|name| self.fonts.get(name));

        let Some(font) = font else {
            return decode_text_simple(bytes)
                .chars()
                .map(|ch| ShownCode {
                    text: ch.to_string(),
                    width: DEFAULT_GLYPH_WIDTH,
                    is_space: ch == ' ',
                })
                .collect();
        };

        let encoding = font.dict.get_font_encoding(self.doc).ok();
        let code_len = font.metrics.code_len();

        bytes
            .chunks(code_len)
            .map(|chunk| {
                let code = chunk.iter().fold(0u32, |acc, b| (acc << 8) | u32::from(*b));
                let text = encoding
                    .as_ref()
                    .and_then(|enc| LopdfDocument::decode_text(enc, chunk).ok())
                    .unwrap_or_else(|| decode_text_simple(chunk));
                ShownCode {
                    text,
                    width: font.metrics.width(code),
                    is_space: code_len == 1 && code == 32,
                }
            })
            .collect()
    }
}

fn round_size(size: f32) -> f32 {
    (size * 100.0).round() / 100.0
}

/// Extract a number from a PDF object.
pub(crate) fn number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

fn numbers(operands: &[Object], count: usize) -> Option<Vec<f32>> {
    if operands.len() < count {
        return None;
    }
    operands[..count].iter().map(number).collect()
}

/// Scripts that do not separate words with spaces.
fn is_spaceless_script_char(c: char) -> bool {
    let code = c as u32;
    (0x4E00..=0x9FFF).contains(&code)
        || (0x3400..=0x4DBF).contains(&code)
        || (0x20000..=0x2EBEF).contains(&code)
        || (0x3040..=0x30FF).contains(&code)
        || (0x3000..=0x303F).contains(&code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{dictionary, Object, StringFormat};

    fn helvetica() -> Dictionary {
        dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        }
    }

    fn op(operator: &str, operands: Vec<Object>) -> Operation {
        Operation::new(operator, operands)
    }

    fn text(s: &str) -> Object {
        Object::String(s.as_bytes().to_vec(), StringFormat::Literal)
    }

    fn run(ops: Vec<Operation>) -> Vec<Glyph> {
        let doc = LopdfDocument::with_version("1.5");
        let font = helvetica();
        let mut fonts = BTreeMap::new();
        fonts.insert(b"F1".to_vec(), &font);
        let mut interpreter = GlyphInterpreter::new(&doc, fonts, 1);
        interpreter.run(&ops);
        interpreter.finish()
    }

    fn chars(glyphs: &[Glyph]) -> String {
        glyphs.iter().map(|g| g.ch).collect()
    }

    #[test]
    fn test_matrix_multiply() {
        let scale = Matrix::new(2.0, 0.0, 0.0, 2.0, 0.0, 0.0);
        let shift = Matrix::translation(10.0, 20.0);
        let m = shift.multiply(&scale);
        assert_eq!(m.e, 20.0);
        assert_eq!(m.f, 40.0);
        assert_eq!(m.vertical_scale(), 2.0);
        assert_eq!(Matrix::IDENTITY.multiply(&scale), scale);
    }

    #[test]
    fn test_simple_text_positions() {
        let glyphs = run(vec![
            op("BT", vec![]),
            op("Tf", vec!["F1".into(), 12.into()]),
            op("Td", vec![72.into(), 700.into()]),
            op("Tj", vec![text("Hi")]),
            op("ET", vec![]),
        ]);

        assert_eq!(chars(&glyphs), "Hi");
        assert_eq!(glyphs[0].x0, 72.0);
        assert_eq!(glyphs[0].y0, 700.0);
        assert_eq!(glyphs[0].font_size, 12.0);
        assert_eq!(glyphs[0].page, 1);
        // default width 500/1000 em at 12pt
        assert_eq!(glyphs[1].x0, 78.0);
        assert_eq!(glyphs[1].y0, 700.0);
    }

    #[test]
    fn test_effective_size_uses_text_matrix() {
        let glyphs = run(vec![
            op("BT", vec![]),
            op("Tf", vec!["F1".into(), 1.into()]),
            op(
                "Tm",
                vec![
                    18.into(),
                    0.into(),
                    0.into(),
                    18.into(),
                    50.into(),
                    600.into(),
                ],
            ),
            op("Tj", vec![text("A")]),
            op("ET", vec![]),
        ]);
        assert_eq!(glyphs[0].font_size, 18.0);
        assert_eq!((glyphs[0].x0, glyphs[0].y0), (50.0, 600.0));
    }

    #[test]
    fn test_ctm_is_saved_and_restored() {
        let glyphs = run(vec![
            op("q", vec![]),
            op(
                "cm",
                vec![
                    2.into(),
                    0.into(),
                    0.into(),
                    2.into(),
                    0.into(),
                    0.into(),
                ],
            ),
            op("BT", vec![]),
            op("Tf", vec!["F1".into(), 10.into()]),
            op("Tj", vec![text("A")]),
            op("ET", vec![]),
            op("Q", vec![]),
            op("BT", vec![]),
            op("Tf", vec!["F1".into(), 10.into()]),
            op("Tj", vec![text("B")]),
            op("ET", vec![]),
        ]);
        assert_eq!(glyphs[0].font_size, 20.0);
        assert_eq!(glyphs[1].font_size, 10.0);
    }

    #[test]
    fn test_tj_gap_inserts_space() {
        let glyphs = run(vec![
            op("BT", vec![]),
            op("Tf", vec!["F1".into(), 10.into()]),
            op(
                "TJ",
                vec![Object::Array(vec![
                    text("Hello"),
                    Object::Integer(-250),
                    text("World"),
                    Object::Integer(-50),
                    text("!"),
                ])],
            ),
            op("ET", vec![]),
        ]);
        assert_eq!(chars(&glyphs), "Hello World!");
    }

    #[test]
    fn test_leading_and_next_line() {
        let glyphs = run(vec![
            op("BT", vec![]),
            op("Tf", vec!["F1".into(), 10.into()]),
            op("Td", vec![72.into(), 700.into()]),
            op("TL", vec![14.into()]),
            op("Tj", vec![text("A")]),
            op("T*", vec![]),
            op("Tj", vec![text("B")]),
            op("'", vec![text("C")]),
            op("ET", vec![]),
        ]);
        let ys: Vec<f32> = glyphs.iter().map(|g| g.y0).collect();
        assert_eq!(ys, vec![700.0, 686.0, 672.0]);
        assert!(glyphs.iter().all(|g| g.x0 == 72.0));
    }

    #[test]
    fn test_text_outside_bt_is_ignored() {
        let glyphs = run(vec![
            op("Tf", vec!["F1".into(), 10.into()]),
            op("Tj", vec![text("stray")]),
        ]);
        assert!(glyphs.is_empty());
    }

    #[test]
    fn test_ligature_is_normalized() {
        let glyphs = run(vec![
            op("BT", vec![]),
            op("Tf", vec!["Missing".into(), 10.into()]),
            op(
                "Tj",
                vec![Object::String(
                    "\u{FB01}le".as_bytes().to_vec(),
                    StringFormat::Literal,
                )],
            ),
            op("ET", vec![]),
        ]);
        assert_eq!(chars(&glyphs), "file");
    }

    #[test]
    fn test_font_metrics_widths() {
        let metrics = FontMetrics::simple(32, vec![278.0, 0.0, 556.0], 250.0);
        assert_eq!(metrics.code_len(), 1);
        assert_eq!(metrics.width(32), 278.0);
        assert_eq!(metrics.width(33), 250.0);
        assert_eq!(metrics.width(34), 556.0);
        assert_eq!(metrics.width(10), 250.0);

        let mut cid = HashMap::new();
        cid.insert(3, 600.0);
        let metrics = FontMetrics::composite(cid, 1000.0);
        assert_eq!(metrics.code_len(), 2);
        assert_eq!(metrics.width(3), 600.0);
        assert_eq!(metrics.width(4), 1000.0);
    }

    #[test]
    fn test_parse_cid_widths() {
        let doc = LopdfDocument::with_version("1.5");
        let w = vec![
            Object::Integer(1),
            Object::Array(vec![Object::Integer(500), Object::Integer(600)]),
            Object::Integer(10),
            Object::Integer(12),
            Object::Integer(250),
        ];
        let widths = parse_cid_widths(&doc, &w);
        assert_eq!(widths.get(&1), Some(&500.0));
        assert_eq!(widths.get(&2), Some(&600.0));
        assert_eq!(widths.get(&11), Some(&250.0));
        assert_eq!(widths.len(), 5);
    }

    #[test]
    fn test_cid_widths_list_near_u32_max() {
        let doc = LopdfDocument::with_version("1.5");
        let w = vec![
            Object::Integer(i64::from(u32::MAX)),
            Object::Array(vec![Object::Integer(500), Object::Integer(600)]),
        ];
        let widths = parse_cid_widths(&doc, &w);
        assert_eq!(widths.get(&u32::MAX), Some(&500.0));
        assert_eq!(widths.len(), 1);
    }

    #[test]
    fn test_cid_width_range_is_bounded() {
        let doc = LopdfDocument::with_version("1.5");
        let w = vec![
            Object::Integer(0),
            Object::Integer(4_000_000_000),
            Object::Integer(500),
            Object::Integer(20),
            Object::Integer(10),
            Object::Integer(700),
            Object::Integer(30),
            Object::Integer(31),
            Object::Integer(900),
        ];
        let widths = parse_cid_widths(&doc, &w);
        assert_eq!(widths.len(), 2);
        assert_eq!(widths.get(&30), Some(&900.0));
        assert_eq!(widths.get(&31), Some(&900.0));
    }
}
