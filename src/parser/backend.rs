//! PDF source abstraction layer.
//!
//! The outline engine never touches a PDF library directly: it reads pages,
//! glyphs, the metadata title and the bookmark forest through [`PdfSource`].
//! [`LopdfSource`] is the concrete implementation backed by `lopdf`.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::io::Read;
use std::path::Path;

use lopdf::{Dictionary, Document as LopdfDocument, Object, ObjectId};

use super::glyphs::{extract_page_glyphs, number};
use crate::detect::detect_version_from_bytes;
use crate::error::{Error, Result};
use crate::model::{BookmarkNode, Glyph};

/// Width used when a page has no usable `/MediaBox` (US Letter).
pub const DEFAULT_PAGE_WIDTH: f32 = 612.0;

/// Upper bound on page-tree, name-tree and destination recursion.
const MAX_TREE_DEPTH: usize = 32;

/// Abstract interface for the document facts the outline engine consumes.
///
/// Pages are 1-indexed.
pub trait PdfSource {
    /// Number of pages.
    fn page_count(&self) -> u32;

    /// Width of a page in points.
    fn page_width(&self, page: u32) -> f32;

    /// Positioned glyphs of a page, in content order.
    fn page_glyphs(&self, page: u32) -> Result<Vec<Glyph>>;

    /// The `/Title` entry of the document information dictionary.
    fn metadata_title(&self) -> Result<Option<String>>;

    /// The embedded bookmark forest, with destinations resolved to pages.
    fn bookmarks(&self) -> Result<Vec<BookmarkNode>>;
}

/// Simple text decoding fallback when no encoding is available.
pub fn decode_text_simple(bytes: &[u8]) -> String {
    // UTF-16BE with BOM
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }

    // Latin-1
    bytes.iter().map(|&b| b as char).collect()
}

/// Follow one level of indirection.
pub(crate) fn resolve<'a>(doc: &'a LopdfDocument, obj: &'a Object) -> &'a Object {
    match obj {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(obj),
        other => other,
    }
}

/// Read a text string from a dictionary entry.
fn get_string_from_dict(doc: &LopdfDocument, dict: &Dictionary, key: &[u8]) -> Option<String> {
    match resolve(doc, dict.get(key).ok()?) {
        Object::String(bytes, _) => Some(decode_text_simple(bytes)),
        Object::Name(bytes) => Some(String::from_utf8_lossy(bytes).into_owned()),
        _ => None,
    }
}

/// Concrete [`PdfSource`] backed by `lopdf::Document`.
pub struct LopdfSource {
    doc: LopdfDocument,
    pages: BTreeMap<u32, ObjectId>,
    page_numbers: HashMap<ObjectId, u32>,
}

impl LopdfSource {
    /// Load from a file path.
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::load_bytes(&data)
    }

    /// Load from an in-memory byte slice.
    pub fn load_bytes(data: &[u8]) -> Result<Self> {
        detect_version_from_bytes(data)?;

        let doc = LopdfDocument::load_mem(data)?;
        if doc.is_encrypted() {
            return Err(Error::Encrypted);
        }

        Ok(Self::from_document(doc))
    }

    /// Load from a reader.
    pub fn load_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::load_bytes(&data)
    }

    /// Wrap an already-loaded document.
    pub fn from_document(doc: LopdfDocument) -> Self {
        let pages = doc.get_pages();
        let page_numbers = pages.iter().map(|(num, id)| (*id, *num)).collect();
        Self {
            doc,
            pages,
            page_numbers,
        }
    }

    /// Get PDF version string.
    pub fn version(&self) -> String {
        self.doc.version.to_string()
    }

    fn page_id(&self, page: u32) -> Result<ObjectId> {
        self.pages.get(&page).copied().ok_or_else(|| {
            Error::ContentUnextractable(format!(
                "page {} out of range (document has {})",
                page,
                self.pages.len()
            ))
        })
    }

    /// Walk up the page tree to find the MediaBox array.
    fn find_media_box(&self, dict: &Dictionary, depth: usize) -> Option<Vec<f32>> {
        if let Ok(obj) = dict.get(b"MediaBox") {
            if let Ok(arr) = resolve(&self.doc, obj).as_array() {
                let nums: Option<Vec<f32>> = arr
                    .iter()
                    .map(|o| number(resolve(&self.doc, o)))
                    .collect();
                if let Some(nums) = nums.filter(|n| n.len() >= 4) {
                    return Some(nums);
                }
            }
        }

        if depth >= MAX_TREE_DEPTH {
            return None;
        }
        let parent = dict.get(b"Parent").ok()?;
        let parent = resolve(&self.doc, parent).as_dict().ok()?;
        self.find_media_box(parent, depth + 1)
    }

    fn catalog_entry(&self, key: &[u8]) -> Option<&Object> {
        let catalog = self.doc.catalog().ok()?;
        catalog.get(key).ok().map(|o| resolve(&self.doc, o))
    }

    /// Collect one sibling chain of outline items starting at `first`.
    fn collect_outline_items(
        &self,
        first: &Object,
        visited: &mut HashSet<ObjectId>,
    ) -> Vec<BookmarkNode> {
        let mut nodes = Vec::new();
        let mut current = first.as_reference().ok();

        while let Some(id) = current {
            if !visited.insert(id) {
                log::warn!("Outline item {:?} visited twice, stopping", id);
                break;
            }
            let Ok(item) = self.doc.get_dictionary(id) else {
                break;
            };

            let title = get_string_from_dict(&self.doc, item, b"Title").unwrap_or_default();
            let page = match self.outline_destination(item) {
                Ok(page) => Some(page),
                Err(e) => {
                    log::debug!("Bookmark '{}': {}", title.trim(), e);
                    None
                }
            };

            let children = item
                .get(b"First")
                .map(|child| self.collect_outline_items(child, visited))
                .unwrap_or_default();

            nodes.push(BookmarkNode {
                title,
                page,
                children,
            });

            current = item.get(b"Next").ok().and_then(|o| o.as_reference().ok());
        }

        nodes
    }

    /// Page targeted by an outline item's `/Dest` or `/A` GoTo action.
    fn outline_destination(&self, item: &Dictionary) -> Result<u32> {
        if let Ok(dest) = item.get(b"Dest") {
            return self.resolve_destination(dest, 0);
        }

        if let Ok(action) = item.get(b"A") {
            let action = resolve(&self.doc, action)
                .as_dict()
                .map_err(|_| Error::BookmarkResolution("action is not a dictionary".into()))?;
            if let Ok(dest) = action.get(b"D") {
                return self.resolve_destination(dest, 0);
            }
        }

        Err(Error::BookmarkResolution("no destination".into()))
    }

    /// Resolve a destination object to a 1-indexed page number.
    fn resolve_destination(&self, dest: &Object, depth: usize) -> Result<u32> {
        if depth > MAX_TREE_DEPTH {
            return Err(Error::BookmarkResolution("destination chain too deep".into()));
        }

        match resolve(&self.doc, dest) {
            Object::Array(arr) => match arr.first() {
                Some(Object::Reference(page_ref)) => {
                    self.page_numbers.get(page_ref).copied().ok_or_else(|| {
                        Error::BookmarkResolution(format!("{:?} is not a page", page_ref))
                    })
                }
                // Remote-style destinations carry a 0-based page index
                Some(Object::Integer(index)) => u32::try_from(*index)
                    .ok()
                    .and_then(|i| i.checked_add(1))
                    .filter(|page| self.pages.contains_key(page))
                    .ok_or_else(|| Error::BookmarkResolution(format!("page index {}", index))),
                _ => Err(Error::BookmarkResolution("malformed destination array".into())),
            },
            Object::Dictionary(dict) => {
                let inner = dict
                    .get(b"D")
                    .map_err(|_| Error::BookmarkResolution("destination without /D".into()))?;
                self.resolve_destination(inner, depth + 1)
            }
            Object::Name(name) | Object::String(name, _) => {
                let target = self.named_destination(name).ok_or_else(|| {
                    Error::BookmarkResolution(format!(
                        "unknown named destination '{}'",
                        String::from_utf8_lossy(name)
                    ))
                })?;
                self.resolve_destination(target, depth + 1)
            }
            _ => Err(Error::BookmarkResolution("unsupported destination".into())),
        }
    }

    /// Look up a named destination in `/Dests` or the `/Names /Dests` tree.
    fn named_destination(&self, name: &[u8]) -> Option<&Object> {
        if let Some(Object::Dictionary(dests)) = self.catalog_entry(b"Dests") {
            if let Ok(target) = dests.get(name) {
                return Some(target);
            }
        }

        let names = self.catalog_entry(b"Names")?.as_dict().ok()?;
        let tree = resolve(&self.doc, names.get(b"Dests").ok()?).as_dict().ok()?;
        self.search_name_tree(tree, name, 0)
    }

    fn search_name_tree<'a>(
        &'a self,
        node: &'a Dictionary,
        name: &[u8],
        depth: usize,
    ) -> Option<&'a Object> {
        if depth > MAX_TREE_DEPTH {
            return None;
        }

        if let Ok(pairs) = node.get(b"Names") {
            let pairs = resolve(&self.doc, pairs).as_array().ok()?;
            for pair in pairs.chunks_exact(2) {
                if let Object::String(key, _) = resolve(&self.doc, &pair[0]) {
                    if key.as_slice() == name {
                        return Some(&pair[1]);
                    }
                }
            }
        }

        let kids = resolve(&self.doc, node.get(b"Kids").ok()?).as_array().ok()?;
        kids.iter()
            .filter_map(|kid| resolve(&self.doc, kid).as_dict().ok())
            .find_map(|kid| self.search_name_tree(kid, name, depth + 1))
    }
}

impl PdfSource for LopdfSource {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page_width(&self, page: u32) -> f32 {
        self.pages
            .get(&page)
            .and_then(|id| self.doc.get_dictionary(*id).ok())
            .and_then(|dict| self.find_media_box(dict, 0))
            .map(|b| (b[2] - b[0]).abs())
            .filter(|w| *w > 0.0)
            .unwrap_or(DEFAULT_PAGE_WIDTH)
    }

    fn page_glyphs(&self, page: u32) -> Result<Vec<Glyph>> {
        let page_id = self.page_id(page)?;
        extract_page_glyphs(&self.doc, page_id, page)
    }

    fn metadata_title(&self) -> Result<Option<String>> {
        let Ok(info) = self.doc.trailer.get(b"Info") else {
            return Ok(None);
        };
        let info = resolve(&self.doc, info)
            .as_dict()
            .map_err(|e| Error::MetadataUnavailable(e.to_string()))?;
        Ok(get_string_from_dict(&self.doc, info, b"Title"))
    }

    fn bookmarks(&self) -> Result<Vec<BookmarkNode>> {
        let Some(outlines) = self.catalog_entry(b"Outlines") else {
            return Ok(Vec::new());
        };
        let outlines = outlines
            .as_dict()
            .map_err(|e| Error::PdfParse(format!("/Outlines: {}", e)))?;

        let mut visited = HashSet::new();
        Ok(outlines
            .get(b"First")
            .map(|first| self.collect_outline_items(first, &mut visited))
            .unwrap_or_default())
    }
}
