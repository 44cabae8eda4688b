//! Output document assembly.
//!
//! [`OutputBuilder`] appends copies of input pages to a new page tree and
//! composites mask pages onto those copies. Mask pages are turned into Form
//! XObjects and drawn after the original content, the same way a page merge
//! stacks one page on top of another.

use super::document::PdfSource;
use crate::error::{RedactorError, RedactorResult};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Maximum page tree depth followed when resolving inherited attributes.
const MAX_TREE_DEPTH: usize = 32;

/// Default page size (US Letter) for pages without a MediaBox.
const DEFAULT_MEDIA_BOX: [i64; 4] = [0, 0, 612, 792];

/// Mask objects after import into the output document.
#[derive(Debug)]
struct ImportedMask {
    pages: Vec<ObjectId>,
    forms: HashMap<usize, ObjectId>,
}

/// Accumulates output pages in order.
///
/// The builder works on its own copy of the input document's objects.
/// Appended pages are new page objects; merging a mask only ever changes
/// those copies, so the input and any objects shared between pages stay
/// as they were. Finalised exactly once with [`OutputBuilder::save`].
#[derive(Debug)]
pub struct OutputBuilder {
    doc: Document,
    source_pages: Vec<ObjectId>,
    pages_id: ObjectId,
    kids: Vec<ObjectId>,
    mask: Option<ImportedMask>,
}

impl OutputBuilder {
    /// Starts an empty output based on `input`.
    pub fn new(input: &PdfSource) -> Self {
        let mut doc = input.document().clone();
        let pages_id = doc.new_object_id();

        Self {
            doc,
            source_pages: input.page_ids().to_vec(),
            pages_id,
            kids: Vec::new(),
            mask: None,
        }
    }

    /// Number of pages appended so far.
    pub fn page_count(&self) -> usize {
        self.kids.len()
    }

    /// Appends a copy of input page `index` and returns its output position.
    pub fn append_page(&mut self, index: usize) -> RedactorResult<usize> {
        let source_id = *self.source_pages.get(index).ok_or_else(|| {
            RedactorError::composition(index, "page is outside the input document")
        })?;

        let mut page = self
            .doc
            .get_dictionary(source_id)
            .map_err(|e| RedactorError::composition(index, e.to_string()))?
            .clone();

        for key in INHERITABLE_KEYS {
            if !page.has(key) {
                if let Some(value) = inherited_attribute(&self.doc, source_id, key) {
                    page.set(key.to_vec(), value);
                }
            }
        }
        page.set("Parent", Object::Reference(self.pages_id));

        let page_id = self.doc.add_object(page);
        self.kids.push(page_id);
        log::debug!("appended copy of page {} as {:?}", index + 1, page_id);

        Ok(self.kids.len() - 1)
    }

    /// Composites page `mask_index` of `mask` onto output page `position`.
    ///
    /// The original page content is wrapped in `q`/`Q` so graphics state
    /// changes cannot leak into the mask, then the mask form is drawn.
    pub fn merge_mask_page(
        &mut self,
        position: usize,
        mask: &PdfSource,
        mask_index: usize,
    ) -> RedactorResult<()> {
        let page_id = *self.kids.get(position).ok_or_else(|| {
            RedactorError::composition(position, "page has not been appended")
        })?;

        let form_id = self.mask_form(position, mask, mask_index)?;

        let page = self
            .doc
            .get_dictionary(page_id)
            .map_err(|e| RedactorError::composition(position, e.to_string()))?;

        let mut resources = self.owned_dictionary(page.get(b"Resources").ok());
        let mut xobjects = self.owned_dictionary(resources.get(b"XObject").ok());
        let form_name = unused_name(&xobjects);
        xobjects.set(form_name.clone(), Object::Reference(form_id));
        resources.set("XObject", Object::Dictionary(xobjects));

        let mut contents = self.content_refs(page.get(b"Contents").ok());
        let open_id = self
            .doc
            .add_object(Stream::new(Dictionary::new(), b"q\n".to_vec()));
        let draw = format!("\nQ\nq\n/{} Do\nQ\n", form_name);
        let draw_id = self
            .doc
            .add_object(Stream::new(Dictionary::new(), draw.into_bytes()));
        contents.insert(0, Object::Reference(open_id));
        contents.push(Object::Reference(draw_id));

        match self.doc.get_object_mut(page_id) {
            Ok(Object::Dictionary(dict)) => {
                dict.set("Resources", Object::Dictionary(resources));
                dict.set("Contents", Object::Array(contents));
            }
            _ => {
                return Err(RedactorError::composition(
                    position,
                    "page object is not a dictionary",
                ))
            }
        }

        log::debug!(
            "merged mask page {} onto page {}",
            mask_index + 1,
            position + 1
        );
        Ok(())
    }

    /// Writes the output document to `path`.
    ///
    /// The document is serialised in memory first, so nothing is written
    /// unless serialisation succeeds.
    pub fn save(self, path: &Path) -> RedactorResult<()> {
        let bytes = self.into_bytes().map_err(|reason| RedactorError::Persist {
            path: path.to_path_buf(),
            reason,
            source: None,
        })?;

        fs::write(path, bytes).map_err(|e| RedactorError::Persist {
            path: path.to_path_buf(),
            reason: e.to_string(),
            source: Some(e),
        })
    }

    fn into_bytes(mut self) -> Result<Vec<u8>, String> {
        let count = self.kids.len() as i64;
        let kids: Vec<Object> = self.kids.iter().copied().map(Object::Reference).collect();

        let mut pages = Dictionary::new();
        pages.set("Type", Object::Name(b"Pages".to_vec()));
        pages.set("Kids", Object::Array(kids));
        pages.set("Count", Object::Integer(count));
        self.doc
            .objects
            .insert(self.pages_id, Object::Dictionary(pages));

        let mut catalog = Dictionary::new();
        catalog.set("Type", Object::Name(b"Catalog".to_vec()));
        catalog.set("Pages", Object::Reference(self.pages_id));
        let catalog_id = self.doc.add_object(catalog);

        // Stale xref entries from the input must not survive into the output
        let info = self.doc.trailer.get(b"Info").ok().cloned();
        self.doc.trailer = Dictionary::new();
        self.doc.trailer.set("Root", Object::Reference(catalog_id));
        if let Some(info) = info {
            self.doc.trailer.set("Info", info);
        }

        self.doc.prune_objects();
        self.doc.renumber_objects();
        self.doc.compress();

        let mut output = Vec::new();
        self.doc
            .save_to(&mut output)
            .map_err(|e| format!("failed to serialise PDF: {}", e))?;
        Ok(output)
    }

    /// Returns the Form XObject for a mask page, importing the mask first
    /// if needed.
    fn mask_form(
        &mut self,
        position: usize,
        mask: &PdfSource,
        mask_index: usize,
    ) -> RedactorResult<ObjectId> {
        if self.mask.is_none() {
            self.import_mask(mask);
        }
        let imported = self
            .mask
            .as_ref()
            .ok_or_else(|| RedactorError::composition(position, "mask was not imported"))?;

        if let Some(form_id) = imported.forms.get(&mask_index) {
            return Ok(*form_id);
        }

        let mask_page_id = *imported.pages.get(mask_index).ok_or_else(|| {
            RedactorError::composition(
                position,
                format!(
                    "mask page {} does not exist (mask has {} pages)",
                    mask_index + 1,
                    imported.pages.len()
                ),
            )
        })?;

        let content = self.doc.get_page_content(mask_page_id).map_err(|e| {
            RedactorError::composition(
                position,
                format!("unreadable mask page {}: {}", mask_index + 1, e),
            )
        })?;

        let bbox = inherited_attribute(&self.doc, mask_page_id, b"MediaBox").unwrap_or_else(|| {
            Object::Array(DEFAULT_MEDIA_BOX.iter().copied().map(Object::Integer).collect())
        });
        let resources = inherited_attribute(&self.doc, mask_page_id, b"Resources")
            .unwrap_or_else(|| Object::Dictionary(Dictionary::new()));

        let mut form = Dictionary::new();
        form.set("Type", Object::Name(b"XObject".to_vec()));
        form.set("Subtype", Object::Name(b"Form".to_vec()));
        form.set("BBox", bbox);
        form.set("Resources", resources);
        let form_id = self.doc.add_object(Stream::new(form, content));

        if let Some(imported) = self.mask.as_mut() {
            imported.forms.insert(mask_index, form_id);
        }
        Ok(form_id)
    }

    /// Moves the mask's objects into the output, renumbered above every id
    /// already in use.
    fn import_mask(&mut self, mask: &PdfSource) {
        let mut mask_doc = mask.document().clone();
        mask_doc.renumber_objects_with(self.doc.max_id + 1);
        let pages: Vec<ObjectId> = mask_doc.get_pages().into_values().collect();

        self.doc.max_id = self.doc.max_id.max(mask_doc.max_id);
        self.doc.objects.extend(mask_doc.objects);

        log::debug!(
            "imported mask {} ({} pages)",
            mask.path().display(),
            pages.len()
        );
        self.mask = Some(ImportedMask {
            pages,
            forms: HashMap::new(),
        });
    }

    /// Clones a dictionary that may be direct or indirect.
    fn owned_dictionary(&self, object: Option<&Object>) -> Dictionary {
        match object {
            Some(Object::Dictionary(dict)) => dict.clone(),
            Some(Object::Reference(id)) => self
                .doc
                .get_dictionary(*id)
                .cloned()
                .unwrap_or_else(|_| Dictionary::new()),
            _ => Dictionary::new(),
        }
    }

    /// Flattens a page's `Contents` entry into a list of stream references.
    fn content_refs(&self, contents: Option<&Object>) -> Vec<Object> {
        match contents {
            Some(Object::Array(items)) => items.clone(),
            Some(Object::Reference(id)) => match self.doc.get_object(*id) {
                Ok(Object::Array(items)) => items.clone(),
                _ => vec![Object::Reference(*id)],
            },
            _ => Vec::new(),
        }
    }
}

/// Looks up `key` on a page, walking up the page tree if it is missing.
fn inherited_attribute(doc: &Document, page_id: ObjectId, key: &[u8]) -> Option<Object> {
    let mut node_id = page_id;
    for _ in 0..MAX_TREE_DEPTH {
        let node = doc.get_dictionary(node_id).ok()?;
        if let Ok(value) = node.get(key) {
            return Some(value.clone());
        }
        node_id = node.get(b"Parent").and_then(Object::as_reference).ok()?;
    }
    None
}

fn unused_name(xobjects: &Dictionary) -> String {
    (0..)
        .map(|n| format!("RedactMask{}", n))
        .find(|candidate| !xobjects.has(candidate.as_bytes()))
        .unwrap_or_else(|| "RedactMask".to_string())
}
