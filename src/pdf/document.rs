//! Read-only PDF sources.

use crate::error::{DocumentRole, RedactorError, RedactorResult};
use lopdf::{Document, ObjectId};
use std::path::{Path, PathBuf};

/// A fully loaded, read-only PDF.
///
/// `lopdf` reads the whole file during [`PdfSource::open`], so a
/// `PdfSource` holds no open file handle.
#[derive(Debug, Clone)]
pub struct PdfSource {
    path: PathBuf,
    document: Document,
    pages: Vec<ObjectId>,
}

impl PdfSource {
    /// Loads the PDF at `path`.
    ///
    /// # Errors
    /// [`RedactorError::DocumentOpen`] if the file is missing, is not a
    /// readable PDF, or is a mask without pages.
    pub fn open(path: &Path, role: DocumentRole) -> RedactorResult<Self> {
        if !path.exists() {
            return Err(RedactorError::DocumentOpen {
                role,
                path: path.to_path_buf(),
                reason: "file does not exist".to_string(),
            });
        }

        let document = Document::load(path).map_err(|e| RedactorError::DocumentOpen {
            role,
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        Self::from_document(path, role, document)
    }

    /// Wraps an already loaded document.
    pub fn from_document(
        path: &Path,
        role: DocumentRole,
        document: Document,
    ) -> RedactorResult<Self> {
        // get_pages is keyed by 1-based page number, so values are in page order
        let pages: Vec<ObjectId> = document.get_pages().into_values().collect();

        if role == DocumentRole::Mask && pages.is_empty() {
            return Err(RedactorError::DocumentOpen {
                role,
                path: path.to_path_buf(),
                reason: "mask document has no pages".to_string(),
            });
        }

        log::debug!(
            "loaded {} document {} ({} pages)",
            role,
            path.display(),
            pages.len()
        );

        Ok(Self {
            path: path.to_path_buf(),
            document,
            pages,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Object id of the page at zero-based `index`.
    pub fn page_id(&self, index: usize) -> Option<ObjectId> {
        self.pages.get(index).copied()
    }

    pub(crate) fn page_ids(&self) -> &[ObjectId] {
        &self.pages
    }

    pub(crate) fn document(&self) -> &Document {
        &self.document
    }
}
