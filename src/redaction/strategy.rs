//! Redaction strategy trait and supporting types.
//!
//! A strategy decides how mask pages end up on the selected input pages.
//! The service owns everything around it: opening documents, resolving the
//! selection and writing the output.

use crate::domain::{MaskMode, PageIndexSet};
use crate::error::RedactorResult;
use crate::pdf::{OutputBuilder, PdfSource};
use std::path::PathBuf;

/// Statistics about a redaction run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedactionResult {
    /// Pages in the input (and in the output)
    pub pages_processed: usize,

    /// Zero-based pages that received a mask
    pub pages_redacted: PageIndexSet,

    /// How mask pages were matched to input pages
    pub mask_mode: MaskMode,

    /// Where the output was written; `None` if nothing was written
    pub output: Option<PathBuf>,

    /// Whether content was removed rather than visually covered
    pub secure: bool,
}

impl RedactionResult {
    /// Returns true if any page received a mask.
    pub fn has_redactions(&self) -> bool {
        !self.pages_redacted.is_empty()
    }
}

/// Strategy for compositing a mask onto an input document.
pub trait RedactionStrategy: Send + Sync {
    /// Builds the output document.
    ///
    /// # Arguments
    /// * `input` - Document being redacted
    /// * `mask` - Document providing mask pages
    /// * `selection` - Zero-based input pages to redact, ascending
    /// * `mode` - Which mask page goes onto which input page
    ///
    /// # Returns
    /// A builder holding exactly `input.page_count()` pages in input order
    fn compose(
        &self,
        input: &PdfSource,
        mask: &PdfSource,
        selection: &PageIndexSet,
        mode: MaskMode,
    ) -> RedactorResult<OutputBuilder>;

    /// Returns a human-readable name for this strategy.
    fn name(&self) -> &str;

    /// Returns whether this strategy removes the content it covers.
    fn is_secure(&self) -> bool;
}
