//! Mask overlay strategy.
//!
//! Copies every input page and draws a mask page over the selected ones.
//! Content under the mask is covered, not removed: text beneath it stays
//! extractable. Use it on scanned (image) documents.

use super::strategy::RedactionStrategy;
use crate::domain::{MaskMode, PageIndexSet};
use crate::error::RedactorResult;
use crate::pdf::{OutputBuilder, PdfSource};

/// Overlay strategy that stacks mask pages on top of input pages.
#[derive(Debug, Clone, Default)]
pub struct MaskOverlayStrategy;

impl MaskOverlayStrategy {
    /// Creates a new overlay strategy.
    pub fn new() -> Self {
        Self
    }
}

impl RedactionStrategy for MaskOverlayStrategy {
    fn compose(
        &self,
        input: &PdfSource,
        mask: &PdfSource,
        selection: &PageIndexSet,
        mode: MaskMode,
    ) -> RedactorResult<OutputBuilder> {
        let mut builder = OutputBuilder::new(input);
        let targets = selection.as_slice();
        let mut cursor = 0;

        for index in 0..input.page_count() {
            let position = builder.append_page(index)?;

            // Both the walk and the selection ascend, so the head is never behind
            if targets.get(cursor) == Some(&index) {
                cursor += 1;
                builder.merge_mask_page(position, mask, mode.mask_page_for(index))?;
            }
        }

        log::debug!("composed {} pages, {} masked", builder.page_count(), cursor);
        Ok(builder)
    }

    fn name(&self) -> &str {
        "MaskOverlay"
    }

    fn is_secure(&self) -> bool {
        false
    }
}
