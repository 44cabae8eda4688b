//! Overlay a PDF redaction mask onto selected pages of another PDF.
//!
//! Built for scanned documents: the mask (typically black rectangles) is
//! drawn on top of the chosen pages so the regions it covers are obscured
//! in the output.
//!
//! **Security note**: the mask covers content, it does not delete it. Text
//! under a mask is still extractable, searchable and selectable. Only
//! image-only pages are safely redacted this way.
//!
//! # Architecture
//!
//! - [`domain`]: page range parsing and page selection
//! - [`pdf`]: read-only sources and the output builder (on `lopdf`)
//! - [`redaction`]: the overlay strategy and the service running it
//! - [`output`]: writing the result, including replacing the input file
//! - [`config`]: the per-run configuration
//! - [`error`]: error types
//!
//! # Quick Start
//!
//! ```no_run
//! use mask_redactor::{RedactionService, RunConfig};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = RunConfig::new(
//!     Path::new("scan.pdf"),
//!     Path::new("mask.pdf"),
//!     Some(Path::new("redacted.pdf")),
//!     "1,4-6",
//!     false,
//!     false,
//! )?;
//!
//! let result = RedactionService::with_overlay_strategy().redact(&config)?;
//! println!("redacted pages {}", result.pages_redacted);
//! # Ok(())
//! # }
//! ```
//!
//! # Page selection
//!
//! ```
//! use mask_redactor::domain::{resolve_selection, PageSelection};
//!
//! let selection = PageSelection::Explicit("1,4-6".parse().unwrap());
//! let pages = resolve_selection(&selection, 10, 1);
//! assert_eq!(pages.as_slice(), &[0, 3, 4, 5]);
//!
//! // A three page mask is applied page for page, whatever was requested
//! let pages = resolve_selection(&selection, 10, 3);
//! assert_eq!(pages.as_slice(), &[0, 1, 2]);
//! ```

pub mod config;
pub mod domain;
pub mod error;
pub mod output;
pub mod pdf;
pub mod redaction;

pub use config::RunConfig;
pub use domain::{resolve_selection, MaskMode, PageIndexSet, PageSelection, PageSpec};
pub use error::{DocumentRole, RedactorError, RedactorResult};
pub use output::OutputTarget;
pub use pdf::{OutputBuilder, PdfSource};
pub use redaction::{
    MaskOverlayStrategy, RedactionPlan, RedactionResult, RedactionService, RedactionStrategy,
};
