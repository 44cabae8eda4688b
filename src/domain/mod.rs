//! Page selection logic.
//!
//! Everything that decides *which* pages get a mask lives here: parsing of
//! page range expressions and reconciliation with the mask document's shape.
//! Nothing in this module touches the filesystem.

pub mod page_range;
pub mod selection;

pub use page_range::PageSpec;
pub use selection::{resolve_selection, MaskMode, PageIndexSet, PageSelection};
