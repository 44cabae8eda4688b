//! PDF access built on `lopdf`.
//!
//! - [`PdfSource`]: read-only input and mask documents
//! - [`OutputBuilder`]: page copies, mask composition and serialisation

pub mod builder;
pub mod document;


pub use builder::OutputBuilder;
pub use document::PdfSource;
