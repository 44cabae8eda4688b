//! Common test utilities and helpers.
//!
//! - Custom assertions
//! - Test fixtures and builders
//! - PDF inspection helpers

#![allow(dead_code)]

pub mod assertions;
pub mod fixtures;
pub mod pdf_helpers;

pub use assertions::*;
pub use fixtures::*;
pub use pdf_helpers::*;
