//! Target page selection.
//!
//! Reconciles the requested pages with the shape of the mask document and
//! produces the final, ordered set of zero-based pages to redact.

use super::page_range::PageSpec;
use std::fmt;

/// Pages requested on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSelection {
    /// Pages listed in a range expression
    Explicit(PageSpec),

    /// Every page of the input
    All,
}

impl Default for PageSelection {
    fn default() -> Self {
        Self::Explicit(PageSpec::default())
    }
}

/// How mask pages correspond to input pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskMode {
    /// The first mask page is applied to every target page
    Single,

    /// Mask page `i` is applied to input page `i`
    PerPage,
}

impl MaskMode {
    /// A mask with more than one page switches to positional correspondence.
    pub fn from_mask_pages(mask_pages: usize) -> Self {
        if mask_pages > 1 {
            Self::PerPage
        } else {
            Self::Single
        }
    }

    /// Returns the mask page to composite onto input page `input_index`.
    pub fn mask_page_for(self, input_index: usize) -> usize {
        match self {
            Self::Single => 0,
            Self::PerPage => input_index,
        }
    }

    pub fn is_per_page(self) -> bool {
        matches!(self, Self::PerPage)
    }
}

/// Sorted, duplicate-free zero-based page indices.
///
/// Every index is below the page count the set was resolved against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageIndexSet {
    indices: Vec<usize>,
}

impl PageIndexSet {
    /// Builds a set from arbitrary indices, dropping those `>= page_count`.
    pub fn from_indices<I>(indices: I, page_count: usize) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let mut indices: Vec<usize> = indices
            .into_iter()
            .filter(|&index| index < page_count)
            .collect();
        indices.sort_unstable();
        indices.dedup();
        Self { indices }
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Page numbers as a user would write them.
    pub fn one_based(&self) -> Vec<usize> {
        self.indices.iter().map(|index| index + 1).collect()
    }
}

impl fmt::Display for PageIndexSet {
    /// Formats 1-based page numbers, e.g. `[1, 4, 5, 6]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.one_based())
    }
}

/// Resolves the pages to redact.
///
/// A multi-page mask overrides `selection` entirely: pages
/// `0..min(input_pages, mask_pages)` are selected. Otherwise `All` selects
/// every input page and an explicit spec selects the listed pages. Pages
/// beyond the end of the input are dropped without error.
pub fn resolve_selection(
    selection: &PageSelection,
    input_pages: usize,
    mask_pages: usize,
) -> PageIndexSet {
    if MaskMode::from_mask_pages(mask_pages).is_per_page() {
        return PageIndexSet::from_indices(0..input_pages.min(mask_pages), input_pages);
    }

    match selection {
        PageSelection::All => PageIndexSet::from_indices(0..input_pages, input_pages),
        PageSelection::Explicit(spec) => {
            PageIndexSet::from_indices(spec.zero_based_below(input_pages), input_pages)
        }
    }
}
