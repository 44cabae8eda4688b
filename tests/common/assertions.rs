//! Custom assertions for mask redaction testing.

use super::pdf_helpers::{contains_bytes, mask_draws, page_contents};
use std::path::Path;

fn contents_or_panic(pdf_path: &Path) -> Vec<Vec<u8>> {
    page_contents(pdf_path)
        .unwrap_or_else(|e| panic!("Failed to read PDF '{}': {}", pdf_path.display(), e))
}

/// Asserts that exactly the zero-based `pages` carry a mask.
///
/// # Panics
/// Panics if a listed page has no mask or an unlisted page has one.
pub fn assert_masked_pages(pdf_path: &Path, pages: &[usize]) {
    let masked: Vec<usize> = contents_or_panic(pdf_path)
        .iter()
        .enumerate()
        .filter(|(_, content)| mask_draws(content) > 0)
        .map(|(index, _)| index)
        .collect();

    assert_eq!(
        masked,
        pages,
        "Unexpected masked pages in '{}'",
        pdf_path.display()
    );
}

/// Asserts that unmasked pages of `output` have exactly the content of the
/// corresponding pages of `input`, and masked pages still contain it.
///
/// # Panics
/// Panics if page counts differ or any original content is missing.
pub fn assert_original_content_kept(input: &Path, output: &Path) {
    let before = contents_or_panic(input);
    let after = contents_or_panic(output);

    assert_eq!(
        before.len(),
        after.len(),
        "Output page count should equal input page count"
    );

    for (index, (original, written)) in before.iter().zip(after.iter()).enumerate() {
        if mask_draws(written) == 0 {
            assert_eq!(
                original, written,
                "Unmasked page {} should be an identical copy",
                index + 1
            );
        } else {
            assert!(
                contains_bytes(written, original),
                "Masked page {} should still carry its original content",
                index + 1
            );
        }
    }
}
