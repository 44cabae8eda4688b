//! PDF inspection helpers.

use anyhow::Result;
use lopdf::Document;
use std::path::Path;

/// Number of pages in the PDF at `pdf_path`.
pub fn page_count(pdf_path: &Path) -> Result<usize> {
    Ok(Document::load(pdf_path)?.get_pages().len())
}

/// Decompressed content of every page, in page order.
pub fn page_contents(pdf_path: &Path) -> Result<Vec<Vec<u8>>> {
    let doc = Document::load(pdf_path)?;
    doc.get_pages()
        .into_values()
        .map(|page_id| Ok(doc.get_page_content(page_id)?))
        .collect()
}

/// How many times a mask form is drawn in a page content stream.
pub fn mask_draws(content: &[u8]) -> usize {
    let text = String::from_utf8_lossy(content);
    text.matches("/RedactMask").count()
}

/// True if `needle` occurs in `haystack`.
pub fn contains_bytes(haystack: &[u8], needle: &[u8]) -> bool {
    !needle.is_empty() && haystack.windows(needle.len()).any(|w| w == needle)
}

/// Validates that a PDF is loadable.
pub fn is_valid_pdf(pdf_path: &Path) -> bool {
    Document::load(pdf_path).is_ok()
}

/// File names in `dir`, sorted.
pub fn dir_listing(dir: &Path) -> Result<Vec<String>> {
    let mut names = std::fs::read_dir(dir)?
        .map(|entry| Ok(entry?.file_name().to_string_lossy().into_owned()))
        .collect::<Result<Vec<_>>>()?;
    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_draws() {
        assert_eq!(mask_draws(b"q\nBT ET\nQ\nq\n/RedactMask0 Do\nQ\n"), 1);
        assert_eq!(mask_draws(b"BT ET"), 0);
    }

    #[test]
    fn test_contains_bytes() {
        assert!(contains_bytes(b"abc", b"bc"));
        assert!(!contains_bytes(b"abc", b"cd"));
        assert!(!contains_bytes(b"abc", b""));
    }
}
