//! Test fixtures and PDF builders.
//!
//! Text documents are generated with `printpdf`; masks and empty documents
//! are assembled directly with `lopdf`.

use anyhow::Result;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use printpdf::{BuiltinFont, Mm, PdfDocument};
use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Builder for multi-page text PDFs.
///
/// # Example
///
/// ```no_run
/// # use anyhow::Result;
/// # fn main() -> Result<()> {
/// let pdf = TestPdfBuilder::new()
///     .with_pages(6)
///     .with_content("CONFIDENTIAL")
///     .build(std::path::Path::new("/tmp/scan.pdf"))?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TestPdfBuilder {
    title: String,
    pages: usize,
    custom_content: Vec<String>,
    page_width: Mm,
    page_height: Mm,
}

impl TestPdfBuilder {
    /// Creates a single-page A4 builder.
    pub fn new() -> Self {
        Self {
            title: "Scanned Document".to_string(),
            pages: 1,
            custom_content: Vec::new(),
            page_width: Mm(210.0),
            page_height: Mm(297.0),
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    /// Sets the number of pages; must be at least 1.
    pub fn with_pages(mut self, pages: usize) -> Self {
        self.pages = pages;
        self
    }

    /// Adds a line written on every page.
    pub fn with_content(mut self, content: &str) -> Self {
        self.custom_content.push(content.to_string());
        self
    }

    /// Builds the PDF and writes it to `output_path`.
    ///
    /// Page `n` (1-based) carries the text `Page n of N`.
    pub fn build(self, output_path: &Path) -> Result<PathBuf> {
        assert!(self.pages > 0, "printpdf documents need at least one page");

        let (doc, first_page, first_layer) =
            PdfDocument::new(&self.title, self.page_width, self.page_height, "Layer 1");
        let font = doc.add_builtin_font(BuiltinFont::Helvetica)?;

        let mut layers = vec![(first_page, first_layer)];
        for _ in 1..self.pages {
            layers.push(doc.add_page(self.page_width, self.page_height, "Layer 1"));
        }

        for (index, (page, layer)) in layers.into_iter().enumerate() {
            let current_layer = doc.get_page(page).get_layer(layer);
            current_layer.use_text(
                format!("Page {} of {}", index + 1, self.pages),
                14.0,
                Mm(20.0),
                Mm(270.0),
                &font,
            );
            for (line, content) in self.custom_content.iter().enumerate() {
                current_layer.use_text(
                    content.clone(),
                    12.0,
                    Mm(20.0),
                    Mm(250.0 - 10.0 * line as f32),
                    &font,
                );
            }
        }

        doc.save(&mut BufWriter::new(fs::File::create(output_path)?))?;
        Ok(output_path.to_path_buf())
    }
}

impl Default for TestPdfBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn name(value: &str) -> Object {
    Object::Name(value.as_bytes().to_vec())
}

/// Assembles a document from raw page content streams.
fn assemble(contents: &[Vec<u8>]) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let kids: Vec<ObjectId> = contents
        .iter()
        .map(|content| {
            let content_id = doc.add_object(Stream::new(Dictionary::new(), content.clone()));
            let mut page = Dictionary::new();
            page.set("Type", name("Page"));
            page.set("Parent", Object::Reference(pages_id));
            page.set("Contents", Object::Reference(content_id));
            page.set("Resources", Object::Dictionary(Dictionary::new()));
            page.set(
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(595),
                    Object::Integer(842),
                ]),
            );
            doc.add_object(page)
        })
        .collect();

    let mut pages = Dictionary::new();
    pages.set("Type", name("Pages"));
    pages.set("Count", Object::Integer(kids.len() as i64));
    pages.set(
        "Kids",
        Object::Array(kids.into_iter().map(Object::Reference).collect()),
    );
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let mut catalog = Dictionary::new();
    catalog.set("Type", name("Catalog"));
    catalog.set("Pages", Object::Reference(pages_id));
    let catalog_id = doc.add_object(catalog);
    doc.trailer.set("Root", Object::Reference(catalog_id));

    doc
}

/// Content stream of mask page `index` (zero-based) written by
/// [`create_mask`]: one filled black rectangle, lower on later pages.
pub fn mask_page_content(index: usize) -> Vec<u8> {
    format!("0 g 50 {} 400 40 re f", 700 - 50 * index).into_bytes()
}

/// Writes a mask PDF with `pages` pages.
pub fn create_mask(path: &Path, pages: usize) -> Result<PathBuf> {
    let contents: Vec<Vec<u8>> = (0..pages).map(mask_page_content).collect();
    assemble(&contents).save(path)?;
    Ok(path.to_path_buf())
}

/// Writes a structurally valid PDF with no pages.
pub fn create_empty_pdf(path: &Path) -> Result<PathBuf> {
    assemble(&[]).save(path)?;
    Ok(path.to_path_buf())
}

/// Writes a text PDF with `pages` pages.
pub fn create_scan(path: &Path, pages: usize) -> Result<PathBuf> {
    TestPdfBuilder::new().with_pages(pages).build(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_builder_pattern() {
        let builder = TestPdfBuilder::new()
            .with_title("Test")
            .with_pages(3)
            .with_content("SSN 078-05-1120");

        assert_eq!(builder.title, "Test");
        assert_eq!(builder.pages, 3);
        assert_eq!(builder.custom_content.len(), 1);
    }

    #[test]
    fn test_create_mask() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = create_mask(&temp_dir.path().join("mask.pdf"), 2)?;
        assert_eq!(Document::load(&path)?.get_pages().len(), 2);
        Ok(())
    }
}
