//! PDF text extraction via the embedded text layer.
//!
//! Scanned PDFs without a text layer yield empty page strings; OCR is out
//! of scope.

use std::path::Path;

use super::ExtractionError;

/// Extract the text layer of every page, joined by newlines.
pub fn extract(path: &Path) -> Result<String, ExtractionError> {
    let bytes = std::fs::read(path).map_err(|source| ExtractionError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let pages = pdf_extract::extract_text_from_mem_by_pages(&bytes).map_err(|e| {
        ExtractionError::PdfParsing {
            path: path.to_path_buf(),
            message: e.to_string(),
        }
    })?;

    Ok(pages.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a minimal one-page PDF containing `text`, via lopdf.
    fn make_test_pdf(text: &str) -> Vec<u8> {
        use lopdf::dictionary;
        use lopdf::{Document, Object, Stream};

        let mut doc = Document::with_version("1.4");

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });

        let content = format!("BT /F1 12 Tf 100 700 Td ({text}) Tj ET");
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));

        let resources = dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        };

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Contents" => content_id,
            "Resources" => resources,
        });

        let pages_id = doc.add_object(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::Reference(page_id)],
            "Count" => 1,
        });

        // Kids reference their parent.
        if let Ok(Object::Dictionary(page)) = doc.get_object_mut(page_id) {
            page.set("Parent", Object::Reference(pages_id));
        }

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).expect("save test PDF");
        bytes
    }

    #[test]
    fn extracts_text_layer_from_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("checklist.pdf");
        std::fs::write(&path, make_test_pdf("PRISMA systematic review")).unwrap();

        let text = extract(&path).unwrap();
        assert!(text.contains("PRISMA systematic review"), "got: {text:?}");
    }

    #[test]
    fn garbage_bytes_are_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"not a pdf at all").unwrap();

        let err = extract(&path).unwrap_err();
        assert!(matches!(err, ExtractionError::PdfParsing { .. }));
    }
}
