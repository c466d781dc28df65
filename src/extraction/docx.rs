//! DOCX text extraction.
//!
//! A DOCX file is a ZIP archive; the body lives in `word/document.xml` as
//! `w:t` text runs grouped into `w:p` paragraphs. Only paragraph text is
//! recovered; tables, headers and footers keep whatever run text they carry.

use std::io::Read;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use super::ExtractionError;

/// Extract paragraph text, one line per `w:p` paragraph.
pub fn extract(path: &Path) -> Result<String, ExtractionError> {
    let file = std::fs::File::open(path).map_err(|source| ExtractionError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut archive = ZipArchive::new(file).map_err(|e| ExtractionError::DocxParsing {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut document_xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| ExtractionError::DocxParsing {
            path: path.to_path_buf(),
            message: format!("missing word/document.xml: {e}"),
        })?
        .read_to_string(&mut document_xml)
        .map_err(|e| ExtractionError::Encoding {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    parse_document_xml(&document_xml).map_err(|message| ExtractionError::DocxParsing {
        path: path.to_path_buf(),
        message,
    })
}

fn parse_document_xml(xml: &str) -> Result<String, String> {
    let mut reader = Reader::from_str(xml);
    let mut text = String::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.name().as_ref() == b"w:t" => in_text_run = true,
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_text_run = false,
                b"w:p" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Text(t)) if in_text_run => {
                text.push_str(&t.unescape().map_err(|e| e.to_string())?);
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(e.to_string()),
        }
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const DOCUMENT_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>Methods</w:t></w:r></w:p>
    <w:p><w:r><w:t>Describe the study </w:t></w:r><w:r><w:t>design &amp; setting</w:t></w:r></w:p>
  </w:body>
</w:document>"#;

    fn make_test_docx(document_xml: &str) -> Vec<u8> {
        let mut buf = Vec::new();
        {
            let mut writer = zip::ZipWriter::new(std::io::Cursor::new(&mut buf));
            let options = zip::write::SimpleFileOptions::default();
            writer.start_file("word/document.xml", options).unwrap();
            writer.write_all(document_xml.as_bytes()).unwrap();
            writer.finish().unwrap();
        }
        buf
    }

    #[test]
    fn extracts_paragraphs_as_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manuscript.docx");
        std::fs::write(&path, make_test_docx(DOCUMENT_XML)).unwrap();

        let text = extract(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["Methods", "Describe the study design & setting"]);
    }

    #[test]
    fn archive_without_document_xml_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.docx");

        let mut buf = Vec::new();
        {
            let mut writer = zip::ZipWriter::new(std::io::Cursor::new(&mut buf));
            let options = zip::write::SimpleFileOptions::default();
            writer.start_file("other.txt", options).unwrap();
            writer.write_all(b"nothing").unwrap();
            writer.finish().unwrap();
        }
        std::fs::write(&path, buf).unwrap();

        let err = extract(&path).unwrap_err();
        assert!(matches!(err, ExtractionError::DocxParsing { .. }));
    }

    #[test]
    fn non_zip_bytes_are_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.docx");
        std::fs::write(&path, b"plainly not a zip").unwrap();

        assert!(matches!(
            extract(&path).unwrap_err(),
            ExtractionError::DocxParsing { .. }
        ));
    }
}
