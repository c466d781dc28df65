//! Filled-checklist PDF rendering via `printpdf`.
//!
//! One flow: title, optional general guidance block, then per section a
//! heading, its guidance, and each item with its answer. A fresh page is
//! started whenever the cursor reaches the bottom margin.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use printpdf::*;
use thiserror::Error;

use crate::checklist::{AnswerRecord, Section};

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("PDF layout error: {0}")]
    Layout(String),

    #[error("failed to write report to {path}: {message}")]
    Io { path: PathBuf, message: String },
}

// A4 geometry, in millimetres.
const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const TOP_Y: f32 = 280.0;
const BOTTOM_Y: f32 = 20.0;
const MARGIN_X: f32 = 20.0;
const INDENT_X: f32 = 25.0;

/// Render the filled checklist to `output_path`.
///
/// `answers` is grouped per section, in the same order as `sections`.
pub fn render(
    output_path: &Path,
    checklist_display_name: &str,
    sections: &[Section],
    answers: &[Vec<AnswerRecord>],
    general_guidance: Option<&str>,
) -> Result<(), ReportError> {
    tracing::info!(path = %output_path.display(), "creating PDF report");

    let title = format!("Filled Checklist: {checklist_display_name}");
    let (doc, page1, layer1) = PdfDocument::new(&title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");

    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ReportError::Layout(format!("font error: {e}")))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ReportError::Layout(format!("font error: {e}")))?;
    let oblique = doc
        .add_builtin_font(BuiltinFont::HelveticaOblique)
        .map_err(|e| ReportError::Layout(format!("font error: {e}")))?;

    {
        let mut cursor = Cursor {
            doc: &doc,
            layer: doc.get_page(page1).get_layer(layer1),
            y: TOP_Y,
        };

        cursor.line(&title, 14.0, MARGIN_X, &bold, 10.0);

        if let Some(guidance) = general_guidance {
            cursor.line("General Guidance:", 12.0, MARGIN_X, &bold, 6.0);
            cursor.wrapped(guidance, 9.0, MARGIN_X, &oblique, 90, 4.5);
            cursor.space(6.0);
        }

        for (section_index, (section, section_answers)) in
            sections.iter().zip(answers).enumerate()
        {
            let heading = format!("Section {}: {}", section_index + 1, section.name);
            cursor.wrapped(&heading, 12.0, MARGIN_X, &bold, 80, 6.0);

            if !section.guidance.is_empty() {
                cursor.line("Guidance:", 10.0, MARGIN_X, &bold, 5.0);
                cursor.wrapped(&section.guidance, 9.0, MARGIN_X, &oblique, 90, 4.5);
                cursor.space(2.0);
            }

            for (item_index, record) in section_answers.iter().enumerate() {
                let item_heading = format!(
                    "Item {}.{}: {}",
                    section_index + 1,
                    item_index + 1,
                    record.item_text
                );
                cursor.wrapped(&item_heading, 10.0, MARGIN_X, &bold, 85, 5.0);
                cursor.wrapped(&record.answer, 9.0, INDENT_X, &font, 80, 4.5);
                cursor.space(3.0);
            }

            cursor.space(6.0);
        }
    }

    let file = File::create(output_path).map_err(|e| ReportError::Io {
        path: output_path.to_path_buf(),
        message: e.to_string(),
    })?;
    let mut writer = BufWriter::new(file);
    doc.save(&mut writer).map_err(|e| ReportError::Io {
        path: output_path.to_path_buf(),
        message: e.to_string(),
    })?;

    tracing::info!(path = %output_path.display(), "PDF report written");
    Ok(())
}

/// Descending text cursor that opens a new page at the bottom margin.
struct Cursor<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    y: f32,
}

impl Cursor<'_> {
    fn ensure_room(&mut self, advance: f32) {
        if self.y - advance < BOTTOM_Y {
            let (page, layer) = self
                .doc
                .add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = TOP_Y;
        }
    }

    fn line(&mut self, text: &str, size: f32, x: f32, font: &IndirectFontRef, advance: f32) {
        self.ensure_room(advance);
        self.layer.use_text(text, size, Mm(x), Mm(self.y), font);
        self.y -= advance;
    }

    fn wrapped(
        &mut self,
        text: &str,
        size: f32,
        x: f32,
        font: &IndirectFontRef,
        max_chars: usize,
        advance: f32,
    ) {
        for line in wrap_text(text, max_chars) {
            self.line(&line, size, x, font, advance);
        }
    }

    fn space(&mut self, gap: f32) {
        self.y -= gap;
    }
}

/// Simple word-wrap helper for PDF text rendering.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.len() + word.len() + 1 > max_chars && !current.is_empty() {
            lines.push(current.clone());
            current.clear();
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
