pub mod docx;
pub mod pdf;

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("unsupported file type '{extension}' for {path}: provide a .pdf, .docx, or .txt file")]
    UnsupportedFormat { path: PathBuf, extension: String },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse PDF {path}: {message}")]
    PdfParsing { path: PathBuf, message: String },

    #[error("failed to parse DOCX {path}: {message}")]
    DocxParsing { path: PathBuf, message: String },

    #[error("{path} is not valid UTF-8: {message}")]
    Encoding { path: PathBuf, message: String },
}

/// Extract raw text from a manuscript or checklist file.
///
/// Dispatches purely on the lower-cased file extension; `.pdf`, `.docx`
/// and `.txt` are supported.
pub fn extract_text(path: &Path) -> Result<String, ExtractionError> {
    if !path.exists() {
        return Err(ExtractionError::FileNotFound(path.to_path_buf()));
    }

    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    tracing::debug!(path = %path.display(), extension = %extension, "extracting text");

    match extension.as_str() {
        "pdf" => pdf::extract(path),
        "docx" => docx::extract(path),
        "txt" => std::fs::read_to_string(path).map_err(|source| ExtractionError::Io {
            path: path.to_path_buf(),
            source,
        }),
        _ => Err(ExtractionError::UnsupportedFormat {
            path: path.to_path_buf(),
            extension,
        }),
    }
}
