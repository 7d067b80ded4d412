//! Error type shared by the sticker processor crates.

use std::path::PathBuf;

/// Fatal errors for a single processing step.
///
/// The pipeline treats most of these as per-file failures: the offending PDF
/// or master is logged and skipped, and processing continues.
#[derive(Debug, thiserror::Error)]
pub enum StickerError {
    /// I/O error on a specific path.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Path being read or written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The PDF could not be opened or a page could not be read.
    #[error("PDF error in {path}: {message}")]
    Pdf {
        /// Path of the PDF.
        path: PathBuf,
        /// Message from the PDF backend.
        message: String,
    },
    /// A workbook could not be read, modified or saved.
    #[error("workbook error in {path}: {message}")]
    Workbook {
        /// Path of the workbook.
        path: PathBuf,
        /// Message from the spreadsheet backend.
        message: String,
    },
    /// A required input file or folder does not exist.
    #[error("not found: {0}")]
    NotFound(PathBuf),
}

impl StickerError {
    /// Build an [`StickerError::Io`] for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StickerError::Io {
            path: path.into(),
            source,
        }
    }

    /// Build a [`StickerError::Pdf`] from any displayable backend error.
    pub fn pdf(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        StickerError::Pdf {
            path: path.into(),
            message: err.to_string(),
        }
    }

    /// Build a [`StickerError::Workbook`] from any displayable backend error.
    pub fn workbook(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        StickerError::Workbook {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_io_error_includes_path() {
        let err = StickerError::io(
            "/tmp/missing.xlsx",
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        );
        let msg = err.to_string();
        assert!(msg.contains("/tmp/missing.xlsx"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn display_pdf_error() {
        let err = StickerError::pdf("a.pdf", "parse error: bad xref");
        assert_eq!(err.to_string(), "PDF error in a.pdf: parse error: bad xref");
    }

    #[test]
    fn display_workbook_error() {
        let err = StickerError::workbook("m.xlsx", "zip error");
        assert_eq!(err.to_string(), "workbook error in m.xlsx: zip error");
    }

    #[test]
    fn display_not_found() {
        let err = StickerError::NotFound(PathBuf::from("/data/pdfs"));
        assert_eq!(err.to_string(), "not found: /data/pdfs");
    }

    #[test]
    fn io_error_exposes_source() {
        use std::error::Error;
        let err = StickerError::io("x", std::io::Error::other("boom"));
        assert!(err.source().is_some());
    }
}
