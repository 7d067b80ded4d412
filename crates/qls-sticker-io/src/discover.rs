//! Recursive PDF discovery.

use std::path::{Path, PathBuf};

use qls_sticker_core::StickerError;
use walkdir::WalkDir;

/// A PDF found under the base folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfSource {
    /// Full path of the PDF.
    pub path: PathBuf,
    /// File name without folder.
    pub file_name: String,
    /// Full parent folder, as walked from the base folder.
    pub folder: String,
    /// Parent folder relative to the base folder (empty for top-level files).
    pub relative_folder: String,
}

impl PdfSource {
    /// File stem used for the converted workbook name.
    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.file_name.clone())
    }

    /// Path of the converted workbook below the temp folder.
    ///
    /// Mirrors the relative folder so equal stems in different folders do
    /// not share a workbook.
    pub fn converted_name(&self) -> PathBuf {
        Path::new(&self.relative_folder).join(format!("{}.xlsx", self.stem()))
    }
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case("pdf"))
}

/// Collect every `.pdf` file (case-insensitive) under `base`, recursively.
///
/// Entries are sorted by file name within each folder so runs are
/// reproducible. Unreadable entries are logged and skipped.
pub fn discover_pdfs(base: &Path) -> Result<Vec<PdfSource>, StickerError> {
    if !base.is_dir() {
        return Err(StickerError::NotFound(base.to_path_buf()));
    }

    let mut sources = Vec::new();

    for entry in WalkDir::new(base).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("skipping unreadable entry: {e}");
                continue;
            }
        };

        // `Path::is_file` follows symlinks, so linked PDFs are picked up too.
        if !is_pdf(entry.path()) || !entry.path().is_file() {
            continue;
        }

        let path = entry.path().to_path_buf();
        let parent = path.parent().unwrap_or(base);
        let relative_folder = parent
            .strip_prefix(base)
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default();

        sources.push(PdfSource {
            file_name: entry.file_name().to_string_lossy().into_owned(),
            folder: parent.to_string_lossy().into_owned(),
            relative_folder,
            path,
        });
    }

    tracing::info!("found {} PDF file(s) under {}", sources.len(), base.display());
    Ok(sources)
}
