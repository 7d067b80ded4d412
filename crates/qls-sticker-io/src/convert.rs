//! PDF table conversion.
//!
//! Every table on every page is detected with `pdfplumber` and its rows are
//! stacked into one [`CellGrid`], page order first, then table order.

use std::path::Path;

use pdfplumber::{Pdf, TableSettings};
use qls_sticker_core::{CellGrid, StickerError};

use crate::workbook::write_grid;

/// Detect the tables of a PDF and stack their rows into one grid.
///
/// Returns `Ok(None)` when the document has no table rows.
pub fn pdf_to_grid(path: &Path, settings: &TableSettings) -> Result<Option<CellGrid>, StickerError> {
    if !path.exists() {
        return Err(StickerError::NotFound(path.to_path_buf()));
    }

    let pdf = Pdf::open_file(path, None).map_err(|e| StickerError::pdf(path, e))?;
    let mut grid = CellGrid::new();

    for idx in 0..pdf.page_count() {
        let page = pdf
            .page(idx)
            .map_err(|e| StickerError::pdf(path, format!("page {}: {e}", idx + 1)))?;

        for table in page.find_tables(settings) {
            grid.extend_rows(
                table
                    .rows
                    .into_iter()
                    .map(|row| row.into_iter().map(|cell| cell.text).collect()),
            );
        }
    }

    tracing::debug!(
        "{}: {} table row(s) across {} page(s)",
        path.display(),
        grid.row_count(),
        pdf.page_count()
    );

    Ok((!grid.is_empty()).then_some(grid))
}

/// Convert a PDF's tables into a workbook at `out`.
///
/// The workbook is only written when tables were found; the grid is returned
/// so callers can work on it without reading the file back.
pub fn convert_pdf(
    path: &Path,
    out: &Path,
    settings: &TableSettings,
) -> Result<Option<CellGrid>, StickerError> {
    let Some(grid) = pdf_to_grid(path, settings)? else {
        return Ok(None);
    };
    write_grid(&grid, out)?;
    Ok(Some(grid))
}
