use std::path::Path;

use qls_sticker_core::StickerFilter;
use qls_sticker_io::{TableSettings, pdf_to_grid, read_first_column};

use crate::cli::{ReportFormat, TableStrategy};
use crate::shared::build_table_settings;

pub fn run(file: &Path, strategy: TableStrategy, format: ReportFormat) -> Result<(), i32> {
    if !file.exists() {
        eprintln!("Error: file not found: {}", file.display());
        return Err(1);
    }

    let settings = build_table_settings(strategy);
    let stickers = stickers_for(file, &settings).map_err(|e| {
        eprintln!("Error: {e}");
        1
    })?;

    match format {
        ReportFormat::Text => {
            if stickers.is_empty() {
                println!("No stickers found.");
            }
            for sticker in &stickers {
                println!("{sticker}");
            }
        }
        ReportFormat::Json => {
            let value = serde_json::json!({
                "file": file.display().to_string(),
                "stickers": stickers,
            });
            println!("{value}");
        }
    }

    Ok(())
}

fn is_workbook(file: &Path) -> bool {
    file.extension().is_some_and(|ext| {
        let ext = ext.to_string_lossy();
        ext.eq_ignore_ascii_case("xlsx") || ext.eq_ignore_ascii_case("xlsm")
    })
}

/// Stickers of a PDF, or of a workbook converted by an earlier run.
fn stickers_for(
    file: &Path,
    settings: &TableSettings,
) -> Result<Vec<String>, qls_sticker_core::StickerError> {
    let filter = StickerFilter::default();

    if is_workbook(file) {
        let column = read_first_column(file)?;
        return Ok(filter.extract(column.iter().map(Option::as_deref)));
    }

    Ok(pdf_to_grid(file, settings)?
        .map(|grid| filter.extract_from_grid(&grid))
        .unwrap_or_default())
}
