//! Layout of the extracted-sticker summary workbooks.

use crate::classify::Section;
use crate::results::FileStickers;

/// Header of the file-name column.
pub const FILE_COLUMN_HEADER: &str = "PDF_File";

/// File name of the summary workbook for `section`.
pub fn section_file_name(section: Section) -> &'static str {
    match section {
        Section::Cal => "Extracted_Stickers_CAL.xlsx",
        Section::WoCal => "Extracted_Stickers_WO_CAL.xlsx",
    }
}

/// One summary sheet: a header row and one padded row per PDF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryTable {
    /// `PDF_File, Sticker1, .., StickerN`.
    pub header: Vec<String>,
    /// File name followed by its stickers, padded with empty strings.
    pub rows: Vec<Vec<String>>,
}

impl SummaryTable {
    /// Lay out a bucket of entries.
    ///
    /// The number of sticker columns is the longest sticker list in the
    /// bucket, so every row has the header's width.
    pub fn from_entries(entries: &[FileStickers]) -> Self {
        let sticker_columns = entries.iter().map(|e| e.stickers.len()).max().unwrap_or(0);

        let mut header = Vec::with_capacity(sticker_columns + 1);
        header.push(FILE_COLUMN_HEADER.to_string());
        header.extend((1..=sticker_columns).map(|i| format!("Sticker{i}")));

        let rows = entries
            .iter()
            .map(|entry| {
                let mut row = Vec::with_capacity(header.len());
                row.push(entry.file_name.clone());
                row.extend(entry.stickers.iter().cloned());
                row.resize(header.len(), String::new());
                row
            })
            .collect();

        Self { header, rows }
    }

    /// Whether the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
