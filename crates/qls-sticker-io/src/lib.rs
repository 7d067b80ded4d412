//! qls-sticker-io: file-system and format adapters for the QLS sticker processor.
//!
//! - [`discover`]: recursive PDF discovery under a base folder
//! - [`convert`]: PDF table detection via `pdfplumber`, producing a [`CellGrid`]
//! - [`workbook`]: `.xlsx` reading and writing via `umya-spreadsheet`
//!
//! [`CellGrid`]: qls_sticker_core::CellGrid

pub mod convert;
pub mod discover;
pub mod workbook;

pub use convert::{convert_pdf, pdf_to_grid};
pub use discover::{PdfSource, discover_pdfs};
pub use pdfplumber::{Strategy, TableSettings};
pub use workbook::{
    MasterOutcome, SectionOutcome, SectionStatus, apply_to_master, load_mapping,
    read_first_column, write_grid, write_summary,
};
