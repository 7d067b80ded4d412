//! qls-sticker-core: Backend-independent types and algorithms for the QLS
//! sticker processor.
//!
//! The crate knows nothing about PDF parsing or spreadsheet file formats.
//! It provides:
//!
//! - [`CellGrid`]: the in-memory form of a converted table grid
//! - [`StickerFilter`]: the heuristic that picks sticker labels out of a column
//! - [`classify`]: section/program bucketing from folder names
//! - [`ExtractionResults`] and [`SummaryTable`]: aggregation and summary layout
//! - [`apply_rows`]: the label-matching write-back pass against a [`MasterSheet`]

pub mod classify;
pub mod error;
pub mod grid;
pub mod mapping;
pub mod results;
pub mod sticker;
pub mod summary;

pub use classify::{ClassifyMode, Program, Section, classify};
pub use error::StickerError;
pub use grid::CellGrid;
pub use mapping::{
    ApplyReport, MANUAL_LABEL_HEADER, MappingBook, MappingRow, MappingSheet, MasterSheet,
    ProgramTargets, SheetTargets, WriteBackLayout, apply_rows, normalize_label, updated_file_name,
};
pub use results::{ExtractionResults, FileStickers};
pub use sticker::{Rejection, StickerFilter};
pub use summary::{FILE_COLUMN_HEADER, SummaryTable, section_file_name};
