//! `.xlsx` reading and writing.
//!
//! Converted grids, summary workbooks and updated masters are written with
//! `umya-spreadsheet`, which can also load an existing master, edit a few
//! cells and save it without dropping the rest of the workbook.

use std::path::{Path, PathBuf};

use qls_sticker_core::{
    ApplyReport, CellGrid, ExtractionResults, MANUAL_LABEL_HEADER, MappingBook, MappingRow,
    MappingSheet, MasterSheet, Program, Section, SheetTargets, StickerError, SummaryTable,
    WriteBackLayout, apply_rows, section_file_name, updated_file_name,
};
use umya_spreadsheet::{Spreadsheet, Worksheet};

/// Sheet name of converted grids.
const GRID_SHEET: &str = "Sheet1";

fn read_book(path: &Path) -> Result<Spreadsheet, StickerError> {
    if !path.exists() {
        return Err(StickerError::NotFound(path.to_path_buf()));
    }
    umya_spreadsheet::reader::xlsx::read(path).map_err(|e| StickerError::workbook(path, e))
}

fn save_book(book: &Spreadsheet, path: &Path) -> Result<(), StickerError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| StickerError::io(parent, e))?;
    }
    umya_spreadsheet::writer::xlsx::write(book, path).map_err(|e| StickerError::workbook(path, e))
}

fn add_sheet<'a>(
    book: &'a mut Spreadsheet,
    name: &str,
    path: &Path,
) -> Result<&'a mut Worksheet, StickerError> {
    book.new_sheet(name)
        .map_err(|e| StickerError::workbook(path, format!("cannot add sheet {name:?}: {e}")))
}

/// Cell text at 1-based (`column`, `row`), `None` when empty.
fn cell_text(sheet: &Worksheet, column: u32, row: u32) -> Option<String> {
    let value = sheet.get_value((column, row));
    (!value.is_empty()).then_some(value)
}

fn write_row(sheet: &mut Worksheet, row: u32, cells: &[String]) {
    for (col, text) in (1u32..).zip(cells) {
        if !text.is_empty() {
            sheet.get_cell_mut((col, row)).set_value_string(text.as_str());
        }
    }
}

/// Write a grid to `path` as a single sheet without a header row.
pub fn write_grid(grid: &CellGrid, path: &Path) -> Result<(), StickerError> {
    let mut book = umya_spreadsheet::new_file_empty_worksheet();
    let sheet = add_sheet(&mut book, GRID_SHEET, path)?;

    for (row_idx, row) in (1u32..).zip(grid.rows()) {
        for (col_idx, cell) in (1u32..).zip(row) {
            if let Some(text) = cell.as_deref().filter(|t| !t.is_empty()) {
                sheet.get_cell_mut((col_idx, row_idx)).set_value_string(text);
            }
        }
    }

    save_book(&book, path)
}

/// Read the first column of the first sheet of a workbook, top to bottom.
pub fn read_first_column(path: &Path) -> Result<Vec<Option<String>>, StickerError> {
    let book = read_book(path)?;
    let Some(sheet) = book.get_sheet_collection().first() else {
        return Ok(Vec::new());
    };

    Ok((1..=sheet.get_highest_row())
        .map(|row| cell_text(sheet, 1, row))
        .collect())
}

/// Write the summary workbook of `section` into `out_dir`.
///
/// Each program with data gets one sheet. When the section has no data at
/// all, nothing is written and a stale workbook of the same name is removed.
pub fn write_summary(
    section: Section,
    results: &ExtractionResults,
    out_dir: &Path,
) -> Result<Option<PathBuf>, StickerError> {
    let path = out_dir.join(section_file_name(section));

    if results.is_section_empty(section) {
        match std::fs::remove_file(&path) {
            Ok(()) => tracing::info!("removed stale {}", path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(StickerError::io(&path, e)),
        }
        return Ok(None);
    }

    let mut book = umya_spreadsheet::new_file_empty_worksheet();
    for program in Program::ALL {
        let entries = results.bucket(section, program);
        if entries.is_empty() {
            continue;
        }

        let table = SummaryTable::from_entries(entries);
        let sheet = add_sheet(&mut book, program.as_str(), &path)?;
        write_row(sheet, 1, &table.header);
        for (row_idx, row) in (2u32..).zip(&table.rows) {
            write_row(sheet, row_idx, row);
        }
        tracing::info!("{section} - {program}: {} row(s) saved", table.rows.len());
    }

    save_book(&book, &path)?;
    Ok(Some(path))
}

/// Load every sheet of a mapping workbook.
///
/// The first row is the header. The label column is the one headed
/// `Manual_label`; sheets without it load with every label missing.
pub fn load_mapping(path: &Path) -> Result<MappingBook, StickerError> {
    let book = read_book(path)?;
    let mut sheets = Vec::new();

    for sheet in book.get_sheet_collection() {
        let width = sheet.get_highest_column();
        let label_col = (1..=width).find(|&col| {
            cell_text(sheet, col, 1).is_some_and(|h| h.trim() == MANUAL_LABEL_HEADER)
        });
        if label_col.is_none() {
            tracing::warn!(
                "mapping sheet {:?} has no {MANUAL_LABEL_HEADER} column",
                sheet.get_name()
            );
        }

        let rows = (2..=sheet.get_highest_row())
            .map(|row| MappingRow {
                label: label_col.and_then(|col| cell_text(sheet, col, row)),
                cells: (1..=width).map(|col| cell_text(sheet, col, row)).collect(),
            })
            .collect();

        sheets.push(MappingSheet {
            name: sheet.get_name().to_string(),
            rows,
        });
    }

    Ok(MappingBook { sheets })
}

/// A master worksheet seen through its label column.
struct MasterWorksheet<'a> {
    sheet: &'a mut Worksheet,
    label_column: u32,
}

impl MasterSheet for MasterWorksheet<'_> {
    fn last_row(&self) -> u32 {
        self.sheet.get_highest_row()
    }

    fn label(&self, row: u32) -> Option<String> {
        cell_text(&*self.sheet, self.label_column, row)
    }

    fn write(&mut self, row: u32, column: u32, value: &str) {
        self.sheet.get_cell_mut((column, row)).set_value_string(value);
    }
}

/// What happened to one section of a master.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionStatus {
    /// The mapping sheet was applied.
    Applied(ApplyReport),
    /// The master has no worksheet with this name.
    MissingSheet(String),
    /// The mapping workbook has no sheet with this name.
    MissingMapping(String),
}

/// Per-section outcome of a master update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionOutcome {
    /// Section the outcome belongs to.
    pub section: Section,
    /// What happened.
    pub status: SectionStatus,
}

/// Result of updating one master workbook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MasterOutcome {
    /// Program of the master.
    pub program: Program,
    /// Path of the saved `[UPDATED] ...` copy.
    pub output: PathBuf,
    /// One entry per section, in section order.
    pub sections: Vec<SectionOutcome>,
}

/// Apply the mapping for `program` to a master workbook and save the result
/// as `[UPDATED] <name>` in `out_dir`. The master itself is left untouched.
pub fn apply_to_master(
    master: &Path,
    program: Program,
    mapping: &MappingBook,
    targets: &SheetTargets,
    layout: &WriteBackLayout,
    out_dir: &Path,
) -> Result<MasterOutcome, StickerError> {
    let mut book = read_book(master)?;
    let mut sections = Vec::with_capacity(Section::ALL.len());

    for section in Section::ALL {
        let target = targets.get(program, section);
        let mapping_name = MappingBook::sheet_name(program, section);

        let status = match mapping.sheet(&mapping_name) {
            None => {
                tracing::warn!("mapping sheet {mapping_name:?} not found");
                SectionStatus::MissingMapping(mapping_name)
            }
            Some(mapping_sheet) => {
                let sheet = book
                    .get_sheet_collection_mut()
                    .iter_mut()
                    .find(|s| s.get_name() == target);
                match sheet {
                    None => {
                        tracing::warn!("sheet {target:?} not found in {}", master.display());
                        SectionStatus::MissingSheet(target.to_string())
                    }
                    Some(sheet) => {
                        let mut master_sheet = MasterWorksheet {
                            sheet,
                            label_column: layout.label_column,
                        };
                        let report = apply_rows(&mut master_sheet, &mapping_sheet.rows, layout);
                        tracing::info!(
                            "{program} {section}: {} label(s) matched, {} unmatched",
                            report.matched,
                            report.unmatched.len()
                        );
                        SectionStatus::Applied(report)
                    }
                }
            }
        };

        sections.push(SectionOutcome { section, status });
    }

    let output = out_dir.join(updated_file_name(master));
    save_book(&book, &output)?;

    Ok(MasterOutcome {
        program,
        output,
        sections,
    })
}
