//! Label-matching write-back into master worksheets.
//!
//! A mapping workbook holds one sheet per (program, section) pair, named
//! `"<PROGRAM> <SECTION>"`. Each mapping row names a `Manual_label` and carries
//! the values to copy. For every mapping row the master worksheet is scanned
//! for the first row whose label column matches; the mapped values are then
//! written into a fixed column range of that row.

use std::path::Path;

use crate::classify::{Program, Section};

/// Header of the label column in mapping sheets.
pub const MANUAL_LABEL_HEADER: &str = "Manual_label";

/// Normalize a label for comparison: trimmed and upper-cased.
pub fn normalize_label(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// File name for an updated copy of `master`: `[UPDATED] <file name>`.
pub fn updated_file_name(master: &Path) -> String {
    let name = master
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("[UPDATED] {name}")
}

/// One data row of a mapping sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingRow {
    /// Value of the `Manual_label` column, if present.
    pub label: Option<String>,
    /// Every cell of the row by 0-based column position.
    pub cells: Vec<Option<String>>,
}

impl MappingRow {
    /// Non-empty cell at 0-based column `index`.
    pub fn cell(&self, index: usize) -> Option<&str> {
        self.cells
            .get(index)
            .and_then(|c| c.as_deref())
            .filter(|v| !v.is_empty())
    }
}

/// One sheet of the mapping workbook.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingSheet {
    /// Sheet name, e.g. `BX726 WO CAL`.
    pub name: String,
    /// Data rows below the header row.
    pub rows: Vec<MappingRow>,
}

/// All sheets of a mapping workbook.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingBook {
    /// Sheets in workbook order.
    pub sheets: Vec<MappingSheet>,
}

impl MappingBook {
    /// Name of the mapping sheet for a (program, section) pair.
    pub fn sheet_name(program: Program, section: Section) -> String {
        format!("{program} {section}")
    }

    /// Look up a sheet by exact name.
    pub fn sheet(&self, name: &str) -> Option<&MappingSheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    /// The mapping sheet for a (program, section) pair.
    pub fn sheet_for(&self, program: Program, section: Section) -> Option<&MappingSheet> {
        self.sheet(&Self::sheet_name(program, section))
    }
}

/// Master worksheet names for one program.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProgramTargets {
    /// Worksheet receiving the `CAL` mapping.
    #[cfg_attr(feature = "serde", serde(rename = "CAL"))]
    pub cal: String,
    /// Worksheet receiving the `WO CAL` mapping.
    #[cfg_attr(feature = "serde", serde(rename = "WO CAL"))]
    pub wo_cal: String,
}

/// Master worksheet names per (program, section).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SheetTargets {
    /// Targets in the BX726 master.
    #[cfg_attr(feature = "serde", serde(rename = "BX726"))]
    pub bx726: ProgramTargets,
    /// Targets in the V769 master.
    #[cfg_attr(feature = "serde", serde(rename = "V769"))]
    pub v769: ProgramTargets,
}

impl Default for SheetTargets {
    fn default() -> Self {
        Self {
            bx726: ProgramTargets {
                cal: "BX726 Plant Cont. Items_CAL 1".to_string(),
                wo_cal: "BX726 Plant Cont. Items_WO CAL1".to_string(),
            },
            v769: ProgramTargets {
                cal: "V769 Plant Cont. Items_CAL".to_string(),
                wo_cal: "V769 Plant Cont. Items_WO CAL".to_string(),
            },
        }
    }
}

impl SheetTargets {
    /// Worksheet name for a (program, section) pair.
    pub fn get(&self, program: Program, section: Section) -> &str {
        let targets = match program {
            Program::Bx726 => &self.bx726,
            Program::V769 => &self.v769,
        };
        match section {
            Section::Cal => &targets.cal,
            Section::WoCal => &targets.wo_cal,
        }
    }
}

/// Where labels are read and values are written. Rows and target columns
/// are 1-based worksheet coordinates; the source column is a 0-based
/// position in the mapping row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteBackLayout {
    /// Master column holding the row label. Default: `2` (B).
    pub label_column: u32,
    /// First master row scanned for labels. Default: `2`.
    pub first_row: u32,
    /// First master column written. Default: `23` (W).
    pub first_target_column: u32,
    /// Last master column written, inclusive. Default: `40` (AN).
    pub last_target_column: u32,
    /// Mapping-row position copied into `first_target_column`. Default: `2` (C).
    pub first_source_column: usize,
}

impl Default for WriteBackLayout {
    fn default() -> Self {
        Self {
            label_column: 2,
            first_row: 2,
            first_target_column: 23,
            last_target_column: 40,
            first_source_column: 2,
        }
    }
}

/// A master worksheet that labels can be looked up in and values written to.
pub trait MasterSheet {
    /// Last row holding any data (1-based).
    fn last_row(&self) -> u32;

    /// Text of the label cell in `row`, if non-empty.
    fn label(&self, row: u32) -> Option<String>;

    /// Write `value` as text into (`row`, `column`).
    fn write(&mut self, row: u32, column: u32, value: &str);
}

/// Outcome of applying one mapping sheet to one master worksheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ApplyReport {
    /// Mapping rows whose label was found in the master.
    pub matched: usize,
    /// Normalized labels with no matching master row.
    pub unmatched: Vec<String>,
    /// Mapping rows skipped for a blank label.
    pub skipped_blank: usize,
    /// Master cells written.
    pub cells_written: usize,
}

/// Apply mapping rows to a master worksheet.
///
/// Only the first matching master row receives values. Blank mapping cells
/// leave the corresponding master cell untouched.
pub fn apply_rows<S>(sheet: &mut S, rows: &[MappingRow], layout: &WriteBackLayout) -> ApplyReport
where
    S: MasterSheet + ?Sized,
{
    let mut report = ApplyReport::default();
    let last_row = sheet.last_row();

    for row in rows {
        let label = row.label.as_deref().map(normalize_label).unwrap_or_default();
        // Empty spreadsheet cells read back as "nan" in exported mapping files.
        if label.is_empty() || label == "NAN" {
            report.skipped_blank += 1;
            continue;
        }

        let target = (layout.first_row..=last_row).find(|&r| {
            sheet
                .label(r)
                .is_some_and(|master_label| normalize_label(&master_label) == label)
        });

        let Some(target) = target else {
            report.unmatched.push(label);
            continue;
        };

        report.matched += 1;
        for (offset, column) in (layout.first_target_column..=layout.last_target_column).enumerate()
        {
            if let Some(value) = row.cell(layout.first_source_column + offset) {
                sheet.write(target, column, value);
                report.cells_written += 1;
            }
        }
    }

    report
}
