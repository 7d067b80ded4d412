//! Fixture builders shared by the CLI integration tests.

#![allow(dead_code)]

use std::path::Path;

use assert_cmd::Command;
use lopdf::{Object, Stream, dictionary};

pub fn cmd() -> Command {
    Command::cargo_bin("qls-sticker").unwrap()
}

/// Eight header rows as they appear on top of an inspection sheet.
pub const HEADER_ROWS: [&str; 8] = [
    "QLS inspection sheet",
    "Plant data",
    "Model year",
    "Line",
    "Station",
    "Inspector",
    "Confidential",
    "Zone",
];

/// Wrap a content stream into a single-page PDF using Helvetica as /F1.
fn single_page_pdf(content: Vec<u8>) -> Vec<u8> {
    let mut doc = lopdf::Document::with_version("1.5");

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let content_id = doc.add_object(Stream::new(dictionary! {}, content));

    let resources = dictionary! {
        "Font" => dictionary! {
            "F1" => Object::Reference(font_id),
        },
    };

    let media_box = vec![
        Object::Integer(0),
        Object::Integer(0),
        Object::Integer(612),
        Object::Integer(792),
    ];
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "MediaBox" => media_box,
        "Contents" => Object::Reference(content_id),
        "Resources" => resources,
    });

    let pages_id = doc.add_object(dictionary! {
        "Type" => "Pages",
        "Kids" => vec![Object::Reference(page_id)],
        "Count" => Object::Integer(1),
    });

    if let Ok(page_obj) = doc.get_object_mut(page_id) {
        if let Ok(dict) = page_obj.as_dict_mut() {
            dict.set("Parent", Object::Reference(pages_id));
        }
    }

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

/// A single-page PDF with a ruled two-column table.
///
/// The first column holds `first_column` top to bottom; the second column
/// holds `OK` on every row.
pub fn pdf_with_table(first_column: &[&str]) -> Vec<u8> {
    let top: i64 = 760;
    let row_height: i64 = 20;
    let xs: [i64; 3] = [50, 350, 450];
    let bottom = top - row_height * first_column.len() as i64;

    let mut content = String::from("1 w\n");
    for i in 0..=first_column.len() as i64 {
        let y = top - row_height * i;
        content.push_str(&format!("{} {y} m {} {y} l S\n", xs[0], xs[2]));
    }
    for x in xs {
        content.push_str(&format!("{x} {top} m {x} {bottom} l S\n"));
    }
    for (i, text) in first_column.iter().enumerate() {
        let y = top - row_height * (i as i64 + 1) + 6;
        content.push_str(&format!("BT /F1 10 Tf {} {y} Td ({text}) Tj ET\n", xs[0] + 5));
        content.push_str(&format!("BT /F1 10 Tf {} {y} Td (OK) Tj ET\n", xs[1] + 5));
    }

    single_page_pdf(content.into_bytes())
}

/// A single-page PDF with text and no table lines.
pub fn pdf_without_table() -> Vec<u8> {
    single_page_pdf(b"BT /F1 12 Tf 72 720 Td (Hello World) Tj ET".to_vec())
}

/// Header rows followed by `stickers`.
pub fn inspection_pdf(stickers: &[&str]) -> Vec<u8> {
    let mut rows: Vec<&str> = HEADER_ROWS.to_vec();
    rows.extend_from_slice(stickers);
    pdf_with_table(&rows)
}

/// Write a workbook with one sheet per `(name, rows)`; empty strings leave
/// the cell blank.
pub fn write_workbook(path: &Path, sheets: &[(&str, Vec<Vec<&str>>)]) {
    let mut book = umya_spreadsheet::new_file_empty_worksheet();
    for (name, rows) in sheets {
        let sheet = book.new_sheet(*name).unwrap();
        for (row_idx, row) in (1u32..).zip(rows) {
            for (col_idx, value) in (1u32..).zip(row) {
                if !value.is_empty() {
                    sheet.get_cell_mut((col_idx, row_idx)).set_value_string(*value);
                }
            }
        }
    }
    umya_spreadsheet::writer::xlsx::write(&book, path).unwrap();
}

/// Cell text of a sheet in a saved workbook.
pub fn read_cell(path: &Path, sheet: &str, column: u32, row: u32) -> String {
    let book = umya_spreadsheet::reader::xlsx::read(path).unwrap();
    let ws = book
        .get_sheet_collection()
        .iter()
        .find(|s| s.get_name() == sheet)
        .unwrap_or_else(|| panic!("sheet {sheet:?} not found in {}", path.display()));
    ws.get_value((column, row))
}

/// Sheet names of a saved workbook.
pub fn sheet_names(path: &Path) -> Vec<String> {
    let book = umya_spreadsheet::reader::xlsx::read(path).unwrap();
    book.get_sheet_collection()
        .iter()
        .map(|s| s.get_name().to_string())
        .collect()
}
