//! Workbook fixtures shared by the integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use umya_spreadsheet::Spreadsheet;

/// Write a fresh workbook (with the default `Sheet1`) to `path`.
pub fn write_workbook<F: FnOnce(&mut Spreadsheet)>(path: &Path, build: F) {
    let mut book = umya_spreadsheet::new_file();
    build(&mut book);
    umya_spreadsheet::writer::xlsx::write(&book, path).expect("write workbook");
}

/// `Sheet1!A1=10`, `A2=20`, `A3=A1+A2`, plus `Summary!B1=Sheet1!A3*2` and a
/// label in `Sheet1!B1`.
pub fn write_model(dir: &Path, file_name: &str) -> PathBuf {
    let path = dir.join(file_name);
    write_workbook(&path, |book| {
        let sheet = book.get_sheet_by_name_mut("Sheet1").expect("default sheet");
        sheet.get_cell_mut((1, 1)).set_value_number(10); // A1
        sheet.get_cell_mut((1, 2)).set_value_number(20); // A2
        sheet.get_cell_mut((1, 3)).set_formula("A1+A2"); // A3
        sheet.get_cell_mut((2, 1)).set_value_string("total"); // B1

        let _ = book.new_sheet("Summary");
        let summary = book.get_sheet_by_name_mut("Summary").expect("summary sheet");
        summary.get_cell_mut((2, 1)).set_formula("Sheet1!A3*2"); // B1
    });
    path
}

/// Displayed value of a cell, `None` if the cell does not exist.
pub fn cell_value(path: &Path, sheet: &str, coordinate: (u32, u32)) -> Option<String> {
    let book = umya_spreadsheet::reader::xlsx::read(path).expect("read workbook");
    let sheet = book.get_sheet_by_name(sheet).expect("sheet exists");
    sheet
        .get_cell(coordinate)
        .map(|cell| cell.get_value().to_string())
}

/// Formula text of a cell, `None` when it holds a literal.
pub fn cell_formula(path: &Path, sheet: &str, coordinate: (u32, u32)) -> Option<String> {
    let book = umya_spreadsheet::reader::xlsx::read(path).expect("read workbook");
    let sheet = book.get_sheet_by_name(sheet).expect("sheet exists");
    sheet
        .get_cell(coordinate)
        .filter(|cell| cell.get_cell_value().is_formula())
        .map(|cell| cell.get_formula().to_string())
}

/// True when a cell is missing or holds no value at all (not even "").
pub fn cell_is_blank(path: &Path, sheet: &str, coordinate: (u32, u32)) -> bool {
    let book = umya_spreadsheet::reader::xlsx::read(path).expect("read workbook");
    let sheet = book.get_sheet_by_name(sheet).expect("sheet exists");
    sheet
        .get_cell(coordinate)
        .map_or(true, |cell| cell.get_cell_value().get_raw_value().is_empty())
}

/// Numeric value of a cell.
pub fn cell_number(path: &Path, sheet: &str, coordinate: (u32, u32)) -> Option<f64> {
    cell_value(path, sheet, coordinate).and_then(|v| v.parse().ok())
}
