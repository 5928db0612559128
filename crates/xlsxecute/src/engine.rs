//! Formula calculation
//!
//! The tool does not evaluate formulas itself. It hands the patched workbook
//! to a [`FormulaEngine`], asks the loaded model to calculate, and has the
//! model write its results into the output directory.
//!
//! [`FormualizerEngine`] is the default engine: it evaluates with
//! `formualizer-workbook` and writes a copy of the workbook in which every
//! formula cell is replaced by its computed value.

use std::path::{Path, PathBuf};

use formualizer_workbook::{
    LiteralValue, LoadStrategy, SpreadsheetReader, UmyaAdapter, Workbook, WorkbookConfig,
};
use umya_spreadsheet::{reader::xlsx, writer, Cell, Spreadsheet};

use crate::error::{Error, Result};

/// Statistics from a calculation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CalculationSummary {
    /// Number of formula cells evaluated
    pub formula_cells: usize,
    /// Number of formula cells whose result is an error value
    pub errors: usize,
}

/// Loads workbooks into calculable models
pub trait FormulaEngine {
    type Model: CalculatedModel;

    /// Load a workbook and build its evaluation model
    fn load(&self, path: &Path) -> Result<Self::Model>;
}

/// A loaded workbook that can be calculated and written out
pub trait CalculatedModel {
    /// Resolve every formula in the workbook
    fn calculate(&mut self) -> Result<CalculationSummary>;

    /// Write the results into `output_dir`, replacing same-named files.
    ///
    /// Returns the paths written.
    fn write(&self, output_dir: &Path) -> Result<Vec<PathBuf>>;
}

/// Engine backed by `formualizer-workbook`
#[derive(Debug, Clone, Copy, Default)]
pub struct FormualizerEngine;

impl FormulaEngine for FormualizerEngine {
    type Model = FormualizerModel;

    fn load(&self, path: &Path) -> Result<FormualizerModel> {
        let backend = UmyaAdapter::open_path(path).map_err(|e| Error::evaluation(path, e))?;
        let workbook =
            Workbook::from_reader(backend, LoadStrategy::EagerAll, WorkbookConfig::ephemeral())
                .map_err(|e| Error::evaluation(path, e))?;

        // Results are written into this copy; the engine only holds values.
        let book = xlsx::read(path).map_err(|e| Error::workbook(path, e))?;

        let file_name = path
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("output.xlsx"));

        tracing::debug!(path = %path.display(), "loaded workbook into formula engine");
        Ok(FormualizerModel {
            source: path.to_path_buf(),
            file_name,
            workbook,
            book,
        })
    }
}

/// A workbook loaded by [`FormualizerEngine`]
pub struct FormualizerModel {
    source: PathBuf,
    file_name: PathBuf,
    workbook: Workbook,
    book: Spreadsheet,
}

impl FormualizerModel {
    /// Name of the file [`CalculatedModel::write`] produces
    pub fn file_name(&self) -> &Path {
        &self.file_name
    }
}

impl CalculatedModel for FormualizerModel {
    fn calculate(&mut self) -> Result<CalculationSummary> {
        self.workbook
            .evaluate_all()
            .map_err(|e| Error::evaluation(&self.source, e))?;

        let mut summary = CalculationSummary::default();

        for sheet in self.book.get_sheet_collection_mut().iter_mut() {
            let name = sheet.get_name().to_string();

            let formula_cells: Vec<(u32, u32)> = sheet
                .get_cell_collection()
                .into_iter()
                .filter(|cell| cell.get_cell_value().is_formula())
                .map(|cell| {
                    let coord = cell.get_coordinate();
                    (*coord.get_col_num(), *coord.get_row_num())
                })
                .collect();

            for (col, row) in formula_cells {
                let value = self
                    .workbook
                    .get_value(&name, row, col)
                    .unwrap_or(LiteralValue::Empty);

                if matches!(value, LiteralValue::Error(_)) {
                    summary.errors += 1;
                }
                summary.formula_cells += 1;

                store_value(sheet.get_cell_mut((col, row)), &value);
            }
        }

        tracing::info!(
            formulas = summary.formula_cells,
            errors = summary.errors,
            "calculated workbook"
        );
        Ok(summary)
    }

    fn write(&self, output_dir: &Path) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(output_dir)?;
        let path = output_dir.join(&self.file_name);
        writer::xlsx::write(&self.book, &path).map_err(|e| Error::workbook(&path, e))?;
        Ok(vec![path])
    }
}

/// Replace a cell's formula with a computed value
fn store_value(cell: &mut Cell, value: &LiteralValue) {
    match value {
        LiteralValue::Number(n) => {
            cell.set_value_number(*n);
        }
        LiteralValue::Int(i) => {
            cell.set_value_number(*i as f64);
        }
        LiteralValue::Boolean(b) => {
            cell.set_value_bool(*b);
        }
        LiteralValue::Text(s) => {
            cell.set_value_string(s.as_str());
        }
        LiteralValue::Error(e) => {
            // umya writes every error cell as #VALUE!, so keep the code as text
            cell.set_value_string(e.kind.to_string());
        }
        LiteralValue::Empty | LiteralValue::Pending => {
            cell.set_blank();
        }
        LiteralValue::Array(rows) => {
            // Only the anchor cell is written; spilled neighbours are left as-is.
            let first = rows
                .first()
                .and_then(|row| row.first())
                .cloned()
                .unwrap_or(LiteralValue::Empty);
            store_value(cell, &first);
        }
        other => match other.as_serial_number() {
            Some(serial) => {
                cell.set_value_number(serial);
            }
            None => {
                cell.set_value_string(other.to_string());
            }
        },
    }
}
