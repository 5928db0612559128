//! Writing parameter values into a copy of the source workbook

use std::path::Path;

use umya_spreadsheet::{reader::xlsx, writer, Spreadsheet};

use crate::error::{Error, Result};
use crate::location::CellLocation;
use crate::params::{ParamValue, Parameters};

/// Copy `source` to `destination` with every parameter written into its cell.
///
/// Each targeted cell loses any formula it had. All locations are resolved
/// before anything is written, so a bad location leaves no file behind. The
/// destination's parent directories are created as needed; `source` itself is
/// only read.
pub fn patch_workbook(source: &Path, params: &Parameters, destination: &Path) -> Result<usize> {
    // Surface a missing source as the plain I/O error
    std::fs::metadata(source)?;
    let mut book = xlsx::read(source).map_err(|e| Error::workbook(source, e))?;

    let targets = params
        .iter()
        .map(|(key, value)| Ok((CellLocation::parse(key)?, value)))
        .collect::<Result<Vec<_>>>()?;

    for (location, value) in &targets {
        set_cell(&mut book, location, value)?;
    }

    if let Some(parent) = destination.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    writer::xlsx::write(&book, destination).map_err(|e| Error::workbook(destination, e))?;

    tracing::info!(
        cells = targets.len(),
        destination = %destination.display(),
        "wrote patched workbook"
    );
    Ok(targets.len())
}

fn set_cell(book: &mut Spreadsheet, location: &CellLocation, value: &ParamValue) -> Result<()> {
    let sheet = book
        .get_sheet_by_name_mut(&location.sheet)
        .ok_or_else(|| Error::SheetNotFound(location.sheet.clone()))?;

    let cell = sheet.get_cell_mut(location.cell.one_based());
    match value {
        ParamValue::Text(s) => {
            cell.set_value_string(s.as_str());
        }
        ParamValue::Number(n) => {
            cell.set_value_number(*n);
        }
        ParamValue::Boolean(b) => {
            cell.set_value_bool(*b);
        }
    }

    tracing::debug!(%location, %value, "set parameter");
    Ok(())
}
