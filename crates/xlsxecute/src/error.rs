//! Error types for xlsxecute

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while rendering a model
#[derive(Debug, Error)]
pub enum Error {
    /// Parameter file is neither CSV nor JSON
    #[error(
        "Parameter file \"{}\" is not an accepted format. Only JSON and CSV files are allowed.",
        .0.display()
    )]
    UnsupportedFormat(PathBuf),

    /// Command-line override without an `=` separator
    #[error("Parameters must be in the form of \"{{sheet}}.{{cell}}={{value}}\", got \"{0}\"")]
    InvalidOverrideFormat(String),

    /// CSV parameter row with fewer than two fields
    #[error("Parameter file \"{}\" line {line}: expected \"{{sheet}}.{{cell}},{{value}}\"", .path.display())]
    InvalidParameterRow { path: PathBuf, line: u64 },

    /// Parameter file could not be decoded
    #[error("Parameter file \"{}\" is malformed: {message}", .path.display())]
    InvalidParameterFile { path: PathBuf, message: String },

    /// Location key that does not split into exactly a sheet and a cell
    #[error("Invalid cell location \"{0}\": expected \"{{sheet}}.{{cell}}\"")]
    InvalidLocation(String),

    /// Sheet named by a location is missing from the workbook
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    /// Cell reference outside the A1 addressing scheme
    #[error("Invalid cell reference \"{reference}\": {reason}")]
    CellOutOfRange { reference: String, reason: String },

    /// Workbook could not be read or written
    #[error("Workbook \"{}\": {message}", .path.display())]
    Workbook { path: PathBuf, message: String },

    /// Failure inside the formula engine
    #[error("Formula evaluation of \"{}\" failed: {message}", .path.display())]
    Evaluation { path: PathBuf, message: String },

    /// Two output files would share a name once lowercased
    #[error("Output files {} would all be renamed to \"{}\"", format_paths(.sources), .target.display())]
    RenameConflict {
        sources: Vec<PathBuf>,
        target: PathBuf,
    },

    /// Run directory for this timestamp already exists
    #[error("Run directory \"{}\" already exists", .0.display())]
    RunDirectoryExists(PathBuf),

    /// IO error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn workbook<E: std::fmt::Display>(path: impl Into<PathBuf>, err: E) -> Self {
        Error::Workbook {
            path: path.into(),
            message: err.to_string(),
        }
    }

    pub(crate) fn evaluation<E: std::fmt::Display>(path: impl Into<PathBuf>, err: E) -> Self {
        Error::Evaluation {
            path: path.into(),
            message: err.to_string(),
        }
    }

    pub(crate) fn cell_out_of_range<S: Into<String>>(reference: &str, reason: S) -> Self {
        Error::CellOutOfRange {
            reference: reference.to_string(),
            reason: reason.into(),
        }
    }
}

fn format_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| format!("\"{}\"", p.display()))
        .collect::<Vec<_>>()
        .join(", ")
}
