//! # xlsxecute
//!
//! Run an Excel model with a new set of inputs.
//!
//! A render takes a source workbook, writes parameter values into named cells
//! of a copy of it, calculates every formula, and writes a workbook holding
//! only values into an output directory:
//!
//! - [`Parameters`] - `Sheet.Cell` values loaded from CSV or JSON and merged
//!   with `sheet.cell=value` overrides
//! - [`patch_workbook`] - writes parameters into a copy of the source
//! - [`FormulaEngine`] / [`CalculatedModel`] - the calculation seam, with
//!   [`FormualizerEngine`] as the default engine
//! - [`lowercase_file_names`] - output file name normalization
//! - [`render`] - all of the above in sequence
//!
//! ## Example
//!
//! ```rust,no_run
//! use xlsxecute::{render, FormualizerEngine, RenderOptions, SystemClock};
//!
//! let mut options = RenderOptions::new("model.xlsx");
//! options.overrides.push("Variables.C3=0.8".to_string());
//!
//! let outcome = render(&options, &FormualizerEngine, &SystemClock, &mut std::io::stdout())?;
//! println!("{} formulas calculated", outcome.summary.formula_cells);
//! # Ok::<(), xlsxecute::Error>(())
//! ```

pub mod engine;
pub mod error;
pub mod location;
pub mod normalize;
pub mod params;
pub mod patch;
pub mod render;
pub mod run;

pub use engine::{
    CalculatedModel, CalculationSummary, FormualizerEngine, FormualizerModel, FormulaEngine,
};
pub use error::{Error, Result};
pub use location::{CellLocation, CellRef};
pub use normalize::lowercase_file_names;
pub use params::{merge, Override, ParamValue, ParameterFormat, Parameters};
pub use patch::patch_workbook;
pub use render::{render, RenderOptions, RenderOutcome};
pub use run::{FixedClock, RunClock, RunDirectory, SystemClock};
