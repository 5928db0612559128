//! End-to-end rendering of a model: parameters, patch, calculate, normalize

use std::io::Write;
use std::path::PathBuf;

use crate::engine::{CalculatedModel, CalculationSummary, FormulaEngine};
use crate::error::Result;
use crate::normalize::lowercase_file_names;
use crate::params::{merge, Parameters};
use crate::patch::patch_workbook;
use crate::run::{RunClock, RunDirectory};

/// Inputs for one render
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Workbook holding the model
    pub source_file: PathBuf,
    /// Optional CSV or JSON parameter file
    pub parameter_file: Option<PathBuf>,
    /// Where calculated workbooks are written (default: `output`)
    pub output_dir: PathBuf,
    /// Where per-run patched copies are kept (default: `runs`)
    pub run_dir: PathBuf,
    /// `sheet.cell=value` overrides, applied in order after the file
    pub overrides: Vec<String>,
}

impl RenderOptions {
    /// Options for `source_file` with default directories and no parameters
    pub fn new<P: Into<PathBuf>>(source_file: P) -> Self {
        Self {
            source_file: source_file.into(),
            ..Default::default()
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            source_file: PathBuf::new(),
            parameter_file: None,
            output_dir: PathBuf::from("output"),
            run_dir: PathBuf::from("runs"),
            overrides: Vec::new(),
        }
    }
}

/// What a render produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOutcome {
    pub run: RunDirectory,
    /// Patched copy of the source inside the run directory
    pub patched_workbook: PathBuf,
    /// Final (lowercased) files in the output directory
    pub outputs: Vec<PathBuf>,
    pub summary: CalculationSummary,
}

/// Render a model.
///
/// Progress lines and the final list of output files go to `progress`. Any
/// failure aborts the render; a run directory created before the failure is
/// left on disk.
pub fn render<E, C, W>(
    options: &RenderOptions,
    engine: &E,
    clock: &C,
    progress: &mut W,
) -> Result<RenderOutcome>
where
    E: FormulaEngine,
    C: RunClock + ?Sized,
    W: Write + ?Sized,
{
    writeln!(progress, "Parsing parameters")?;
    let params = Parameters::load(options.parameter_file.as_deref())?;
    let params = merge(params, &options.overrides)?;
    tracing::info!(parameters = params.len(), "parsed parameters");

    let run = RunDirectory::create(&options.run_dir, clock)?;
    let patched_workbook = run.workbook_path(&options.source_file);

    writeln!(progress, "Updating cells based on parameters")?;
    patch_workbook(&options.source_file, &params, &patched_workbook)?;

    writeln!(progress, "Processing formulas to resolve model")?;
    let mut model = engine.load(&patched_workbook)?;
    let summary = model.calculate()?;
    model.write(&options.output_dir)?;

    let outputs = lowercase_file_names(&options.output_dir)?;

    writeln!(progress, "Output file(s):")?;
    for path in &outputs {
        writeln!(progress, "  {}", path.display())?;
    }

    Ok(RenderOutcome {
        run,
        patched_workbook,
        outputs,
        summary,
    })
}

