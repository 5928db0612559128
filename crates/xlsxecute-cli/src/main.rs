//! xlsxecute CLI - recalculate an Excel model with new parameters

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;
use xlsxecute::{render, FormualizerEngine, RenderOptions, SystemClock};

const DESCRIPTION: &str = r#"This tool will take an Excel model (.xlsx), update any parameters as defined via command line
arguments or in the parameters file and calculate all cells, resulting in an Excel spreadsheet
resembling the original, but with all formula cells replaced by the calculated values.

The parameter file can be either a JSON file or a CSV file in the following format:

JSON:
>  {
>     "Sheet name.Cell1": "Replacement value string",
>     "Sheet name.Cell2": Replacement value number
>  }

Example: params.json
>  {
>      "Variables.C2": "red",
>      "Variables.C3": 0.8
>  }

CSV:
>  Sheet name.Cell1,Replacement value string
>  Sheet name.Cell2,Replacement value number

Example: params.csv
>  Variables.C2,red
>  Variables.C3,0.8

NOTE: Do NOT include a header row in the CSV"#;

#[derive(Parser, Debug)]
#[command(name = "xlsxecute")]
#[command(
    author,
    version,
    about = "Apply parameters to an Excel model and calculate every formula",
    long_about = DESCRIPTION
)]
struct Cli {
    /// Excel (xlsx) file that contains the model
    source_file: PathBuf,

    /// Path to JSON or CSV parameter file
    parameter_file: Option<PathBuf>,

    /// Output location
    #[arg(long = "output_dir", value_name = "DIR", default_value = "output")]
    output_dir: PathBuf,

    /// Directory to store intermediate files
    #[arg(long = "run_dir", value_name = "DIR", default_value = "runs")]
    run_dir: PathBuf,

    /// Override one cell; may be repeated and wins over the parameter file
    #[arg(short = 'p', long = "param", value_name = "{sheet}.{cell}={new_value}")]
    params: Vec<String>,

    /// Log more detail to stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn render_options(&self) -> RenderOptions {
        RenderOptions {
            source_file: self.source_file.clone(),
            parameter_file: self.parameter_file.clone(),
            output_dir: self.output_dir.clone(),
            run_dir: self.run_dir.clone(),
            overrides: self.params.clone(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let options = cli.render_options();
    let outcome = render(
        &options,
        &FormualizerEngine,
        &SystemClock,
        &mut io::stdout().lock(),
    )
    .with_context(|| format!("Failed to render '{}'", options.source_file.display()))?;

    tracing::info!(
        run = outcome.run.id(),
        patched = %outcome.patched_workbook.display(),
        "render finished"
    );
    eprintln!(
        "Calculated {} formulas ({} errors)",
        outcome.summary.formula_cells, outcome.summary.errors
    );

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["xlsxecute", "model.xlsx"]).unwrap();
        let options = cli.render_options();

        assert_eq!(options.source_file, PathBuf::from("model.xlsx"));
        assert_eq!(options.parameter_file, None);
        assert_eq!(options.output_dir, PathBuf::from("output"));
        assert_eq!(options.run_dir, PathBuf::from("runs"));
        assert!(options.overrides.is_empty());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_all_arguments() {
        let cli = Cli::try_parse_from([
            "xlsxecute",
            "model.xlsx",
            "params.csv",
            "--output_dir",
            "out",
            "--run_dir",
            "scratch",
            "--param",
            "Variables.C2=red",
            "-p",
            "Variables.C3=a=b",
            "-vv",
        ])
        .unwrap();
        let options = cli.render_options();

        assert_eq!(options.parameter_file, Some(PathBuf::from("params.csv")));
        assert_eq!(options.output_dir, PathBuf::from("out"));
        assert_eq!(options.run_dir, PathBuf::from("scratch"));
        assert_eq!(
            options.overrides,
            vec!["Variables.C2=red".to_string(), "Variables.C3=a=b".to_string()]
        );
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_source_file_is_required() {
        assert!(Cli::try_parse_from(["xlsxecute"]).is_err());
    }
}
