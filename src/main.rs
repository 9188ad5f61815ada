use clap::{Parser, Subcommand};
use fmv_extract::cli;
use fmv_extract::error::ExtractResult;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "fmvx")]
#[command(about = "Extract portfolio metrics from FMV valuation workbooks")]
#[command(long_about = "fmvx - batch extraction from valuation workbooks

Locates named values inside loosely-structured spreadsheet grids by fuzzy
label matching and consolidates many workbooks into three CSV tables:
key metrics, cash-flow series, and general assumptions.

COMMANDS:
  extract - Run the batch and write the three CSV tables
  inspect - Extract a single workbook and print every resolved field
  check   - Verify workbooks open and carry the required sheets

EXAMPLES:
  fmvx extract models/*.xlsx --scenario \"Base Case\" --out-dir exports
  fmvx inspect models/tower_a.xlsx
  fmvx check models/*.xlsx

Set RUST_LOG=fmv_extract=debug for per-field diagnostics.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Run the three extraction recipes over every workbook.

Workbooks are processed sequentially in the order given. A workbook that
cannot be read contributes one error placeholder row to the key-metrics
table; the batch always runs to completion.

OUTPUT FILES (written to --out-dir):
  fmv_extracted_metrics.csv   one row per workbook
  cash_flow_records.csv       concatenated cash-flow series
  general_assumptions.csv     one row per workbook

The scenario label is applied verbatim to every record of the run.")]
    /// Extract all workbooks and write the three CSV tables
    Extract {
        /// Workbook files (.xlsx) in upload order
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Scenario name applied to every record
        #[arg(short, long)]
        scenario: String,

        /// Directory for the CSV tables
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,

        /// Print each missing-field diagnostic
        #[arg(short, long)]
        verbose: bool,
    },

    /// Extract a single workbook and print every resolved field
    Inspect {
        /// Workbook file (.xlsx)
        file: PathBuf,

        /// Scenario name to tag the records with
        #[arg(short, long, default_value = "")]
        scenario: String,
    },

    #[command(long_about = "Verify each workbook opens and carries the required sheets.

A workbook without an FMV sheet cannot be extracted at all and fails the
check. Missing DCF Model / Inputs sheets are reported as warnings: key
metrics and cash flow still extract, only general assumptions do not.")]
    /// Verify workbooks open and carry the required sheets
    Check {
        /// Workbook files (.xlsx)
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

fn main() -> ExtractResult<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            files,
            scenario,
            out_dir,
            verbose,
        } => cli::extract(files, scenario, out_dir, verbose),

        Commands::Inspect { file, scenario } => cli::inspect(file, scenario),

        Commands::Check { files } => cli::check(files),
    }
}
