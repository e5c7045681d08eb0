//! CLI argument definitions for the indicator normalizer.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use ica_model::Preset;

/// Default raw extract location.
pub const DEFAULT_INPUT: &str = "data/raw/dataset.csv";

/// Default normalized dataset location.
pub const DEFAULT_OUTPUT: &str = "data/processed/dataset.csv";

#[derive(Parser)]
#[command(
    name = "ica",
    version,
    about = "Normalize SNIS water-utility indicator extracts",
    long_about = "Normalize raw SNIS water-utility indicator extracts into a typed,\n\
                  model-ready dataset.\n\n\
                  Drops rows without a reference year, keeps and renames the mapped\n\
                  columns, parses locale-formatted numbers and drops rows without a\n\
                  target value."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Normalize a raw extract and write the processed dataset.
    Process(ProcessArgs),

    /// Show the active rename map and column roles.
    Columns(SpecArgs),

    /// Print the active spec as JSON (a starting point for --config).
    Spec(SpecArgs),
}

/// Where the normalization spec comes from.
#[derive(Args, Clone)]
pub struct SpecArgs {
    /// JSON spec file (takes precedence over --preset).
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Built-in spec to use.
    #[arg(long = "preset", value_enum, default_value = "water-consumption")]
    pub preset: PresetArg,
}

#[derive(Parser)]
pub struct ProcessArgs {
    /// Raw extract to read.
    #[arg(value_name = "INPUT", default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// Destination of the normalized dataset.
    #[arg(value_name = "OUTPUT", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    #[command(flatten)]
    pub spec: SpecArgs,

    /// Replace unparseable numbers with null instead of failing.
    ///
    /// Rows whose target becomes null are then dropped like any other row
    /// with a missing target.
    #[arg(long = "lenient")]
    pub lenient: bool,

    /// Input field delimiter.
    #[arg(long = "delimiter", value_name = "CHAR", default_value_t = ',')]
    pub delimiter: char,

    /// Output field delimiter.
    #[arg(long = "output-delimiter", value_name = "CHAR", default_value_t = ',')]
    pub output_delimiter: char,

    /// Read the input as Latin-1 instead of UTF-8.
    #[arg(long = "latin1")]
    pub latin1: bool,

    /// Normalize and report without writing the output file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Also write the row accounting as JSON.
    #[arg(long = "report", value_name = "PATH")]
    pub report: Option<PathBuf>,
}

/// CLI preset choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum PresetArg {
    WaterConsumption,
    WaterConsumptionGrouped,
    /// Deprecated: numeric columns chosen by position.
    Positional,
}

impl From<PresetArg> for Preset {
    fn from(value: PresetArg) -> Self {
        match value {
            PresetArg::WaterConsumption => Preset::WaterConsumption,
            PresetArg::WaterConsumptionGrouped => Preset::WaterConsumptionGrouped,
            PresetArg::Positional => Preset::Positional,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
