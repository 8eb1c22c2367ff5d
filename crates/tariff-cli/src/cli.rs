//! CLI argument definitions for tariff-lab.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use tariff_econ::{DEFAULT_IMPORT_ELASTICITY, DEFAULT_PASS_THROUGH};
use tariff_ingest::{DEFAULT_DATA_DIR, Delimiter};

#[derive(Parser)]
#[command(
    name = "tariff-lab",
    version,
    about = "Tariff schedule loader and scenario calculator",
    long_about = "Load tariff schedule text files into one normalized table,\n\
                  look up product codes, and run stylized price, demand, and\n\
                  revenue formulas."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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
    /// Load every schedule file and summarize rows per file.
    Load(LoadArgs),

    /// Print the rows matching one or more HTS codes.
    Filter(FilterArgs),

    /// Consumer price after partial tariff pass-through.
    PassThrough(PassThroughArgs),

    /// Demand volume after a proportional price change.
    Elasticity(ElasticityArgs),

    /// Stylized tariff revenue at one rate or across a rate sweep.
    Laffer(LafferArgs),
}

/// Options shared by the commands that read schedule files.
#[derive(Args)]
pub struct SourceArgs {
    /// Directory holding the schedule `.txt` files.
    #[arg(value_name = "DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Field delimiter to use instead of guessing from the first line.
    #[arg(long = "sep", value_enum)]
    pub sep: Option<SepArg>,
}

#[derive(Parser)]
pub struct LoadArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Write the combined table to a CSV file.
    #[arg(long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Print the combined rows as JSON instead of the summary table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct FilterArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// HTS code to select; any formatting ("0101.21.00", "1012100").
    #[arg(long = "code", value_name = "CODE", required = true, num_args = 1..)]
    pub codes: Vec<String>,

    /// Print matching rows as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct PassThroughArgs {
    /// Price before the tariff.
    #[arg(long = "price", allow_negative_numbers = true)]
    pub price: f64,

    /// Tariff rate as a fraction (0.1 for 10%).
    #[arg(long = "rate", allow_negative_numbers = true)]
    pub rate: f64,

    /// Share of the tariff passed on to consumers.
    #[arg(long = "fraction", default_value_t = DEFAULT_PASS_THROUGH, allow_negative_numbers = true)]
    pub fraction: f64,
}

#[derive(Parser)]
pub struct ElasticityArgs {
    /// Demand volume before the price change.
    #[arg(long = "volume", allow_negative_numbers = true)]
    pub volume: f64,

    /// Proportional price change (0.1 for +10%).
    #[arg(long = "price-change", allow_negative_numbers = true)]
    pub price_change: f64,

    /// Price elasticity of demand.
    #[arg(long = "elasticity", allow_negative_numbers = true)]
    pub elasticity: f64,
}

#[derive(Parser)]
pub struct LafferArgs {
    /// Import value before the tariff.
    #[arg(long = "imports", allow_negative_numbers = true)]
    pub imports: f64,

    /// Single tariff rate to evaluate.
    #[arg(long = "rate", conflicts_with = "sweep", allow_negative_numbers = true)]
    pub rate: Option<f64>,

    /// Evaluate every rate from START to END in STEP increments
    /// (default: 0 to 1 in 0.05 steps).
    #[arg(
        long = "sweep",
        num_args = 3,
        value_names = ["START", "END", "STEP"],
        allow_negative_numbers = true
    )]
    pub sweep: Option<Vec<f64>>,

    /// Import demand elasticity.
    #[arg(long = "elasticity", default_value_t = DEFAULT_IMPORT_ELASTICITY, allow_negative_numbers = true)]
    pub elasticity: f64,
}

/// CLI delimiter choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum SepArg {
    Comma,
    Pipe,
    Semicolon,
    Tab,
}

impl From<SepArg> for Delimiter {
    fn from(arg: SepArg) -> Self {
        match arg {
            SepArg::Comma => Delimiter::Comma,
            SepArg::Pipe => Delimiter::Pipe,
            SepArg::Semicolon => Delimiter::Semicolon,
            SepArg::Tab => Delimiter::Tab,
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
