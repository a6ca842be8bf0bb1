//! CLI argument definitions and shared statics.

use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::sync::OnceLock;

pub static FILE_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

#[derive(Parser, Debug)]
#[command(
    name = "ecr",
    version,
    about = "Time-correlates coupled ECR/nanoindentation exports and extracts \
             per-dataset statistics"
)]
pub struct Cli {
    /// Mechanical export files (.txt); the matching .ecr file is looked
    /// up next to each
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,

    /// Particle size in micrometres (0 disables stress/strain)
    #[arg(long, value_name = "UM", default_value_t = 0.0)]
    pub size: f64,

    /// Path to analysis config TOML
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output directory for report tables (default: alongside inputs)
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Resistance threshold(s) in ohm; overrides the config list
    #[arg(long = "threshold", value_name = "OHM")]
    pub thresholds: Vec<f64>,

    /// Strain target(s) for resistance interpolation; overrides the config list
    #[arg(long = "strain", value_name = "STRAIN")]
    pub strains: Vec<f64>,

    /// Drop samples without resistance before writing the sample table
    #[arg(long, action = ArgAction::SetTrue)]
    pub clean: bool,

    /// Print a machine-readable JSON summary to stdout
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Console log level (error|warn|info|debug|trace); defaults to the
    /// config's [logging] level, then "info"
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,
}
