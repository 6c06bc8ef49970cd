use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Standardized drought and wetness indices from daily series.
#[derive(Parser)]
#[command(
    name = "sindex",
    version,
    about = "Standardized indices (SPI, SPEI, SSI) from daily series"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Compute the index for a range of output dates.
    Compute(ComputeArgs),
}

/// Arguments for the `compute` subcommand.
#[derive(clap::Args)]
pub struct ComputeArgs {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override input CSV path from config.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Separate reference CSV used for fitting.
    #[arg(long)]
    pub reference: Option<PathBuf>,

    /// Override output CSV path from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// First output date (YYYY-MM-DD); defaults to the first input date.
    #[arg(long)]
    pub start: Option<String>,

    /// Last output date (YYYY-MM-DD); defaults to the last input date.
    #[arg(long)]
    pub end: Option<String>,

    /// Parameter table CSV to reuse instead of fitting.
    #[arg(long = "params-in")]
    pub params_in: Option<PathBuf>,

    /// Write the parameter table to this CSV.
    #[arg(long = "params-out")]
    pub params_out: Option<PathBuf>,
}
