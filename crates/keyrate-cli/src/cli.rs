//! CLI argument definitions.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use crate::commands::{CashflowsArgs, ConfigArgs, CurveArgs, PriceArgs, ShocksArgs};

/// Keyrate - bond portfolio valuation and key-rate risk
#[derive(Parser)]
#[command(name = "keyrate")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Suppress everything but errors on stderr
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Settings file (TOML)
    #[arg(short, long, global = true, env = "KEYRATE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Price an inventory: dirty/clean value, accrued, DV01, key-rate DV01
    Price(PriceArgs),

    /// Reprice an inventory under parallel and loading-vector shocks
    Shocks(ShocksArgs),

    /// Evaluate a zero curve
    Curve(CurveArgs),

    /// Show the coupon schedule of one bond
    Cashflows(CashflowsArgs),

    /// Show or write settings
    Config(ConfigArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (just the headline value)
    Minimal,
}
