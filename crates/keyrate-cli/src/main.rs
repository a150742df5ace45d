//! Keyrate CLI - portfolio valuation and key-rate risk from CSV inputs.
//!
//! # Usage
//!
//! ```bash
//! # Price an inventory against a zero curve
//! keyrate price --curve-file curves.csv --inventory-file inventory.csv --as-of 2024-01-02
//!
//! # Six-size shock summary, with PCA loadings from historical rate changes
//! keyrate shocks --curve-file curves.csv --inventory-file inventory.csv \
//!     --as-of 2024-01-02 --returns-file changes.csv --components 3
//!
//! # Evaluate a curve
//! keyrate curve --curve-file curves.csv --as-of 2024-01-02 --tenors 1,2,5,10
//!
//! # Coupon schedule of one bond
//! keyrate cashflows --issue 2020-01-01 --maturity 2025-01-01 --coupon 2.0
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod error;
mod output;
mod settings;

use cli::{Cli, Commands};
use settings::Settings;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let settings = Settings::load(cli.config.as_deref())?;
    let format = cli.format;

    match cli.command {
        Commands::Price(args) => commands::price::execute(args, &settings, format)?,
        Commands::Shocks(args) => commands::shocks::execute(args, &settings, format)?,
        Commands::Curve(args) => commands::curve::execute(args, format)?,
        Commands::Cashflows(args) => commands::cashflows::execute(args, &settings, format)?,
        Commands::Config(args) => commands::config::execute(args, &settings, format)?,
    }

    Ok(())
}

/// Installs a stderr subscriber. `RUST_LOG` wins over the verbosity flags.
fn init_tracing(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
