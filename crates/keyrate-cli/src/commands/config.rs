//! Config command implementation.
//!
//! Shows the effective settings or writes a settings file.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::cli::OutputFormat;
use crate::commands::tenor_label;
use crate::output::{print_header, print_json, print_output, print_success, print_warning, KeyValue};
use crate::settings::Settings;

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective settings
    Show,

    /// Write a settings file with default values
    Init(InitArgs),
}

/// Arguments for the init subcommand.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// File to write
    #[arg(default_value = "keyrate.toml")]
    pub path: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, settings: &Settings, format: OutputFormat) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show(settings, format),
        ConfigCommand::Init(init) => write_defaults(&init),
    }
}

fn show(settings: &Settings, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            print_header("Settings");
            print_output(&entries(settings), format)?;
        }
        OutputFormat::Json => print_json(settings)?,
        OutputFormat::Csv => print_output(&entries(settings), format)?,
        OutputFormat::Minimal => print!("{}", settings.to_toml()?),
    }
    Ok(())
}

fn entries(settings: &Settings) -> Vec<KeyValue> {
    let p = &settings.pricing;
    let keys: Vec<String> = p.key_tenors.iter().map(|&t| tenor_label(t)).collect();
    vec![
        KeyValue::new("key_tenors", keys.join(" ")),
        KeyValue::new("bump_bps", p.bump_bps.to_string()),
        KeyValue::new("days_per_year", p.days_per_year.to_string()),
        KeyValue::new("compounding", p.compounding.to_string()),
        KeyValue::new("final_coupon_policy", format!("{:?}", p.final_coupon_policy)),
        KeyValue::new("parallel", p.parallel.to_string()),
        KeyValue::new("parallel_threshold", p.parallel_threshold.to_string()),
        KeyValue::new("estimator", settings.scenarios.estimator.to_string()),
        KeyValue::new("decay", settings.scenarios.decay.to_string()),
        KeyValue::new("components", settings.scenarios.components.to_string()),
    ]
}

fn write_defaults(args: &InitArgs) -> Result<()> {
    if args.path.exists() && !args.force {
        print_warning(&format!(
            "{} exists; pass --force to overwrite",
            args.path.display()
        ));
        anyhow::bail!("refusing to overwrite {}", args.path.display());
    }
    std::fs::write(&args.path, Settings::default().to_toml()?)?;
    print_success(&format!("Wrote {}", args.path.display()));
    Ok(())
}
