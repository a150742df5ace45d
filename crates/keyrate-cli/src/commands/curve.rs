//! Curve command implementation.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use keyrate_curves::TermStructure;

use crate::cli::OutputFormat;
use crate::commands::{load_curve, parse_date};
use crate::output::{display_rate, print_header, print_output};

/// Arguments for the curve command.
#[derive(Args, Debug)]
pub struct CurveArgs {
    /// Curve file (curve_date,curve_type,tenor,rate)
    #[arg(long)]
    pub curve_file: PathBuf,

    /// Curve date (YYYY-MM-DD)
    #[arg(long)]
    pub as_of: String,

    /// Curve type
    #[arg(long, default_value = "zero")]
    pub curve_id: String,

    /// Tenors to evaluate (years, comma-separated). Defaults to the curve's own points.
    #[arg(long, value_delimiter = ',')]
    pub tenors: Vec<f64>,
}

/// One evaluated point.
#[derive(Debug, Serialize, Tabled)]
pub struct CurvePoint {
    #[tabled(rename = "Tenor")]
    pub tenor: f64,
    #[tabled(rename = "Rate", display_with = "display_rate")]
    pub rate: f64,
}

/// Execute the curve command.
pub fn execute(args: CurveArgs, format: OutputFormat) -> Result<()> {
    let as_of = parse_date(&args.as_of)?;
    let curve = load_curve(&args.curve_file, as_of, &args.curve_id)?;

    let tenors = if args.tenors.is_empty() {
        curve.tenors().to_vec()
    } else {
        args.tenors
    };
    let points: Vec<CurvePoint> = tenors
        .iter()
        .zip(curve.evaluate_many(&tenors))
        .map(|(&tenor, rate)| CurvePoint { tenor, rate })
        .collect();

    match format {
        OutputFormat::Table => {
            let (min, max) = curve.tenor_bounds();
            print_header(&format!(
                "Curve '{}' as of {as_of} ({} points, {min}Y to {max}Y)",
                args.curve_id,
                curve.len()
            ));
            print_output(&points, format)?;
        }
        OutputFormat::Json | OutputFormat::Csv => print_output(&points, format)?,
        OutputFormat::Minimal => {
            for p in &points {
                println!("{},{:.6}", p.tenor, p.rate);
            }
        }
    }

    Ok(())
}
