//! Cashflows command implementation.
//!
//! Shows the generated coupon schedule of a single bond.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use keyrate_bonds::{BondContract, FinalCouponPolicy};
use keyrate_core::types::Frequency;

use crate::cli::OutputFormat;
use crate::commands::parse_date;
use crate::error::CliError;
use crate::output::{display_price, print_header, print_output, print_table, KeyValue};
use crate::settings::Settings;

/// Arguments for the cashflows command.
#[derive(Args, Debug)]
pub struct CashflowsArgs {
    /// Issue date (YYYY-MM-DD)
    #[arg(long)]
    pub issue: String,

    /// Maturity date (YYYY-MM-DD)
    #[arg(long)]
    pub maturity: String,

    /// Annual coupon rate (as percentage, e.g., 2.0 for 2%)
    #[arg(long, default_value = "0")]
    pub coupon: f64,

    /// Coupon frequency: Annual, Semi-Annual, 1, or 2
    #[arg(long, default_value = "Semi-Annual")]
    pub frequency: String,

    /// Face value
    #[arg(long, default_value = "100")]
    pub face: f64,

    /// Date for accrued interest (YYYY-MM-DD)
    #[arg(long)]
    pub as_of: Option<String>,

    /// Clamp a final coupon date that overshoots maturity
    #[arg(long)]
    pub clamp: bool,
}

/// One scheduled cashflow.
#[derive(Debug, Serialize, Tabled)]
pub struct CashflowRow {
    #[tabled(rename = "#")]
    pub number: usize,
    #[tabled(rename = "Date")]
    pub date: String,
    #[tabled(rename = "Amount", display_with = "display_price")]
    pub amount: f64,
}

/// Execute the cashflows command.
pub fn execute(args: CashflowsArgs, settings: &Settings, format: OutputFormat) -> Result<()> {
    let frequency: Frequency = args
        .frequency
        .parse()
        .map_err(|_| CliError::InvalidArgument(format!("frequency '{}'", args.frequency)))?;
    let policy = if args.clamp {
        FinalCouponPolicy::ClampToMaturity
    } else {
        settings.pricing.final_coupon_policy
    };

    let bond = BondContract::builder("BOND")
        .issue_date(parse_date(&args.issue)?)
        .maturity_date(parse_date(&args.maturity)?)
        .coupon_rate(args.coupon)
        .frequency(frequency)
        .face_value(args.face)
        .final_coupon_policy(policy)
        .build()?;

    let rows: Vec<CashflowRow> = bond
        .cashflows()
        .enumerate()
        .map(|(i, (date, amount))| CashflowRow {
            number: i + 1,
            date: date.to_string(),
            amount,
        })
        .collect();

    match format {
        OutputFormat::Table => {
            print_header(&format!(
                "{} {}% {} to {}",
                bond.frequency(),
                bond.coupon_rate(),
                bond.issue_date(),
                bond.maturity_date()
            ));
            print_table(&rows)?;
            if let Some(as_of) = &args.as_of {
                let as_of = parse_date(as_of)?;
                print_header(&format!("Accrual at {as_of}"));
                let mut info = Vec::new();
                if let Some(period) = bond.coupon_period(as_of) {
                    info.push(KeyValue::new("Previous Coupon", period.previous.to_string()));
                    info.push(KeyValue::new("Next Coupon", period.next.to_string()));
                }
                info.push(KeyValue::new(
                    "Accrued Fraction",
                    format!("{:.6}", bond.accrual_fraction(as_of)),
                ));
                info.push(KeyValue::new(
                    "Accrued Interest",
                    format!("{:.6}", bond.accrued_interest(as_of)),
                ));
                print_table(&info)?;
            }
        }
        OutputFormat::Json | OutputFormat::Csv => print_output(&rows, format)?,
        OutputFormat::Minimal => println!("{}", rows.len()),
    }

    Ok(())
}
