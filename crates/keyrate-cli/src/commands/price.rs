//! Price command implementation.
//!
//! Values every position in an inventory and aggregates the portfolio.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use keyrate_core::types::Date;
use keyrate_portfolio::{PortfolioPricer, PortfolioSummary, PricingResult};

use crate::cli::OutputFormat;
use crate::commands::{tenor_label, PortfolioInputs};
use crate::output::{display_amount, print_header, print_json, print_output, print_table, KeyValue};
use crate::settings::Settings;

/// Arguments for the price command.
#[derive(Args, Debug)]
pub struct PriceArgs {
    #[command(flatten)]
    pub inputs: PortfolioInputs,
}

/// One position row.
#[derive(Debug, Serialize, Tabled)]
pub struct PositionRow {
    #[tabled(skip)]
    pub as_of: Date,
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Quantity")]
    pub quantity: f64,
    #[tabled(rename = "Dirty", display_with = "display_amount")]
    pub dirty_price: f64,
    #[tabled(rename = "Accrued", display_with = "display_amount")]
    pub accrued_interest: f64,
    #[tabled(rename = "Clean", display_with = "display_amount")]
    pub clean_price: f64,
    #[tabled(rename = "DV01", display_with = "display_amount")]
    pub dv01: f64,
}

impl PositionRow {
    fn new(as_of: Date, r: &PricingResult) -> Self {
        Self {
            as_of,
            id: r.id.clone(),
            quantity: r.quantity,
            dirty_price: r.dirty_price,
            accrued_interest: r.accrued_interest,
            clean_price: r.clean_price,
            dv01: r.dv01,
        }
    }
}

/// Portfolio DV01 at one key tenor.
#[derive(Debug, Serialize, Tabled)]
pub struct KeyRateRow {
    #[tabled(rename = "Key")]
    pub key: String,
    #[tabled(rename = "DV01", display_with = "display_amount")]
    pub dv01: f64,
}

#[derive(Serialize)]
struct PriceReport<'a> {
    as_of: Date,
    positions: &'a [PricingResult],
    summary: &'a PortfolioSummary,
}

/// Execute the price command.
pub fn execute(args: PriceArgs, settings: &Settings, format: OutputFormat) -> Result<()> {
    let pricer = PortfolioPricer::new(settings.pricing.clone())?;
    let (as_of, curve, bonds) = args.inputs.load(settings.pricing.final_coupon_policy)?;

    let results = {
        let _span = tracing::info_span!("price", positions = bonds.len()).entered();
        pricer.price(&bonds, as_of, &curve)?
    };
    let summary = PortfolioSummary::from_results(&results, pricer.config().key_tenors());
    tracing::info!(dirty_value = summary.dirty_value, dv01 = summary.dv01, "priced portfolio");

    match format {
        OutputFormat::Table => {
            print_header(&format!("Positions as of {as_of}"));
            let rows: Vec<PositionRow> = results.iter().map(|r| PositionRow::new(as_of, r)).collect();
            print_table(&rows)?;

            print_header("Portfolio");
            print_table(&[
                KeyValue::new("Instruments", summary.instrument_count.to_string()),
                KeyValue::amount("Dirty Value", summary.dirty_value),
                KeyValue::amount("Accrued Interest", summary.accrued_interest),
                KeyValue::amount("Clean Value", summary.clean_value),
                KeyValue::amount("DV01", summary.dv01),
                KeyValue::amount("Key-Rate DV01 Total", summary.key_rate_total()),
            ])?;

            print_header("Key-Rate DV01");
            print_table(&key_rate_rows(&summary))?;
        }
        OutputFormat::Json => print_json(&PriceReport {
            as_of,
            positions: &results,
            summary: &summary,
        })?,
        OutputFormat::Csv => {
            let rows: Vec<PositionRow> = results.iter().map(|r| PositionRow::new(as_of, r)).collect();
            print_output(&rows, format)?;
        }
        OutputFormat::Minimal => println!("{:.6}", summary.dirty_value),
    }

    Ok(())
}

fn key_rate_rows(summary: &PortfolioSummary) -> Vec<KeyRateRow> {
    summary
        .key_tenors
        .iter()
        .zip(&summary.key_rate_dv01)
        .map(|(&tenor, &dv01)| KeyRateRow {
            key: tenor_label(tenor),
            dv01,
        })
        .collect()
}
