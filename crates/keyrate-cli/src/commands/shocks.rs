//! Shocks command implementation.
//!
//! Reprices an inventory under parallel shifts and under loading vectors
//! read from a file or estimated from historical rate changes.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use keyrate_ext_file::{load_loadings, load_returns};
use keyrate_math::covariance::EstimatorKind;
use keyrate_math::loadings::principal_loadings;
use keyrate_portfolio::{LoadingDv01, LoadingVector, PortfolioPricer, ShockSummary};

use crate::cli::OutputFormat;
use crate::commands::PortfolioInputs;
use crate::error::CliResult;
use crate::output::{
    display_amount, display_change, print_csv, print_header, print_json, print_table,
};
use crate::settings::{ScenarioSettings, Settings};

/// Arguments for the shocks command.
#[derive(Args, Debug)]
pub struct ShocksArgs {
    #[command(flatten)]
    pub inputs: PortfolioInputs,

    /// Loading vectors (name,tenor,loading)
    #[arg(long)]
    pub loadings_file: Option<PathBuf>,

    /// Historical rate changes (header: tenors in years) for PCA loadings
    #[arg(long)]
    pub returns_file: Option<PathBuf>,

    /// Covariance estimator (empirical, ewma, ewma_drift, ledoit_wolf)
    #[arg(long)]
    pub estimator: Option<EstimatorKind>,

    /// Number of principal components to shock along
    #[arg(long)]
    pub components: Option<usize>,
}

/// One scenario row.
#[derive(Debug, Serialize, Tabled)]
pub struct ShockRow {
    #[tabled(rename = "Scenario")]
    pub scenario: String,
    #[tabled(rename = "Shift (bp)")]
    pub shift_bp: f64,
    #[tabled(rename = "Shocked Value", display_with = "display_amount")]
    pub shocked_value: f64,
    #[tabled(rename = "Change", display_with = "display_change")]
    pub value_change: f64,
}

impl From<&ShockSummary> for ShockRow {
    fn from(s: &ShockSummary) -> Self {
        Self {
            scenario: s.scenario.clone(),
            shift_bp: s.shift_bp,
            shocked_value: s.shocked_value,
            value_change: s.value_change,
        }
    }
}

/// DV01 along one loading vector.
#[derive(Debug, Serialize, Tabled)]
pub struct LoadingDv01Row {
    #[tabled(rename = "Loading")]
    pub scenario: String,
    #[tabled(rename = "DV01", display_with = "display_amount")]
    pub dv01: f64,
}

impl From<LoadingDv01> for LoadingDv01Row {
    fn from(d: LoadingDv01) -> Self {
        Self {
            scenario: d.scenario,
            dv01: d.dv01,
        }
    }
}

/// Execute the shocks command.
pub fn execute(args: ShocksArgs, settings: &Settings, format: OutputFormat) -> Result<()> {
    let pricer = PortfolioPricer::new(settings.pricing.clone())?;
    let (as_of, curve, bonds) = args.inputs.load(settings.pricing.final_coupon_policy)?;

    let mut loadings = Vec::new();
    if let Some(path) = &args.loadings_file {
        loadings.extend(load_loadings(path)?);
    }
    if let Some(path) = &args.returns_file {
        let scenario = ScenarioSettings {
            estimator: args.estimator.unwrap_or(settings.scenarios.estimator),
            components: args.components.unwrap_or(settings.scenarios.components),
            ..settings.scenarios.clone()
        };
        loadings.extend(estimate_loadings(path, &scenario)?);
    }

    let rows = {
        let _span = tracing::info_span!("shocks", loadings = loadings.len()).entered();
        pricer.price_scenarios(&bonds, as_of, &curve, &loadings)?
    };

    match format {
        OutputFormat::Table => {
            if let Some(base) = rows.first() {
                print_header(&format!(
                    "Shock summary as of {as_of} (base value {:.2})",
                    base.base_value
                ));
            }
            let table: Vec<ShockRow> = rows.iter().map(ShockRow::from).collect();
            print_table(&table)?;

            if !loadings.is_empty() {
                let dv01s: Vec<LoadingDv01Row> = pricer
                    .loading_dv01s(&bonds, as_of, &curve, &loadings)?
                    .into_iter()
                    .map(LoadingDv01Row::from)
                    .collect();
                print_header("Loading DV01");
                print_table(&dv01s)?;
            }
        }
        OutputFormat::Json => print_json(&rows)?,
        OutputFormat::Csv => print_csv(&rows)?,
        OutputFormat::Minimal => {
            for row in &rows {
                println!("{},{},{:.6}", row.scenario, row.shift_bp, row.value_change);
            }
        }
    }

    Ok(())
}

/// Fits the configured covariance estimator to a returns panel and turns
/// the leading principal components into loading vectors `PC1`, `PC2`, ...
fn estimate_loadings(
    path: &std::path::Path,
    scenario: &ScenarioSettings,
) -> CliResult<Vec<LoadingVector>> {
    let panel = load_returns(path)?;
    let estimator = scenario.estimator.build(scenario.decay)?;
    let covariance = estimator.fit(&panel.observations)?;
    let pcs = principal_loadings(&covariance, scenario.components)?;

    for (i, ratio) in pcs.explained_variance_ratio.iter().enumerate() {
        tracing::info!(
            component = i + 1,
            explained = ratio,
            estimator = estimator.name(),
            "principal component"
        );
    }

    Ok(pcs
        .loadings
        .into_iter()
        .enumerate()
        .map(|(i, loading)| {
            LoadingVector::new(format!("PC{}", i + 1), panel.tenors.clone(), loading)
        })
        .collect())
}
