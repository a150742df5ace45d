//! Parallel and loading-vector shock scenarios.
//!
//! Each scenario reprices the whole portfolio on a shocked curve at six
//! fixed bump sizes. Loading vectors are typically the leading principal
//! components of a tenor covariance matrix.

use serde::{Deserialize, Serialize};

use keyrate_bonds::BondContract;
use keyrate_core::types::Date;
use keyrate_curves::{bump_loading, bump_parallel, TermStructure};

use crate::error::PortfolioResult;
use crate::pricer::PortfolioPricer;

/// Bump sizes (bp) applied to every scenario.
pub const SCENARIO_SHIFTS_BP: [f64; 6] = [-200.0, -100.0, -25.0, 25.0, 100.0, 200.0];

/// Scenario name used for parallel shifts.
pub const PARALLEL_SCENARIO: &str = "Parallel";

/// A named shape of curve moves on a tenor grid.
///
/// A 1bp bump moves the rate at `tenors[i]` by `loading[i]` bp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadingVector {
    /// Scenario name, e.g. `"PC1"`.
    pub name: String,
    /// Tenor grid in years.
    pub tenors: Vec<f64>,
    /// Loading per tenor.
    pub loading: Vec<f64>,
}

impl LoadingVector {
    /// Creates a loading vector.
    pub fn new(name: impl Into<String>, tenors: Vec<f64>, loading: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            tenors,
            loading,
        }
    }

    /// A loading of 1 at every tenor; equivalent to a parallel shift.
    pub fn level(name: impl Into<String>, tenors: Vec<f64>) -> Self {
        let loading = vec![1.0; tenors.len()];
        Self::new(name, tenors, loading)
    }
}

/// Portfolio value under one shocked curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShockSummary {
    /// Scenario name.
    pub scenario: String,
    /// Bump size in basis points.
    pub shift_bp: f64,
    /// Portfolio dirty value on the base curve.
    pub base_value: f64,
    /// Portfolio dirty value on the shocked curve.
    pub shocked_value: f64,
    /// `shocked_value - base_value`.
    pub value_change: f64,
}

/// Portfolio DV01 along one loading vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadingDv01 {
    /// Loading name.
    pub scenario: String,
    /// Value lost when the curve moves by the configured bump along the loading.
    pub dv01: f64,
}

impl PortfolioPricer {
    /// DV01 of `bonds` to each loading vector.
    ///
    /// Each figure is `PV(base) - PV(shocked)` with the curve moved by the
    /// configured bump size along the loading, so a level loading reproduces
    /// the parallel DV01.
    ///
    /// # Errors
    ///
    /// Same as [`price_scenarios`](Self::price_scenarios).
    pub fn loading_dv01s<C: TermStructure>(
        &self,
        bonds: &[BondContract],
        as_of: Date,
        curve: &C,
        loadings: &[LoadingVector],
    ) -> PortfolioResult<Vec<LoadingDv01>> {
        let table = self.cashflow_table(bonds, as_of);
        let base_value = self.table_value(&table, bonds, curve)?;
        let bump_bps = self.config().bump_bps;

        loadings
            .iter()
            .map(|lv| {
                let shocked = bump_loading(curve, &lv.tenors, &lv.loading, bump_bps)?;
                Ok(LoadingDv01 {
                    scenario: lv.name.clone(),
                    dv01: base_value - self.table_value(&table, bonds, &shocked)?,
                })
            })
            .collect()
    }

    /// Reprices `bonds` under parallel and loading-vector shocks.
    ///
    /// Rows come in scenario order (parallel first, then each loading in
    /// the given order) and, within a scenario, in [`SCENARIO_SHIFTS_BP`]
    /// order.
    ///
    /// # Errors
    ///
    /// - `InsufficientCurveData` if a loading grid has fewer than two tenors
    /// - `Curve` if a loading does not match its grid
    /// - any pricing error from the base or shocked valuation
    pub fn price_scenarios<C: TermStructure>(
        &self,
        bonds: &[BondContract],
        as_of: Date,
        curve: &C,
        loadings: &[LoadingVector],
    ) -> PortfolioResult<Vec<ShockSummary>> {
        let table = self.cashflow_table(bonds, as_of);
        let base_value = self.table_value(&table, bonds, curve)?;

        let row = |scenario: &str, shift_bp: f64, shocked_value: f64| ShockSummary {
            scenario: scenario.to_string(),
            shift_bp,
            base_value,
            shocked_value,
            value_change: shocked_value - base_value,
        };

        let mut rows = Vec::with_capacity(SCENARIO_SHIFTS_BP.len() * (1 + loadings.len()));
        for &bp in &SCENARIO_SHIFTS_BP {
            let shocked = bump_parallel(curve, bp);
            rows.push(row(PARALLEL_SCENARIO, bp, self.table_value(&table, bonds, &shocked)?));
        }

        for lv in loadings {
            for &bp in &SCENARIO_SHIFTS_BP {
                let shocked = bump_loading(curve, &lv.tenors, &lv.loading, bp)?;
                rows.push(row(&lv.name, bp, self.table_value(&table, bonds, &shocked)?));
            }
        }

        log::debug!(
            "{} scenario rows for {} instruments",
            rows.len(),
            table.nrows()
        );
        Ok(rows)
    }
}
