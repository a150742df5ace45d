//! Portfolio-level aggregation of pricing results.

use serde::{Deserialize, Serialize};

use crate::pricer::PricingResult;

/// Sum of per-position results.
///
/// Results are already quantity-scaled, so every figure is a plain sum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    /// Number of positions aggregated.
    pub instrument_count: usize,
    /// Total dirty value.
    pub dirty_value: f64,
    /// Total accrued interest.
    pub accrued_interest: f64,
    /// Total clean value.
    pub clean_value: f64,
    /// Total parallel DV01.
    pub dv01: f64,
    /// Total DV01 per key tenor.
    pub key_rate_dv01: Vec<f64>,
    /// Key tenors the DV01 profile refers to.
    pub key_tenors: Vec<f64>,
}

impl PortfolioSummary {
    /// Aggregates `results` priced at `key_tenors`.
    ///
    /// Results whose key-rate vector is shorter than `key_tenors` contribute
    /// only to the leading entries.
    pub fn from_results(results: &[PricingResult], key_tenors: &[f64]) -> Self {
        let mut key_rate_dv01 = vec![0.0; key_tenors.len()];
        let mut summary = Self {
            instrument_count: results.len(),
            dirty_value: 0.0,
            accrued_interest: 0.0,
            clean_value: 0.0,
            dv01: 0.0,
            key_rate_dv01: Vec::new(),
            key_tenors: key_tenors.to_vec(),
        };

        for r in results {
            summary.dirty_value += r.dirty_price;
            summary.accrued_interest += r.accrued_interest;
            summary.dv01 += r.dv01;
            for (total, v) in key_rate_dv01.iter_mut().zip(&r.key_rate_dv01) {
                *total += v;
            }
        }
        summary.clean_value = summary.dirty_value - summary.accrued_interest;
        summary.key_rate_dv01 = key_rate_dv01;
        summary
    }

    /// Sum of the key-rate DV01 profile.
    pub fn key_rate_total(&self) -> f64 {
        self.key_rate_dv01.iter().sum()
    }
}
