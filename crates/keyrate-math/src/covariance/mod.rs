//! Covariance estimators for tenor rate changes.
//!
//! Every estimator consumes a returns matrix shaped observations × tenors
//! (one row per date) and produces a symmetric tenors × tenors covariance.
//! The estimators are interchangeable behind [`CovarianceEstimator`];
//! [`EstimatorKind`] selects one from configuration.

mod empirical;
mod ewma;
mod ledoit_wolf;

pub use empirical::EmpiricalCovariance;
pub use ewma::{EwmaCovariance, EwmaDriftCovariance, DEFAULT_DECAY};
pub use ledoit_wolf::LedoitWolfCovariance;

use std::fmt;
use std::str::FromStr;

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

use crate::error::{MathError, MathResult};

/// A strategy that estimates a covariance matrix from observed returns.
pub trait CovarianceEstimator: Send + Sync {
    /// Short identifier of the estimator.
    fn name(&self) -> &'static str;

    /// Estimates the tenors × tenors covariance of `returns`
    /// (observations × tenors).
    fn fit(&self, returns: &DMatrix<f64>) -> MathResult<DMatrix<f64>>;
}

impl<T: CovarianceEstimator + ?Sized> CovarianceEstimator for Box<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn fit(&self, returns: &DMatrix<f64>) -> MathResult<DMatrix<f64>> {
        (**self).fit(returns)
    }
}

/// Configuration-level selector for a covariance strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EstimatorKind {
    /// Maximum-likelihood sample covariance.
    Empirical,
    /// Driftless exponentially weighted covariance.
    #[default]
    Ewma,
    /// Exponentially weighted covariance around a drifting mean.
    EwmaDrift,
    /// Sample covariance shrunk toward a scaled identity.
    LedoitWolf,
}

impl EstimatorKind {
    /// All estimator kinds.
    pub const ALL: [EstimatorKind; 4] = [
        EstimatorKind::Empirical,
        EstimatorKind::Ewma,
        EstimatorKind::EwmaDrift,
        EstimatorKind::LedoitWolf,
    ];

    /// Builds the estimator. `decay` is only read by the EWMA variants.
    ///
    /// # Errors
    ///
    /// Returns `MathError::InvalidInput` if `decay` is outside `(0, 1)` for
    /// an EWMA variant.
    pub fn build(self, decay: f64) -> MathResult<Box<dyn CovarianceEstimator>> {
        Ok(match self {
            EstimatorKind::Empirical => Box::new(EmpiricalCovariance),
            EstimatorKind::Ewma => Box::new(EwmaCovariance::new(decay)?),
            EstimatorKind::EwmaDrift => Box::new(EwmaDriftCovariance::new(decay)?),
            EstimatorKind::LedoitWolf => Box::new(LedoitWolfCovariance),
        })
    }

    fn label(self) -> &'static str {
        match self {
            EstimatorKind::Empirical => "empirical",
            EstimatorKind::Ewma => "ewma",
            EstimatorKind::EwmaDrift => "ewma_drift",
            EstimatorKind::LedoitWolf => "ledoit_wolf",
        }
    }
}

impl fmt::Display for EstimatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for EstimatorKind {
    type Err = MathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('-', "_");
        EstimatorKind::ALL
            .into_iter()
            .find(|kind| kind.label() == key)
            .ok_or_else(|| MathError::invalid_input(format!("unknown covariance estimator: {s}")))
    }
}

/// Checks that a returns matrix has at least `min_obs` rows, one column,
/// and only finite entries.
pub(crate) fn validate_returns(returns: &DMatrix<f64>, min_obs: usize) -> MathResult<()> {
    if returns.ncols() == 0 {
        return Err(MathError::invalid_input("returns matrix has no tenor columns"));
    }
    if returns.nrows() < min_obs {
        return Err(MathError::insufficient_data(min_obs, returns.nrows()));
    }
    if returns.iter().any(|v| !v.is_finite()) {
        return Err(MathError::invalid_input("returns contain non-finite values"));
    }
    Ok(())
}

/// Subtracts each column's mean.
pub(crate) fn center_columns(returns: &DMatrix<f64>) -> DMatrix<f64> {
    let n = returns.nrows() as f64;
    let mut centered = returns.clone();
    for mut col in centered.column_iter_mut() {
        let mean = col.sum() / n;
        col.add_scalar_mut(-mean);
    }
    centered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimator_kind_parsing() {
        assert_eq!("ewma".parse::<EstimatorKind>().unwrap(), EstimatorKind::Ewma);
        assert_eq!(
            "Ledoit-Wolf".parse::<EstimatorKind>().unwrap(),
            EstimatorKind::LedoitWolf
        );
        assert!("garch".parse::<EstimatorKind>().is_err());
    }

    #[test]
    fn test_estimator_kind_serde() {
        let json = serde_json::to_string(&EstimatorKind::EwmaDrift).unwrap();
        assert_eq!(json, "\"ewma_drift\"");
    }

    #[test]
    fn test_build_every_kind() {
        let returns = DMatrix::from_row_slice(3, 2, &[0.1, 0.2, -0.1, 0.0, 0.05, -0.05]);
        for kind in EstimatorKind::ALL {
            let est = kind.build(DEFAULT_DECAY).unwrap();
            let cov = est.fit(&returns).unwrap();
            assert_eq!(cov.shape(), (2, 2));
            assert!((cov[(0, 1)] - cov[(1, 0)]).abs() < 1e-15, "{}", est.name());
        }
    }

    #[test]
    fn test_validate_returns() {
        let empty = DMatrix::<f64>::zeros(3, 0);
        assert!(validate_returns(&empty, 1).is_err());

        let nan = DMatrix::from_row_slice(2, 1, &[0.1, f64::NAN]);
        assert!(validate_returns(&nan, 1).is_err());
    }
}
