//! Exponentially weighted covariance estimators.

use nalgebra::{DMatrix, DVector};

use super::{validate_returns, CovarianceEstimator};
use crate::error::{MathError, MathResult};

/// RiskMetrics daily decay factor.
pub const DEFAULT_DECAY: f64 = 0.94;

fn check_decay(decay: f64) -> MathResult<f64> {
    if decay.is_finite() && decay > 0.0 && decay < 1.0 {
        Ok(decay)
    } else {
        Err(MathError::invalid_input(format!(
            "decay must lie in (0, 1), got {decay}"
        )))
    }
}

/// Driftless EWMA covariance.
///
/// Starting from a zero matrix, each observation `r` updates
/// `cov = λ·cov + (1 − λ)·r·rᵀ`.
#[derive(Debug, Clone, Copy)]
pub struct EwmaCovariance {
    decay: f64,
}

impl EwmaCovariance {
    /// Creates an estimator with decay factor λ.
    ///
    /// # Errors
    ///
    /// Returns `MathError::InvalidInput` unless `0 < decay < 1`.
    pub fn new(decay: f64) -> MathResult<Self> {
        Ok(Self {
            decay: check_decay(decay)?,
        })
    }

    /// Returns the decay factor.
    pub fn decay(&self) -> f64 {
        self.decay
    }
}

impl Default for EwmaCovariance {
    fn default() -> Self {
        Self {
            decay: DEFAULT_DECAY,
        }
    }
}

impl CovarianceEstimator for EwmaCovariance {
    fn name(&self) -> &'static str {
        "ewma"
    }

    fn fit(&self, returns: &DMatrix<f64>) -> MathResult<DMatrix<f64>> {
        validate_returns(returns, 1)?;
        let lam = self.decay;
        let n = returns.ncols();
        let mut cov = DMatrix::<f64>::zeros(n, n);

        for row in returns.row_iter() {
            let r = row.transpose();
            cov = cov * lam + (&r * r.transpose()) * (1.0 - lam);
        }

        Ok(cov)
    }
}

/// EWMA covariance around an exponentially weighted mean.
///
/// Per observation: `μ = λ·μ + (1 − λ)·r`, `δ = r − μ`,
/// `cov = λ·cov + (1 − λ)·δ·δᵀ`, with `μ` and `cov` starting at zero.
#[derive(Debug, Clone, Copy)]
pub struct EwmaDriftCovariance {
    decay: f64,
}

impl EwmaDriftCovariance {
    /// Creates an estimator with decay factor λ.
    ///
    /// # Errors
    ///
    /// Returns `MathError::InvalidInput` unless `0 < decay < 1`.
    pub fn new(decay: f64) -> MathResult<Self> {
        Ok(Self {
            decay: check_decay(decay)?,
        })
    }

    /// Returns the decay factor.
    pub fn decay(&self) -> f64 {
        self.decay
    }

    /// Fits and also returns the final drift vector.
    pub fn fit_with_drift(
        &self,
        returns: &DMatrix<f64>,
    ) -> MathResult<(DMatrix<f64>, DVector<f64>)> {
        validate_returns(returns, 1)?;
        let lam = self.decay;
        let n = returns.ncols();
        let mut cov = DMatrix::<f64>::zeros(n, n);
        let mut drift = DVector::<f64>::zeros(n);

        for row in returns.row_iter() {
            let r = row.transpose();
            drift = &drift * lam + &r * (1.0 - lam);
            let delta = &r - &drift;
            cov = cov * lam + (&delta * delta.transpose()) * (1.0 - lam);
        }

        Ok((cov, drift))
    }
}

impl Default for EwmaDriftCovariance {
    fn default() -> Self {
        Self {
            decay: DEFAULT_DECAY,
        }
    }
}

impl CovarianceEstimator for EwmaDriftCovariance {
    fn name(&self) -> &'static str {
        "ewma_drift"
    }

    fn fit(&self, returns: &DMatrix<f64>) -> MathResult<DMatrix<f64>> {
        self.fit_with_drift(returns).map(|(cov, _)| cov)
    }
}
