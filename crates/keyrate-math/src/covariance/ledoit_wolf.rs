//! Ledoit-Wolf shrinkage covariance.

use nalgebra::DMatrix;

use super::{center_columns, validate_returns, CovarianceEstimator};
use crate::error::MathResult;

/// Sample covariance shrunk toward `μ·I`, with `μ` the mean variance.
///
/// The shrinkage intensity is the Ledoit and Wolf (2004) estimate
/// `min(β, δ) / δ`, where `δ = ‖S − μI‖²/p` and
/// `β = (mean_t ‖x_t x_tᵀ‖² − ‖S‖²) / (p·n)` on centred returns.
#[derive(Debug, Clone, Copy, Default)]
pub struct LedoitWolfCovariance;

impl LedoitWolfCovariance {
    /// Fits and returns the covariance with the shrinkage intensity used.
    pub fn fit_with_shrinkage(&self, returns: &DMatrix<f64>) -> MathResult<(DMatrix<f64>, f64)> {
        validate_returns(returns, 1)?;
        let n = returns.nrows() as f64;
        let p = returns.ncols();

        let x = center_columns(returns);
        let sample = x.transpose() * &x / n;
        let mu = sample.trace() / p as f64;

        let sample_norm_sq = sample.norm_squared();
        let fourth_moment = x
            .row_iter()
            .map(|row| row.norm_squared().powi(2))
            .sum::<f64>()
            / n;

        let beta = (fourth_moment - sample_norm_sq) / (p as f64 * n);
        let delta = (sample_norm_sq - 2.0 * mu * sample.trace() + p as f64 * mu * mu) / p as f64;
        let beta = beta.min(delta);
        let shrinkage = if beta <= 0.0 || delta <= 0.0 {
            0.0
        } else {
            beta / delta
        };

        log::debug!("ledoit-wolf shrinkage {shrinkage:.6} over {p} tenors");

        let mut shrunk = sample * (1.0 - shrinkage);
        for i in 0..p {
            shrunk[(i, i)] += shrinkage * mu;
        }
        Ok((shrunk, shrinkage))
    }
}

impl CovarianceEstimator for LedoitWolfCovariance {
    fn name(&self) -> &'static str {
        "ledoit_wolf"
    }

    fn fit(&self, returns: &DMatrix<f64>) -> MathResult<DMatrix<f64>> {
        self.fit_with_shrinkage(returns).map(|(cov, _)| cov)
    }
}
