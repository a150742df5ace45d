//! Maximum-likelihood sample covariance.

use nalgebra::DMatrix;

use super::{center_columns, validate_returns, CovarianceEstimator};
use crate::error::MathResult;

/// Sample covariance normalised by the number of observations.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmpiricalCovariance;

impl CovarianceEstimator for EmpiricalCovariance {
    fn name(&self) -> &'static str {
        "empirical"
    }

    fn fit(&self, returns: &DMatrix<f64>) -> MathResult<DMatrix<f64>> {
        validate_returns(returns, 1)?;
        let centered = center_columns(returns);
        Ok(centered.transpose() * &centered / returns.nrows() as f64)
    }
}
