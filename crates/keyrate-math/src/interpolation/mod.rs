//! Interpolation methods for rate curves.
//!
//! Curves in this engine are piecewise linear in tenor. Outside the
//! observed range the value is held flat at the nearest endpoint unless
//! another [`ExtrapolationMethod`] is requested.

mod linear;

pub use linear::LinearInterpolator;

use serde::{Deserialize, Serialize};

use crate::error::MathResult;

/// Trait for interpolation methods.
pub trait Interpolator: Send + Sync {
    /// Returns the interpolated value at x.
    fn interpolate(&self, x: f64) -> MathResult<f64>;

    /// Returns the extrapolation behaviour outside `[min_x, max_x]`.
    fn extrapolation(&self) -> ExtrapolationMethod;

    /// Returns the minimum x value in the data.
    fn min_x(&self) -> f64;

    /// Returns the maximum x value in the data.
    fn max_x(&self) -> f64;

    /// Checks if x is within the interpolation range.
    fn in_range(&self, x: f64) -> bool {
        x >= self.min_x() && x <= self.max_x()
    }
}

/// How an interpolator answers queries outside its data range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExtrapolationMethod {
    /// Out-of-range queries are an error.
    None,
    /// Hold the nearest endpoint value.
    #[default]
    Flat,
    /// Extend the first or last segment.
    Linear,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_flat() {
        assert_eq!(ExtrapolationMethod::default(), ExtrapolationMethod::Flat);
    }

    #[test]
    fn test_in_range() {
        let interp = LinearInterpolator::new(vec![1.0, 2.0], vec![0.0, 1.0]).unwrap();
        assert!(interp.in_range(1.5));
        assert!(interp.in_range(1.0));
        assert!(!interp.in_range(0.5));
    }
}
