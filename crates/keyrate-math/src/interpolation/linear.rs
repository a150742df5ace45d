//! Linear interpolation.

use crate::error::{MathError, MathResult};
use crate::interpolation::{ExtrapolationMethod, Interpolator};

/// Linear interpolation between data points.
///
/// Queries outside the data range are held flat by default, matching the
/// usual convention for zero-rate curves.
///
/// # Example
///
/// ```rust
/// use keyrate_math::interpolation::{Interpolator, LinearInterpolator};
///
/// let interp = LinearInterpolator::new(vec![1.0, 5.0, 10.0], vec![5.0, 4.0, 3.0]).unwrap();
/// assert!((interp.interpolate(3.0).unwrap() - 4.5).abs() < 1e-12);
/// assert!((interp.interpolate(30.0).unwrap() - 3.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct LinearInterpolator {
    xs: Vec<f64>,
    ys: Vec<f64>,
    extrapolation: ExtrapolationMethod,
}

impl LinearInterpolator {
    /// Creates a new linear interpolator with flat extrapolation.
    ///
    /// # Arguments
    ///
    /// * `xs` - X coordinates (must be strictly increasing)
    /// * `ys` - Y coordinates
    ///
    /// # Errors
    ///
    /// Returns an error if there are fewer than 2 points, if lengths differ,
    /// or if the x values are not strictly increasing.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        if xs.len() < 2 {
            return Err(MathError::insufficient_data(2, xs.len()));
        }
        if xs.len() != ys.len() {
            return Err(MathError::DimensionMismatch {
                rows1: xs.len(),
                cols1: 1,
                rows2: ys.len(),
                cols2: 1,
            });
        }
        if xs.windows(2).any(|w| w[1] <= w[0]) {
            return Err(MathError::invalid_input(
                "x values must be strictly increasing",
            ));
        }

        Ok(Self {
            xs,
            ys,
            extrapolation: ExtrapolationMethod::Flat,
        })
    }

    /// Sets the extrapolation behaviour.
    #[must_use]
    pub fn with_extrapolation(mut self, method: ExtrapolationMethod) -> Self {
        self.extrapolation = method;
        self
    }

    /// Returns the x coordinates.
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    /// Returns the y coordinates.
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// Finds the index i such that xs[i] <= x < xs[i+1].
    fn find_segment(&self, x: f64) -> usize {
        let last = self.xs.len() - 2;
        match self
            .xs
            .binary_search_by(|probe| probe.partial_cmp(&x).unwrap_or(std::cmp::Ordering::Equal))
        {
            Ok(i) => i.min(last),
            Err(i) => i.saturating_sub(1).min(last),
        }
    }

    fn segment_value(&self, i: usize, x: f64) -> f64 {
        let (x0, x1) = (self.xs[i], self.xs[i + 1]);
        let (y0, y1) = (self.ys[i], self.ys[i + 1]);
        y0 + (x - x0) / (x1 - x0) * (y1 - y0)
    }
}

impl Interpolator for LinearInterpolator {
    fn interpolate(&self, x: f64) -> MathResult<f64> {
        let min = self.min_x();
        let max = self.max_x();

        if x < min || x > max {
            return match self.extrapolation {
                ExtrapolationMethod::None => {
                    Err(MathError::ExtrapolationNotAllowed { x, min, max })
                }
                ExtrapolationMethod::Flat => Ok(if x < min {
                    self.ys[0]
                } else {
                    self.ys[self.ys.len() - 1]
                }),
                ExtrapolationMethod::Linear => Ok(self.segment_value(self.find_segment(x), x)),
            };
        }

        Ok(self.segment_value(self.find_segment(x), x))
    }

    fn extrapolation(&self) -> ExtrapolationMethod {
        self.extrapolation
    }

    fn min_x(&self) -> f64 {
        self.xs[0]
    }

    fn max_x(&self) -> f64 {
        self.xs[self.xs.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_linear_interpolation() {
        let interp = LinearInterpolator::new(vec![0.0, 1.0, 2.0], vec![0.0, 2.0, 4.0]).unwrap();

        assert_relative_eq!(interp.interpolate(0.0).unwrap(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(interp.interpolate(1.0).unwrap(), 2.0, epsilon = 1e-12);
        assert_relative_eq!(interp.interpolate(2.0).unwrap(), 4.0, epsilon = 1e-12);
        assert_relative_eq!(interp.interpolate(0.5).unwrap(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(interp.interpolate(1.5).unwrap(), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_flat_extrapolation() {
        let interp =
            LinearInterpolator::new(vec![1.0, 5.0, 10.0], vec![5.0, 4.0, 3.0]).unwrap();

        assert_relative_eq!(interp.interpolate(0.25).unwrap(), 5.0, epsilon = 1e-12);
        assert_relative_eq!(interp.interpolate(30.0).unwrap(), 3.0, epsilon = 1e-12);
        assert_relative_eq!(interp.interpolate(3.0).unwrap(), 4.5, epsilon = 1e-12);
    }

    #[test]
    fn test_extrapolation_disabled() {
        let interp = LinearInterpolator::new(vec![0.0, 1.0, 2.0], vec![0.0, 1.0, 2.0])
            .unwrap()
            .with_extrapolation(ExtrapolationMethod::None);

        assert!(interp.interpolate(-0.5).is_err());
        assert!(interp.interpolate(2.5).is_err());
        assert!(interp.interpolate(1.5).is_ok());
    }

    #[test]
    fn test_linear_extrapolation() {
        let interp = LinearInterpolator::new(vec![0.0, 1.0, 2.0], vec![0.0, 1.0, 2.0])
            .unwrap()
            .with_extrapolation(ExtrapolationMethod::Linear);

        assert_relative_eq!(interp.interpolate(-1.0).unwrap(), -1.0, epsilon = 1e-12);
        assert_relative_eq!(interp.interpolate(3.0).unwrap(), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_construction() {
        assert!(LinearInterpolator::new(vec![0.0], vec![1.0]).is_err());
        assert!(LinearInterpolator::new(vec![0.0, 1.0], vec![1.0]).is_err());
        assert!(LinearInterpolator::new(vec![1.0, 1.0], vec![1.0, 2.0]).is_err());
        assert!(LinearInterpolator::new(vec![2.0, 1.0], vec![1.0, 2.0]).is_err());
    }

    proptest! {
        #[test]
        fn prop_flat_interpolation_stays_within_bounds(
            ys in prop::collection::vec(-10.0f64..10.0, 4),
            x in -5.0f64..50.0,
        ) {
            let xs = vec![1.0, 2.0, 5.0, 10.0];
            let lo = ys.iter().copied().fold(f64::INFINITY, f64::min);
            let hi = ys.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let interp = LinearInterpolator::new(xs, ys).unwrap();
            let y = interp.interpolate(x).unwrap();
            prop_assert!(y >= lo - 1e-12 && y <= hi + 1e-12);
        }
    }
}
