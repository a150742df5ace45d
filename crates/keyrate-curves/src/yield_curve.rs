//! Piecewise-linear zero-rate curve.

use keyrate_math::interpolation::{Interpolator, LinearInterpolator};

use crate::error::{CurveError, CurveResult};
use crate::term_structure::TermStructure;

/// A zero-rate curve defined by (tenor in years, rate in percent) points.
///
/// Values between points are linearly interpolated; outside the first and
/// last tenor the nearest rate is held flat.
///
/// # Example
///
/// ```rust
/// use keyrate_curves::{TermStructure, YieldCurve};
///
/// let curve = YieldCurve::from_points(vec![(10.0, 3.0), (1.0, 5.0), (5.0, 4.0)]).unwrap();
/// assert_eq!(curve.tenors(), &[1.0, 5.0, 10.0]);
/// assert!((curve.evaluate(0.0) - 5.0).abs() < 1e-12);
/// assert!((curve.evaluate(15.0) - 3.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct YieldCurve {
    interpolator: LinearInterpolator,
}

impl YieldCurve {
    /// Builds a curve from (tenor, rate) points in any order.
    ///
    /// Points are sorted by tenor first.
    ///
    /// # Errors
    ///
    /// - `InsufficientCurveData` for fewer than two distinct tenors or a
    ///   non-finite tenor or rate
    /// - `NonMonotonicTenors` when a tenor appears twice among two or more
    ///   distinct tenors
    pub fn from_points(mut points: Vec<(f64, f64)>) -> CurveResult<Self> {
        if points.len() < 2 {
            return Err(CurveError::insufficient_data(format!(
                "need at least 2 points, got {}",
                points.len()
            )));
        }
        if let Some(&(t, r)) = points.iter().find(|(t, r)| !t.is_finite() || !r.is_finite()) {
            return Err(CurveError::insufficient_data(format!(
                "non-finite point ({t}, {r})"
            )));
        }

        points.sort_by(|a, b| a.0.total_cmp(&b.0));

        let distinct = 1 + points.windows(2).filter(|pair| pair[1].0 > pair[0].0).count();
        if distinct < 2 {
            return Err(CurveError::insufficient_data(format!(
                "need at least 2 distinct tenors, got {distinct}"
            )));
        }

        for (i, pair) in points.windows(2).enumerate() {
            if pair[1].0 <= pair[0].0 {
                return Err(CurveError::NonMonotonicTenors {
                    index: i + 1,
                    prev: pair[0].0,
                    current: pair[1].0,
                });
            }
        }

        log::debug!(
            "Built yield curve with {} points over [{}, {}]",
            points.len(),
            points[0].0,
            points[points.len() - 1].0
        );
        let (tenors, rates): (Vec<f64>, Vec<f64>) = points.into_iter().unzip();
        let interpolator = LinearInterpolator::new(tenors, rates)?;
        Ok(Self { interpolator })
    }

    /// Flat curve at `rate` percent, spanning the given tenors.
    pub fn flat(rate: f64, min_tenor: f64, max_tenor: f64) -> CurveResult<Self> {
        Self::from_points(vec![(min_tenor, rate), (max_tenor, rate)])
    }

    /// Returns the tenors, ascending.
    pub fn tenors(&self) -> &[f64] {
        self.interpolator.xs()
    }

    /// Returns the rates (percent), aligned with [`tenors`](Self::tenors).
    pub fn rates(&self) -> &[f64] {
        self.interpolator.ys()
    }

    /// Returns the (tenor, rate) points.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.tenors()
            .iter()
            .copied()
            .zip(self.rates().iter().copied())
            .collect()
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.tenors().len()
    }

    /// Always false; a curve holds at least two points.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl TermStructure for YieldCurve {
    fn evaluate(&self, t: f64) -> f64 {
        if t < self.interpolator.min_x() || t > self.interpolator.max_x() {
            log::trace!(
                "Holding rate flat at tenor {t} outside [{}, {}]",
                self.interpolator.min_x(),
                self.interpolator.max_x()
            );
        }
        // Flat extrapolation never fails.
        self.interpolator.interpolate(t).unwrap_or(f64::NAN)
    }

    fn tenor_bounds(&self) -> (f64, f64) {
        (self.interpolator.min_x(), self.interpolator.max_x())
    }
}

/// Incremental curve construction.
///
/// Points can be added one at a time, for example while streaming rows from
/// a provider. Building or evaluating before two points are loaded fails
/// with `InsufficientCurveData`.
#[derive(Debug, Clone, Default)]
pub struct YieldCurveBuilder {
    points: Vec<(f64, f64)>,
}

impl YieldCurveBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a point, consuming and returning the builder.
    #[must_use]
    pub fn with_point(mut self, tenor: f64, rate: f64) -> Self {
        self.points.push((tenor, rate));
        self
    }

    /// Adds a point in place.
    pub fn add_point(&mut self, tenor: f64, rate: f64) -> &mut Self {
        self.points.push((tenor, rate));
        self
    }

    /// Number of points loaded so far.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if no point has been loaded.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Builds the curve from the loaded points.
    pub fn build(&self) -> CurveResult<YieldCurve> {
        YieldCurve::from_points(self.points.clone())
    }

    /// Evaluates the curve defined by the loaded points.
    pub fn try_evaluate(&self, t: f64) -> CurveResult<f64> {
        self.build().map(|curve| curve.evaluate(t))
    }
}
