//! Shocked curves: a base curve plus an additive rate adjustment.
//!
//! Shocks are wrappers, so bumping a curve never copies it unless the shock
//! itself is defined on a new grid (loading-vector bumps).

use crate::error::{CurveError, CurveResult};
use crate::key_rate::{key_rate_weight, KeyRateShockBuilder, ONE_BP_PCT};
use crate::term_structure::TermStructure;
use crate::yield_curve::YieldCurve;

/// The additive part of a [`ShockedCurve`], in percentage points.
#[derive(Debug, Clone)]
pub enum Adjustment {
    /// Same shift at every tenor.
    Parallel {
        /// Shift in percentage points.
        shift_pct: f64,
    },
    /// Tenor-indexed shift, linearly interpolated and flat outside its grid.
    Loading(YieldCurve),
    /// Triangular shift around one key tenor.
    KeyRate {
        /// All key tenors, ascending.
        keys: Vec<f64>,
        /// Index of the shocked key.
        index: usize,
        /// Peak shift in percentage points.
        shift_pct: f64,
    },
}

impl Adjustment {
    /// Returns the shift (percentage points) at tenor `t`.
    pub fn shift_at(&self, t: f64) -> f64 {
        match self {
            Adjustment::Parallel { shift_pct } => *shift_pct,
            Adjustment::Loading(shifts) => shifts.evaluate(t),
            Adjustment::KeyRate {
                keys,
                index,
                shift_pct,
            } => key_rate_weight(keys, *index, t) * shift_pct,
        }
    }
}

/// A base curve composed with an [`Adjustment`].
///
/// `evaluate(t) = base.evaluate(t) + adjustment.shift_at(t)`.
#[derive(Debug, Clone)]
pub struct ShockedCurve<C> {
    base: C,
    adjustment: Adjustment,
}

impl<C: TermStructure> ShockedCurve<C> {
    /// Wraps `base` with an adjustment.
    pub fn new(base: C, adjustment: Adjustment) -> Self {
        Self { base, adjustment }
    }

    /// Returns the base curve.
    pub fn base(&self) -> &C {
        &self.base
    }

    /// Returns the adjustment.
    pub fn adjustment(&self) -> &Adjustment {
        &self.adjustment
    }

    /// Returns the shift (percentage points) at tenor `t`.
    pub fn shift_at(&self, t: f64) -> f64 {
        self.adjustment.shift_at(t)
    }
}

impl<C: TermStructure> TermStructure for ShockedCurve<C> {
    fn evaluate(&self, t: f64) -> f64 {
        self.base.evaluate(t) + self.adjustment.shift_at(t)
    }

    fn tenor_bounds(&self) -> (f64, f64) {
        self.base.tenor_bounds()
    }
}

/// Shifts every tenor by `shift_bp` basis points (`shift_bp / 100` percent).
///
/// Pass `&curve` to keep ownership of the base curve.
pub fn bump_parallel<C: TermStructure>(curve: C, shift_bp: f64) -> ShockedCurve<C> {
    ShockedCurve::new(
        curve,
        Adjustment::Parallel {
            shift_pct: shift_bp * ONE_BP_PCT,
        },
    )
}

/// Shifts the curve along a loading vector defined on `tenor_grid`.
///
/// The base curve is sampled on the grid and `loading * shift_bp / 100` is
/// added point by point; the result is interpolated linearly over the grid
/// and held flat outside it. Tenors between the grid points therefore follow
/// the sampled base, not the original curve's own points.
///
/// # Errors
///
/// - `InsufficientCurveData` for a grid of fewer than two tenors
/// - `DimensionMismatch` if the loading and grid lengths differ
/// - `MissingRateData` if a loading entry is not finite
/// - `NonMonotonicTenors` for a repeated grid tenor
pub fn bump_loading<C: TermStructure>(
    curve: &C,
    tenor_grid: &[f64],
    loading: &[f64],
    shift_bp: f64,
) -> CurveResult<ShockedCurve<YieldCurve>> {
    if tenor_grid.len() < 2 {
        return Err(CurveError::insufficient_data(format!(
            "loading grid needs at least 2 tenors, got {}",
            tenor_grid.len()
        )));
    }
    if loading.len() != tenor_grid.len() {
        return Err(CurveError::DimensionMismatch {
            what: "loading vector",
            expected: tenor_grid.len(),
            got: loading.len(),
        });
    }
    if let Some((&tenor, _)) = tenor_grid
        .iter()
        .zip(loading)
        .find(|(_, l)| !l.is_finite())
    {
        return Err(CurveError::MissingRateData { tenor });
    }

    let shift_pct = shift_bp * ONE_BP_PCT;
    log::debug!(
        "Resampling curve on {} grid tenors for a {shift_bp}bp loading shock",
        tenor_grid.len()
    );
    let sampled = tenor_grid
        .iter()
        .copied()
        .zip(curve.evaluate_many(tenor_grid))
        .collect();
    let shifts = tenor_grid
        .iter()
        .zip(loading)
        .map(|(&t, &l)| (t, l * shift_pct))
        .collect();

    Ok(ShockedCurve::new(
        YieldCurve::from_points(sampled)?,
        Adjustment::Loading(YieldCurve::from_points(shifts)?),
    ))
}

/// Shifts the curve around key `index` of `builder` by `shift_bp` at the
/// key, fading to zero at the neighbouring keys.
///
/// # Errors
///
/// Returns `InvalidKeyTenors` if `index` is out of range.
pub fn bump_key_rate<C: TermStructure>(
    curve: C,
    builder: &KeyRateShockBuilder,
    index: usize,
    shift_bp: f64,
) -> CurveResult<ShockedCurve<C>> {
    if index >= builder.len() {
        return Err(CurveError::invalid_key_tenors(format!(
            "key index {index} out of range for {} keys",
            builder.len()
        )));
    }
    Ok(ShockedCurve::new(
        curve,
        Adjustment::KeyRate {
            keys: builder.keys().to_vec(),
            index,
            shift_pct: shift_bp * ONE_BP_PCT,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::sync::Arc;

    fn sample_curve() -> YieldCurve {
        YieldCurve::from_points(vec![(1.0, 5.0), (5.0, 4.0), (10.0, 3.0)]).unwrap()
    }

    #[test]
    fn test_zero_parallel_is_neutral() {
        let curve = sample_curve();
        let shocked = bump_parallel(&curve, 0.0);
        for t in [0.0, 0.5, 1.0, 3.0, 7.0, 10.0, 40.0] {
            assert_relative_eq!(shocked.evaluate(t), curve.evaluate(t), epsilon = 1e-15);
        }
    }

    #[test]
    fn test_parallel_shift() {
        let curve = sample_curve();
        let up = bump_parallel(&curve, 100.0);
        let down = bump_parallel(&curve, -25.0);
        assert_relative_eq!(up.evaluate(3.0), 5.5, epsilon = 1e-12);
        assert_relative_eq!(down.evaluate(3.0), 4.25, epsilon = 1e-12);
        assert_eq!(up.tenor_bounds(), curve.tenor_bounds());
    }

    #[test]
    fn test_parallel_over_arc() {
        let curve = Arc::new(sample_curve());
        let shocked = bump_parallel(Arc::clone(&curve), 1.0);
        assert_relative_eq!(shocked.evaluate(10.0), 3.01, epsilon = 1e-12);
    }

    #[test]
    fn test_stacked_shocks() {
        let curve = sample_curve();
        let once = bump_parallel(&curve, 10.0);
        let twice = bump_parallel(&once, 15.0);
        assert_relative_eq!(twice.evaluate(5.0), 4.25, epsilon = 1e-12);
    }

    #[test]
    fn test_loading_shift() {
        let curve = sample_curve();
        let grid = [1.0, 5.0, 10.0];
        let loading = [1.0, 0.5, 0.0];
        let shocked = bump_loading(&curve, &grid, &loading, 100.0).unwrap();

        assert_relative_eq!(shocked.evaluate(1.0), 6.0, epsilon = 1e-12);
        assert_relative_eq!(shocked.evaluate(5.0), 4.5, epsilon = 1e-12);
        assert_relative_eq!(shocked.evaluate(10.0), 3.0, epsilon = 1e-12);
        // Between grid points: base 4.5 plus interpolated shift 0.75
        assert_relative_eq!(shocked.evaluate(3.0), 5.25, epsilon = 1e-12);
        // Flat beyond the grid
        assert_relative_eq!(shocked.evaluate(0.25), 6.0, epsilon = 1e-12);
        assert_relative_eq!(shocked.evaluate(30.0), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_loading_resamples_base() {
        let curve = sample_curve();
        let shocked = bump_loading(&curve, &[1.0, 10.0], &[0.0, 0.0], 50.0).unwrap();
        // The 5y point is not on the grid, so the shocked curve is a straight line.
        assert_relative_eq!(shocked.evaluate(5.0), 5.0 - 2.0 * 4.0 / 9.0, epsilon = 1e-12);
    }

    #[test]
    fn test_loading_errors() {
        let curve = sample_curve();
        assert!(matches!(
            bump_loading(&curve, &[1.0], &[1.0], 10.0),
            Err(CurveError::InsufficientCurveData { .. })
        ));
        assert!(matches!(
            bump_loading(&curve, &[1.0, 2.0], &[1.0], 10.0),
            Err(CurveError::DimensionMismatch { expected: 2, got: 1, .. })
        ));
        assert!(matches!(
            bump_loading(&curve, &[1.0, 2.0], &[1.0, f64::NAN], 10.0),
            Err(CurveError::MissingRateData { .. })
        ));
    }

    #[test]
    fn test_key_rate_bump() {
        let curve = sample_curve();
        let builder = KeyRateShockBuilder::standard();
        let shocked = bump_key_rate(&curve, &builder, 3, 1.0).unwrap();

        assert_relative_eq!(shocked.shift_at(5.0), 0.01, epsilon = 1e-15);
        assert_relative_eq!(shocked.shift_at(4.0), 0.005, epsilon = 1e-15);
        assert_relative_eq!(shocked.shift_at(10.0), 0.0, epsilon = 1e-15);

        assert!(bump_key_rate(&curve, &builder, 8, 1.0).is_err());
    }
}
