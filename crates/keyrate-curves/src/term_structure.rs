//! The evaluation interface shared by all curves.

use std::sync::Arc;

/// A zero-rate term structure: tenor in years to rate in percent.
///
/// Implemented by [`YieldCurve`](crate::YieldCurve) and
/// [`ShockedCurve`](crate::ShockedCurve), and forwarded through references,
/// `Box`, and `Arc`, so shocks can wrap borrowed or shared curves.
pub trait TermStructure: Send + Sync {
    /// Returns the rate (percent) at tenor `t` years.
    fn evaluate(&self, t: f64) -> f64;

    /// Returns the tenor range spanned by the underlying points.
    ///
    /// Evaluation outside this range is flat-extrapolated.
    fn tenor_bounds(&self) -> (f64, f64);

    /// Evaluates the curve at each tenor.
    fn evaluate_many(&self, ts: &[f64]) -> Vec<f64> {
        ts.iter().map(|&t| self.evaluate(t)).collect()
    }

    /// Returns true if `t` lies within the tenor bounds.
    fn in_range(&self, t: f64) -> bool {
        let (min, max) = self.tenor_bounds();
        t >= min && t <= max
    }
}

impl<T: TermStructure + ?Sized> TermStructure for Arc<T> {
    fn evaluate(&self, t: f64) -> f64 {
        (**self).evaluate(t)
    }

    fn tenor_bounds(&self) -> (f64, f64) {
        (**self).tenor_bounds()
    }

    fn evaluate_many(&self, ts: &[f64]) -> Vec<f64> {
        (**self).evaluate_many(ts)
    }
}

impl<T: TermStructure + ?Sized> TermStructure for Box<T> {
    fn evaluate(&self, t: f64) -> f64 {
        (**self).evaluate(t)
    }

    fn tenor_bounds(&self) -> (f64, f64) {
        (**self).tenor_bounds()
    }

    fn evaluate_many(&self, ts: &[f64]) -> Vec<f64> {
        (**self).evaluate_many(ts)
    }
}

impl<T: TermStructure + ?Sized> TermStructure for &T {
    fn evaluate(&self, t: f64) -> f64 {
        (**self).evaluate(t)
    }

    fn tenor_bounds(&self) -> (f64, f64) {
        (**self).tenor_bounds()
    }

    fn evaluate_many(&self, ts: &[f64]) -> Vec<f64> {
        (**self).evaluate_many(ts)
    }
}
