//! Error types for curve operations.

use keyrate_math::MathError;
use thiserror::Error;

/// A specialized Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Error types for curve operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    /// Not enough usable points to define a curve.
    #[error("Insufficient curve data: {reason}")]
    InsufficientCurveData {
        /// Description of what is missing.
        reason: String,
    },

    /// Tenors are not strictly increasing.
    #[error("Non-monotonic tenors at index {index}: {prev:.4} >= {current:.4}")]
    NonMonotonicTenors {
        /// Index where monotonicity violation occurred.
        index: usize,
        /// Previous tenor value.
        prev: f64,
        /// Current tenor value.
        current: f64,
    },

    /// A rate or loading entry is missing or not finite.
    #[error("Missing rate data at tenor {tenor:.4}")]
    MissingRateData {
        /// Tenor of the offending entry.
        tenor: f64,
    },

    /// Key tenors are unusable for key-rate shocks.
    #[error("Invalid key tenors: {reason}")]
    InvalidKeyTenors {
        /// Description of the problem.
        reason: String,
    },

    /// Two inputs that must align have different lengths.
    #[error("Dimension mismatch for {what}: expected {expected}, got {got}")]
    DimensionMismatch {
        /// The input being checked.
        what: &'static str,
        /// Expected length.
        expected: usize,
        /// Actual length.
        got: usize,
    },

    /// Error from the numerical layer.
    #[error(transparent)]
    Math(#[from] MathError),
}

impl CurveError {
    /// Creates an insufficient curve data error.
    #[must_use]
    pub fn insufficient_data(reason: impl Into<String>) -> Self {
        Self::InsufficientCurveData {
            reason: reason.into(),
        }
    }

    /// Creates an invalid key tenors error.
    #[must_use]
    pub fn invalid_key_tenors(reason: impl Into<String>) -> Self {
        Self::InvalidKeyTenors {
            reason: reason.into(),
        }
    }
}
