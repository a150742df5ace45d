//! Error types for portfolio pricing.

use keyrate_bonds::BondError;
use keyrate_curves::CurveError;
use thiserror::Error;

/// Result type for portfolio operations.
pub type PortfolioResult<T> = Result<T, PricingError>;

/// Errors that can occur while pricing a portfolio.
///
/// Any error fails the whole request; no partial results are returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    /// An instrument's terms are malformed.
    #[error("Invalid instrument '{id}': {reason}")]
    InvalidInstrument {
        /// The instrument ID.
        id: String,
        /// The reason the instrument is invalid.
        reason: String,
    },

    /// The curve has too few usable points.
    #[error("Insufficient curve data: {reason}")]
    InsufficientCurveData {
        /// What is missing.
        reason: String,
    },

    /// The curve produced no finite rate for a live cashflow.
    #[error("Missing rate for '{id}' at {tenor:.4}y")]
    MissingRateData {
        /// The instrument ID.
        id: String,
        /// Time to the cashflow in years.
        tenor: f64,
    },

    /// A discount factor evaluated to a non-finite value.
    #[error("Non-finite discount factor for '{id}' at {tenor:.4}y (rate {rate})")]
    NumericInstability {
        /// The instrument ID.
        id: String,
        /// Time to the cashflow in years.
        tenor: f64,
        /// Rate in percent used for the discount factor.
        rate: f64,
    },

    /// The pricing configuration is unusable.
    #[error("Invalid pricing configuration: {reason}")]
    InvalidConfig {
        /// The reason the configuration is invalid.
        reason: String,
    },

    /// Other curve construction or shock failure.
    #[error(transparent)]
    Curve(CurveError),
}

impl PricingError {
    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }
}

impl From<BondError> for PricingError {
    fn from(err: BondError) -> Self {
        match err {
            BondError::InvalidInstrument { id, reason } => Self::InvalidInstrument { id, reason },
            BondError::Core(core) => Self::InvalidInstrument {
                id: String::new(),
                reason: core.to_string(),
            },
        }
    }
}

impl From<CurveError> for PricingError {
    fn from(err: CurveError) -> Self {
        match err {
            CurveError::InsufficientCurveData { reason } => Self::InsufficientCurveData { reason },
            CurveError::InvalidKeyTenors { reason } => Self::InvalidConfig { reason },
            other => Self::Curve(other),
        }
    }
}
