//! Error types for bond operations.

use keyrate_core::CoreError;
use thiserror::Error;

/// A specialized Result type for bond operations.
pub type BondResult<T> = Result<T, BondError>;

/// Errors that can occur during bond operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BondError {
    /// The instrument's terms cannot produce a cashflow schedule.
    #[error("Invalid instrument {id}: {reason}")]
    InvalidInstrument {
        /// Instrument identifier.
        id: String,
        /// Description of what's invalid.
        reason: String,
    },

    /// Core library error.
    #[error("Core error: {0}")]
    Core(#[from] CoreError),
}

impl BondError {
    /// Creates an invalid instrument error.
    #[must_use]
    pub fn invalid_instrument(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInstrument {
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// Returns the identifier of the offending instrument, if known.
    pub fn instrument_id(&self) -> Option<&str> {
        match self {
            Self::InvalidInstrument { id, .. } => Some(id),
            Self::Core(_) => None,
        }
    }
}
