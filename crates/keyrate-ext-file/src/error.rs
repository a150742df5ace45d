//! Error types for file-backed sources.

use keyrate_bonds::BondError;
use keyrate_core::types::Date;
use keyrate_curves::CurveError;
use thiserror::Error;

/// Result alias for source operations.
pub type SourceResult<T> = Result<T, SourceError>;

/// Errors raised while loading curves, inventory, or scenario inputs.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The file could not be opened or read.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File path.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A row could not be decoded.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// No rate rows for the requested curve and date.
    #[error("No curve '{curve_id}' for {as_of}")]
    CurveNotFound {
        /// Curve type requested.
        curve_id: String,
        /// As-of date requested.
        as_of: Date,
    },

    /// A field parsed but is not usable.
    #[error("Parse error: {reason}")]
    Parse {
        /// Description of the problem.
        reason: String,
    },

    /// The loaded points do not form a valid curve.
    #[error(transparent)]
    Curve(#[from] CurveError),

    /// An inventory row does not describe a valid bond.
    #[error(transparent)]
    Bond(#[from] BondError),
}

impl SourceError {
    /// Creates a parse error.
    #[must_use]
    pub fn parse(reason: impl Into<String>) -> Self {
        Self::Parse {
            reason: reason.into(),
        }
    }

    /// Creates an I/O error for `path`.
    #[must_use]
    pub fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }
}
