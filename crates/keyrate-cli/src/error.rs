//! CLI error types.

use keyrate_ext_file::SourceError;
use keyrate_math::MathError;
use keyrate_portfolio::PricingError;
use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid date format.
    #[error("Invalid date format: {0}. Use YYYY-MM-DD.")]
    InvalidDate(String),

    /// Invalid argument value.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input data error.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Pricing error.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Covariance or loading estimation error.
    #[error(transparent)]
    Math(#[from] MathError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
