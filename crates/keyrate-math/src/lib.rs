//! # Keyrate Math
//!
//! Numerical utilities for the Keyrate fixed income risk engine.
//!
//! This crate provides:
//!
//! - **Interpolation**: Linear interpolation with configurable extrapolation
//!   (flat by default, as rate curves require)
//! - **Covariance**: Interchangeable covariance estimators behind the
//!   [`covariance::CovarianceEstimator`] trait
//! - **Loadings**: Principal components of a covariance matrix, used as
//!   loading vectors for curve shocks

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

pub mod covariance;
pub mod error;
pub mod interpolation;
pub mod loadings;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::covariance::{
        CovarianceEstimator, EmpiricalCovariance, EstimatorKind, EwmaCovariance,
        EwmaDriftCovariance, LedoitWolfCovariance,
    };
    pub use crate::error::{MathError, MathResult};
    pub use crate::interpolation::{ExtrapolationMethod, Interpolator, LinearInterpolator};
    pub use crate::loadings::{principal_loadings, PrincipalLoadings};
}

pub use error::{MathError, MathResult};
