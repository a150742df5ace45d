//! # Keyrate Curves
//!
//! Zero-rate curves and the shocks applied to them for risk measurement.
//!
//! - [`YieldCurve`]: tenor/rate points (rates in percent) with linear
//!   interpolation and flat extrapolation
//! - [`TermStructure`]: the evaluation interface shared by base and shocked
//!   curves, so pricing code is generic over either
//! - [`ShockedCurve`]: a base curve plus an additive adjustment, built with
//!   [`bump_parallel`], [`bump_loading`], or [`bump_key_rate`]
//! - [`KeyRateShockBuilder`]: triangular key-rate weights and per-key shock
//!   matrices
//!
//! ## Quick Start
//!
//! ```rust
//! use keyrate_curves::prelude::*;
//!
//! let curve = YieldCurve::from_points(vec![(1.0, 5.0), (5.0, 4.0), (10.0, 3.0)]).unwrap();
//! assert!((curve.evaluate(3.0) - 4.5).abs() < 1e-12);
//!
//! let up = bump_parallel(&curve, 25.0);
//! assert!((up.evaluate(3.0) - 4.75).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::doc_markdown)]

pub mod error;
pub mod key_rate;
pub mod shock;
pub mod term_structure;
pub mod yield_curve;

pub use error::{CurveError, CurveResult};
pub use key_rate::{
    key_rate_weight, KeyRateShockBuilder, KEY_TENOR_CAP, ONE_BP_PCT, STANDARD_KEY_TENORS,
};
pub use shock::{bump_key_rate, bump_loading, bump_parallel, Adjustment, ShockedCurve};
pub use term_structure::TermStructure;
pub use yield_curve::{YieldCurve, YieldCurveBuilder};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CurveError, CurveResult};
    pub use crate::key_rate::{key_rate_weight, KeyRateShockBuilder, STANDARD_KEY_TENORS};
    pub use crate::shock::{bump_key_rate, bump_loading, bump_parallel, ShockedCurve};
    pub use crate::term_structure::TermStructure;
    pub use crate::yield_curve::{YieldCurve, YieldCurveBuilder};
}
