//! # Keyrate Portfolio
//!
//! Batch valuation and interest-rate risk for portfolios of fixed-coupon
//! bonds.
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: every call takes its bonds, as-of date, and curve
//!   explicitly; nothing is cached between calls
//! - **Padded tables**: cashflows of all instruments are laid out in one
//!   [`CashflowTable`] so each curve shock is a single pass over the table
//! - **Config-driven parallelism**: optional rayon support for independent
//!   pricing requests
//!
//! ## Features
//!
//! - **Valuation**: dirty value, accrued interest, clean value
//! - **Risk**: parallel DV01 and key-rate DV01 at configurable key tenors
//! - **Scenarios**: six-size parallel and loading-vector shock summaries
//!
//! ## Quick Start
//!
//! ```rust
//! use keyrate_portfolio::prelude::*;
//! use keyrate_bonds::BondContract;
//! use keyrate_core::types::{Date, Frequency};
//! use keyrate_curves::YieldCurve;
//!
//! let bond = BondContract::new(
//!     "T1",
//!     Date::from_ymd(2020, 1, 1).unwrap(),
//!     Date::from_ymd(2025, 1, 1).unwrap(),
//!     2.0,
//!     Frequency::SemiAnnual,
//!     1_000_000.0,
//!     100.0,
//! )
//! .unwrap();
//! let curve = YieldCurve::from_points(vec![(1.0, 2.0), (2.0, 2.0)]).unwrap();
//! let as_of = Date::from_ymd(2023, 1, 1).unwrap();
//!
//! let pricer = PortfolioPricer::default();
//! let results = pricer.price(&[bond], as_of, &curve).unwrap();
//! let summary = PortfolioSummary::from_results(&results, pricer.config().key_tenors());
//!
//! assert!(summary.dv01 > 0.0);
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel`: Enable rayon-based parallel pricing of independent requests

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod cashflows;
pub mod config;
pub mod error;
pub mod parallel;
pub mod pricer;
pub mod scenarios;
pub mod summary;

pub use cashflows::CashflowTable;
pub use config::{DiscountCompounding, PricingConfig};
pub use error::{PortfolioResult, PricingError};
pub use parallel::{maybe_parallel_map, price_requests, PricingRequest};
pub use pricer::{price_with_config, PortfolioPricer, PricingResult};
pub use scenarios::{LoadingDv01, LoadingVector, ShockSummary, SCENARIO_SHIFTS_BP};
pub use summary::PortfolioSummary;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::cashflows::CashflowTable;
    pub use crate::config::{DiscountCompounding, PricingConfig};
    pub use crate::error::{PortfolioResult, PricingError};
    pub use crate::parallel::{price_requests, PricingRequest};
    pub use crate::pricer::{price_with_config, PortfolioPricer, PricingResult};
    pub use crate::scenarios::{LoadingDv01, LoadingVector, ShockSummary, SCENARIO_SHIFTS_BP};
    pub use crate::summary::PortfolioSummary;
}
