//! # Keyrate Bonds
//!
//! Fixed-coupon bond contracts for the Keyrate risk engine.
//!
//! This crate provides:
//!
//! - **Contracts**: [`BondContract`] with its coupon dates and cashflow
//!   amounts, built directly or from an inventory [`InstrumentRecord`]
//! - **Schedules**: coupon date generation stepping from issue by whole
//!   months, with a configurable [`FinalCouponPolicy`]
//! - **Accrued interest**: the coupon period around an as-of date and the
//!   accrued fraction of the current coupon
//!
//! ## Example
//!
//! ```rust
//! use keyrate_bonds::prelude::*;
//! use keyrate_core::types::{Date, Frequency};
//!
//! let bond = BondContract::new(
//!     "T1",
//!     Date::from_ymd(2022, 1, 1).unwrap(),
//!     Date::from_ymd(2025, 1, 1).unwrap(),
//!     2.0,
//!     Frequency::SemiAnnual,
//!     1.0,
//!     100.0,
//! )
//! .unwrap();
//!
//! assert_eq!(bond.cashflow_dates().len(), 6);
//! assert!((bond.cashflow_amounts()[5] - 101.0).abs() < 1e-12);
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
#![allow(clippy::too_many_arguments)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::return_self_not_must_use)]

pub mod accrued;
pub mod contract;
pub mod error;
pub mod schedule;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::accrued::CouponPeriod;
    pub use crate::contract::{BondContract, BondContractBuilder, InstrumentRecord};
    pub use crate::error::{BondError, BondResult};
    pub use crate::schedule::FinalCouponPolicy;
}

pub use accrued::CouponPeriod;
pub use contract::{BondContract, BondContractBuilder, InstrumentRecord};
pub use error::{BondError, BondResult};
pub use schedule::FinalCouponPolicy;
