//! # Keyrate Core
//!
//! Core types shared by every crate of the Keyrate fixed income risk engine.
//!
//! - **Types**: [`Date`], [`Frequency`], [`Compounding`]
//! - **Errors**: [`CoreError`] and the [`CoreResult`] alias
//!
//! ## Example
//!
//! ```rust
//! use keyrate_core::prelude::*;
//!
//! let issue = Date::from_ymd(2020, 1, 1).unwrap();
//! let first_coupon = issue.add_months(Frequency::SemiAnnual.months_per_period() as i32).unwrap();
//! assert_eq!(first_coupon, Date::from_ymd(2020, 7, 1).unwrap());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::trivially_copy_pass_by_ref)]

pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{Compounding, Date, Frequency};
}

pub use error::{CoreError, CoreResult};
pub use types::{Compounding, Date, Frequency};
