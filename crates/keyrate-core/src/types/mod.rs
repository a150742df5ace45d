//! Domain types.

mod date;
mod frequency;

pub use date::Date;
pub use frequency::{Compounding, Frequency};
