//! # Keyrate Ext File
//!
//! File-backed data for the Keyrate pricer, suited to end-of-day runs,
//! tests, and static inputs:
//! - CSV curve source (`curve_date,curve_type,tenor,rate`)
//! - CSV inventory source
//! - CSV loading vectors and return panels for scenario shocks

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod inventory;
mod market_data;
mod scenarios;

pub use error::{SourceError, SourceResult};
pub use inventory::{CsvInventorySource, InventorySource};
pub use market_data::{CsvCurveSource, CurveSource};
pub use scenarios::{load_loadings, load_returns, ReturnsPanel};

use std::path::Path;

fn open_reader(path: &Path) -> SourceResult<csv::Reader<std::fs::File>> {
    let file = std::fs::File::open(path).map_err(|e| SourceError::io(path, e))?;
    Ok(csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(file))
}
