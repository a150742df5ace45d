//! CLI command implementations.

pub mod cashflows;
pub mod config;
pub mod curve;
pub mod price;
pub mod shocks;

pub use cashflows::CashflowsArgs;
pub use config::ConfigArgs;
pub use curve::CurveArgs;
pub use price::PriceArgs;
pub use shocks::ShocksArgs;

use std::path::PathBuf;

use clap::Args;

use keyrate_bonds::{BondContract, FinalCouponPolicy};
use keyrate_core::types::Date;
use keyrate_curves::YieldCurve;
use keyrate_ext_file::{CsvCurveSource, CsvInventorySource, CurveSource, InventorySource};

use crate::error::{CliError, CliResult};

/// Curve and inventory inputs shared by the portfolio commands.
#[derive(Args, Debug)]
pub struct PortfolioInputs {
    /// Curve file (curve_date,curve_type,tenor,rate)
    #[arg(long)]
    pub curve_file: PathBuf,

    /// Inventory file (as_of_date,id,issue_date,maturity_date,coupon,frequency,quantity,face_value)
    #[arg(long)]
    pub inventory_file: PathBuf,

    /// Valuation date (YYYY-MM-DD)
    #[arg(long)]
    pub as_of: String,

    /// Curve type to price on
    #[arg(long, default_value = "zero")]
    pub curve_id: String,
}

impl PortfolioInputs {
    /// Loads the curve and the positions held on the valuation date.
    pub fn load(
        &self,
        policy: FinalCouponPolicy,
    ) -> CliResult<(Date, YieldCurve, Vec<BondContract>)> {
        let as_of = parse_date(&self.as_of)?;
        let curve = load_curve(&self.curve_file, as_of, &self.curve_id)?;

        let _span = tracing::info_span!("inventory", file = %self.inventory_file.display()).entered();
        let bonds = CsvInventorySource::new(&self.inventory_file)?.load_contracts(as_of, policy)?;
        tracing::info!(positions = bonds.len(), %as_of, "loaded inventory");
        Ok((as_of, curve, bonds))
    }
}

/// Loads one curve from a curve file.
pub fn load_curve(path: &std::path::Path, as_of: Date, curve_id: &str) -> CliResult<YieldCurve> {
    let _span = tracing::info_span!("curve", file = %path.display(), curve_id).entered();
    let curve = CsvCurveSource::new(path)?.load_curve(as_of, curve_id)?;
    tracing::info!(points = curve.len(), %as_of, "loaded curve");
    Ok(curve)
}

/// Parses a date string in YYYY-MM-DD format.
pub fn parse_date(s: &str) -> CliResult<Date> {
    Date::parse(s).map_err(|_| CliError::InvalidDate(s.to_string()))
}

/// Labels a tenor in years, e.g. `10Y` or `0.5Y`.
pub fn tenor_label(tenor: f64) -> String {
    format!("{tenor}Y")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2024-01-02").unwrap(), Date::from_ymd(2024, 1, 2).unwrap());
        assert!(matches!(parse_date("01/02/2024"), Err(CliError::InvalidDate(_))));
    }

    #[test]
    fn test_tenor_label() {
        assert_eq!(tenor_label(10.0), "10Y");
        assert_eq!(tenor_label(0.5), "0.5Y");
    }
}
