//! Batch valuation with parallel and key-rate DV01.

use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

use keyrate_bonds::BondContract;
use keyrate_core::types::Date;
use keyrate_curves::{KeyRateShockBuilder, TermStructure};

use crate::cashflows::CashflowTable;
use crate::config::PricingConfig;
use crate::error::PortfolioResult;

/// Valuation and sensitivities of one position.
///
/// All amounts are scaled by the position quantity, so results aggregate
/// across a portfolio by summation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingResult {
    /// Instrument identifier.
    pub id: String,
    /// Signed position size.
    pub quantity: f64,
    /// Present value of all live cashflows.
    pub dirty_price: f64,
    /// Accrued interest at the as-of date.
    pub accrued_interest: f64,
    /// Dirty price less accrued interest.
    pub clean_price: f64,
    /// Value lost when every rate rises by the bump size.
    pub dv01: f64,
    /// Value lost per key tenor when that key rises by the bump size.
    pub key_rate_dv01: Vec<f64>,
}

impl PricingResult {
    /// Sum of the key-rate DV01 entries.
    pub fn key_rate_total(&self) -> f64 {
        self.key_rate_dv01.iter().sum()
    }
}

/// Prices portfolios of bonds against a zero curve.
///
/// DV01 is `PV(base) − PV(base + bump)` with the bump applied to every
/// cashflow rate. Key-rate DV01 applies the bump through each key's
/// triangular weight instead, so for cashflows inside the key range the
/// key-rate entries sum to the parallel DV01 up to second-order terms.
#[derive(Debug, Clone)]
pub struct PortfolioPricer {
    config: PricingConfig,
    key_rates: KeyRateShockBuilder,
}

impl PortfolioPricer {
    /// Creates a pricer.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the configuration fails validation.
    pub fn new(config: PricingConfig) -> PortfolioResult<Self> {
        let key_rates = config.key_rate_builder()?;
        Ok(Self { config, key_rates })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Returns the key-rate shock builder.
    pub fn key_rates(&self) -> &KeyRateShockBuilder {
        &self.key_rates
    }

    /// Lays out the cashflow table for `bonds` at `as_of`.
    pub fn cashflow_table(&self, bonds: &[BondContract], as_of: Date) -> CashflowTable {
        CashflowTable::build(bonds, as_of, self.config.days_per_year)
    }

    /// Prices every bond with accrued interest, DV01, and key-rate DV01.
    ///
    /// # Errors
    ///
    /// - `MissingRateData` if the curve has no finite rate for a live cashflow
    /// - `NumericInstability` if a discount factor is not finite
    pub fn price<C: TermStructure + ?Sized>(
        &self,
        bonds: &[BondContract],
        as_of: Date,
        curve: &C,
    ) -> PortfolioResult<Vec<PricingResult>> {
        let table = self.cashflow_table(bonds, as_of);
        let compounding = self.config.compounding;

        let base_rates = table.rates(curve)?;
        let pv_base = table.present_values(&base_rates, compounding)?;

        let parallel = Array2::from_elem(base_rates.raw_dim(), self.key_rates.shift_pct());
        let dv01 = &pv_base - &table.shifted_present_values(&base_rates, &parallel, compounding)?;

        let shocks = self.key_rates.shock_matrices(table.ttm());
        let mut krd = Array2::<f64>::zeros((table.nrows(), self.key_rates.len()));
        for (k, shock) in shocks.axis_iter(Axis(0)).enumerate() {
            let pv_k = table.shifted_present_values(&base_rates, &shock.to_owned(), compounding)?;
            krd.column_mut(k).assign(&(&pv_base - &pv_k));
        }

        log::debug!(
            "priced {} instruments ({} live cashflows) at {as_of}",
            table.nrows(),
            table.live_count()
        );

        Ok(assemble(bonds, as_of, &pv_base, &dv01, &krd))
    }

    /// Total quantity-weighted dirty value, without sensitivities.
    pub fn portfolio_value<C: TermStructure + ?Sized>(
        &self,
        bonds: &[BondContract],
        as_of: Date,
        curve: &C,
    ) -> PortfolioResult<f64> {
        let table = self.cashflow_table(bonds, as_of);
        self.table_value(&table, bonds, curve)
    }

    pub(crate) fn table_value<C: TermStructure + ?Sized>(
        &self,
        table: &CashflowTable,
        bonds: &[BondContract],
        curve: &C,
    ) -> PortfolioResult<f64> {
        let rates = table.rates(curve)?;
        let pvs = table.present_values(&rates, self.config.compounding)?;
        Ok(pvs
            .iter()
            .zip(bonds)
            .map(|(pv, bond)| pv * bond.quantity())
            .sum())
    }
}

impl Default for PortfolioPricer {
    fn default() -> Self {
        Self {
            config: PricingConfig::default(),
            key_rates: KeyRateShockBuilder::standard(),
        }
    }
}

/// Prices `bonds` with a one-off pricer built from `config`.
pub fn price_with_config<C: TermStructure + ?Sized>(
    bonds: &[BondContract],
    as_of: Date,
    curve: &C,
    config: &PricingConfig,
) -> PortfolioResult<Vec<PricingResult>> {
    PortfolioPricer::new(config.clone())?.price(bonds, as_of, curve)
}

fn assemble(
    bonds: &[BondContract],
    as_of: Date,
    pv_base: &Array1<f64>,
    dv01: &Array1<f64>,
    krd: &Array2<f64>,
) -> Vec<PricingResult> {
    bonds
        .iter()
        .enumerate()
        .map(|(i, bond)| {
            let qty = bond.quantity();
            let dirty_price = pv_base[i] * qty;
            let accrued_interest = bond.accrued_interest(as_of) * qty;
            PricingResult {
                id: bond.id().to_string(),
                quantity: qty,
                dirty_price,
                accrued_interest,
                clean_price: dirty_price - accrued_interest,
                dv01: dv01[i] * qty,
                key_rate_dv01: krd.row(i).iter().map(|v| v * qty).collect(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DiscountCompounding;
    use crate::error::PricingError;
    use approx::assert_relative_eq;
    use keyrate_core::types::Frequency;
    use keyrate_curves::{bump_parallel, YieldCurve};

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn curve() -> YieldCurve {
        YieldCurve::from_points(vec![(0.5, 1.5), (2.0, 2.0), (5.0, 2.5), (10.0, 3.0)]).unwrap()
    }

    #[test]
    fn test_zero_coupon_flat_zero_curve() {
        let bond = BondContract::new(
            "Z",
            d(2024, 1, 1),
            d(2029, 1, 1),
            0.0,
            Frequency::Annual,
            3.0,
            100.0,
        )
        .unwrap();
        let flat = YieldCurve::flat(0.0, 1.0, 30.0).unwrap();
        let results = PortfolioPricer::default()
            .price(&[bond], d(2024, 1, 1), &flat)
            .unwrap();

        assert_relative_eq!(results[0].dirty_price, 300.0, epsilon = 1e-12);
        assert_relative_eq!(results[0].accrued_interest, 0.0);
    }

    #[test]
    fn test_clean_is_dirty_less_accrued() {
        let bond = BondContract::new(
            "C",
            d(2023, 7, 1),
            d(2030, 7, 1),
            4.0,
            Frequency::SemiAnnual,
            -2.0,
            100.0,
        )
        .unwrap();
        let results = PortfolioPricer::default()
            .price(&[bond], d(2024, 4, 1), &curve())
            .unwrap();
        let r = &results[0];

        assert_relative_eq!(r.accrued_interest, -2.0, epsilon = 1e-12);
        assert_eq!(r.clean_price, r.dirty_price - r.accrued_interest);
        assert!(r.dv01 < 0.0, "short position loses when rates fall");
    }

    #[test]
    fn test_clean_identity_exact_across_quantities() {
        let mut bonds = Vec::new();
        for (i, coupon) in [0.125, 1.625, 3.3, 4.875].into_iter().enumerate() {
            for (j, qty) in [1.0, 3.0, 7.0, -13.0, 1234.5, 0.3, 999_999.0]
                .into_iter()
                .enumerate()
            {
                bonds.push(
                    BondContract::new(
                        format!("B{i}{j}"),
                        d(2021, 2, 15),
                        d(2031, 2, 15),
                        coupon,
                        Frequency::SemiAnnual,
                        qty,
                        100.0,
                    )
                    .unwrap(),
                );
            }
        }
        let results = PortfolioPricer::default()
            .price(&bonds, d(2024, 5, 20), &curve())
            .unwrap();

        assert_eq!(results.len(), 28);
        for r in &results {
            assert_eq!(r.clean_price, r.dirty_price - r.accrued_interest, "{}", r.id);
        }
    }

    #[test]
    fn test_dv01_matches_bumped_curve() {
        let bond = BondContract::new(
            "B",
            d(2021, 3, 15),
            d(2031, 3, 15),
            3.0,
            Frequency::SemiAnnual,
            1.0,
            100.0,
        )
        .unwrap();
        let as_of = d(2024, 6, 1);
        let pricer = PortfolioPricer::default();
        let base = curve();

        let results = pricer.price(std::slice::from_ref(&bond), as_of, &base).unwrap();
        let bumped = pricer
            .portfolio_value(&[bond.clone()], as_of, &bump_parallel(&base, 1.0))
            .unwrap();

        assert_relative_eq!(results[0].dv01, results[0].dirty_price - bumped, epsilon = 1e-10);
    }

    #[test]
    fn test_key_rates_sum_to_dv01() {
        let bond = BondContract::new(
            "K",
            d(2020, 5, 15),
            d(2032, 5, 15),
            3.5,
            Frequency::SemiAnnual,
            1.0,
            100.0,
        )
        .unwrap();
        let results = PortfolioPricer::default()
            .price(&[bond], d(2024, 6, 1), &curve())
            .unwrap();
        let r = &results[0];

        assert_eq!(r.key_rate_dv01.len(), 8);
        assert_relative_eq!(r.key_rate_total(), r.dv01, max_relative = 1e-3);
        // Nothing beyond 10y.
        assert_relative_eq!(r.key_rate_dv01[6], 0.0);
        assert_relative_eq!(r.key_rate_dv01[7], 0.0);
    }

    #[test]
    fn test_periodic_compounding_changes_value() {
        let bond = BondContract::new(
            "P",
            d(2024, 1, 1),
            d(2029, 1, 1),
            0.0,
            Frequency::Annual,
            1.0,
            100.0,
        )
        .unwrap();
        let flat = YieldCurve::flat(5.0, 1.0, 30.0).unwrap();
        let config = PricingConfig::new().with_compounding(DiscountCompounding::Periodic);
        let results = price_with_config(&[bond], d(2024, 1, 1), &flat, &config).unwrap();

        let t = 1827.0 / 365.25;
        assert_relative_eq!(results[0].dirty_price, 100.0 * 1.05_f64.powf(-t), epsilon = 1e-10);
    }

    #[test]
    fn test_matured_bond_prices_to_zero() {
        let bond = BondContract::new(
            "M",
            d(2020, 1, 1),
            d(2022, 1, 1),
            2.0,
            Frequency::Annual,
            1.0,
            100.0,
        )
        .unwrap();
        let results = PortfolioPricer::default()
            .price(&[bond], d(2024, 1, 1), &curve())
            .unwrap();
        assert_relative_eq!(results[0].dirty_price, 0.0);
        assert_relative_eq!(results[0].dv01, 0.0);
        assert_relative_eq!(results[0].accrued_interest, 0.0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = PricingConfig::new().with_key_tenors(vec![]);
        assert!(matches!(
            PortfolioPricer::new(config),
            Err(PricingError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_empty_portfolio() {
        let results = PortfolioPricer::default()
            .price(&[], d(2024, 1, 1), &curve())
            .unwrap();
        assert!(results.is_empty());
    }
}
