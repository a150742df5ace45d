//! Padded cashflow tables.
//!
//! Instruments have different numbers of cashflows. The table pads every
//! row to the longest schedule, so one long-dated bond widens every row.
//! Padding and cashflows on or before the as-of date are dead: their amount
//! and time are zero and they never reach the curve.

use ndarray::{Array1, Array2, Zip};

use keyrate_bonds::BondContract;
use keyrate_core::types::Date;
use keyrate_curves::TermStructure;

use crate::config::DiscountCompounding;
use crate::error::{PortfolioResult, PricingError};

/// Cashflows of a set of instruments laid out on a rows × slots grid.
#[derive(Debug, Clone, PartialEq)]
pub struct CashflowTable {
    ids: Vec<String>,
    amounts: Array2<f64>,
    ttm: Array2<f64>,
    live: Array2<bool>,
    periods_per_year: Vec<u32>,
}

impl CashflowTable {
    /// Lays out the per-unit cashflows of `bonds` as seen from `as_of`.
    ///
    /// Time to cashflow is `days / days_per_year`; a cashflow is live only
    /// if that time is strictly positive.
    pub fn build(bonds: &[BondContract], as_of: Date, days_per_year: f64) -> Self {
        let rows = bonds.len();
        let width = bonds
            .iter()
            .map(BondContract::cashflow_count)
            .max()
            .unwrap_or(0);

        let mut amounts = Array2::<f64>::zeros((rows, width));
        let mut ttm = Array2::<f64>::zeros((rows, width));
        let mut live = Array2::from_elem((rows, width), false);

        for (i, bond) in bonds.iter().enumerate() {
            for (j, (date, amount)) in bond.cashflows().enumerate() {
                let t = as_of.year_fraction(&date, days_per_year);
                if t > 0.0 {
                    amounts[[i, j]] = amount;
                    ttm[[i, j]] = t;
                    live[[i, j]] = true;
                }
            }
        }

        log::debug!("cashflow table: {rows} instruments x {width} slots");

        Self {
            ids: bonds.iter().map(|b| b.id().to_string()).collect(),
            amounts,
            ttm,
            live,
            periods_per_year: bonds.iter().map(BondContract::periods_per_year).collect(),
        }
    }

    /// Instrument identifiers, one per row.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Cashflow amounts per unit; zero where dead.
    pub fn amounts(&self) -> &Array2<f64> {
        &self.amounts
    }

    /// Time to cashflow in years; zero where dead.
    pub fn ttm(&self) -> &Array2<f64> {
        &self.ttm
    }

    /// Liveness mask.
    pub fn live(&self) -> &Array2<bool> {
        &self.live
    }

    /// Coupon periods per year of each row.
    pub fn periods_per_year(&self) -> &[u32] {
        &self.periods_per_year
    }

    /// Number of instruments.
    pub fn nrows(&self) -> usize {
        self.amounts.nrows()
    }

    /// Number of cashflow slots per row.
    pub fn width(&self) -> usize {
        self.amounts.ncols()
    }

    /// Returns true when the table has no instruments.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Number of live cashflows.
    pub fn live_count(&self) -> usize {
        self.live.iter().filter(|l| **l).count()
    }

    /// Evaluates `curve` at every live cashflow; dead slots get rate 0.
    ///
    /// # Errors
    ///
    /// Returns `MissingRateData` if the curve yields a non-finite rate for
    /// a live cashflow.
    pub fn rates<C: TermStructure + ?Sized>(&self, curve: &C) -> PortfolioResult<Array2<f64>> {
        let mut rates = Array2::<f64>::zeros(self.ttm.raw_dim());
        for ((idx, &t), &live) in self.ttm.indexed_iter().zip(self.live.iter()) {
            if !live {
                continue;
            }
            let rate = curve.evaluate(t);
            if !rate.is_finite() {
                return Err(PricingError::MissingRateData {
                    id: self.ids[idx.0].clone(),
                    tenor: t,
                });
            }
            rates[idx] = rate;
        }
        Ok(rates)
    }

    /// Per-unit present value of each row given rates (percent) per slot.
    ///
    /// # Errors
    ///
    /// Returns `NumericInstability` if a live discount factor is not finite.
    pub fn present_values(
        &self,
        rates: &Array2<f64>,
        compounding: DiscountCompounding,
    ) -> PortfolioResult<Array1<f64>> {
        let mut pvs = Array1::<f64>::zeros(self.nrows());
        for (i, pv) in pvs.iter_mut().enumerate() {
            let freq = self.periods_per_year[i];
            let mut total = 0.0;
            for j in 0..self.width() {
                if !self.live[[i, j]] {
                    continue;
                }
                let t = self.ttm[[i, j]];
                let rate = rates[[i, j]];
                let df = compounding.discount_factor(rate / 100.0, t, freq);
                if !df.is_finite() {
                    return Err(PricingError::NumericInstability {
                        id: self.ids[i].clone(),
                        tenor: t,
                        rate,
                    });
                }
                total += self.amounts[[i, j]] * df;
            }
            *pv = total;
        }
        Ok(pvs)
    }

    /// Per-unit present values after adding `shift` (percent) to `rates`
    /// slot by slot.
    pub fn shifted_present_values(
        &self,
        rates: &Array2<f64>,
        shift: &Array2<f64>,
        compounding: DiscountCompounding,
    ) -> PortfolioResult<Array1<f64>> {
        let mut shifted = rates.clone();
        Zip::from(&mut shifted)
            .and(shift)
            .and(&self.live)
            .for_each(|r, &s, &live| {
                if live {
                    *r += s;
                }
            });
        self.present_values(&shifted, compounding)
    }
}
