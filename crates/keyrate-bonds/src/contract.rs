//! Bond contracts and their derived cashflows.

use serde::{Deserialize, Serialize};

use keyrate_core::types::{Date, Frequency};

use crate::accrued::CouponPeriod;
use crate::error::{BondError, BondResult};
use crate::schedule::{coupon_dates, FinalCouponPolicy};

/// Face value used when an inventory row leaves it empty.
pub const DEFAULT_FACE_VALUE: f64 = 100.0;

/// One inventory row as delivered by a position source.
///
/// Optional fields are applied with defaults by
/// [`BondContract::from_record`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentRecord {
    /// Instrument identifier (e.g. CUSIP).
    pub id: String,
    /// Issue date.
    pub issue_date: Date,
    /// Maturity date.
    pub maturity_date: Date,
    /// Annual coupon rate in percent; `None` or NaN means zero coupon.
    pub coupon: Option<f64>,
    /// Frequency label ("Semi-Annual", "Annual") or periods per year.
    pub frequency: String,
    /// Signed position size.
    pub quantity: f64,
    /// Face value; `None` means 100.
    pub face_value: Option<f64>,
}

/// A fixed-coupon bond position with its generated cashflows.
///
/// Coupon dates step from the issue date by `12 / periods_per_year` months
/// until maturity is reached. Every cashflow pays one coupon and the last
/// one also repays face value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BondContract {
    id: String,
    issue_date: Date,
    maturity_date: Date,
    coupon_rate: f64,
    frequency: Frequency,
    quantity: f64,
    face_value: f64,
    dates: Vec<Date>,
    flows: Vec<f64>,
}

impl BondContract {
    /// Creates a contract with the default [`FinalCouponPolicy`].
    ///
    /// A NaN coupon is treated as zero.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInstrument` if maturity is not after issue or the
    /// quantity or face value is not finite.
    pub fn new(
        id: impl Into<String>,
        issue_date: Date,
        maturity_date: Date,
        coupon_rate: f64,
        frequency: Frequency,
        quantity: f64,
        face_value: f64,
    ) -> BondResult<Self> {
        Self::builder(id)
            .issue_date(issue_date)
            .maturity_date(maturity_date)
            .coupon_rate(coupon_rate)
            .frequency(frequency)
            .quantity(quantity)
            .face_value(face_value)
            .build()
    }

    /// Starts a builder for the given identifier.
    pub fn builder(id: impl Into<String>) -> BondContractBuilder {
        BondContractBuilder::new(id)
    }

    /// Creates a contract from an inventory row.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInstrument` for an unparseable or unsupported
    /// frequency label, or for any reason [`BondContract::new`] fails.
    pub fn from_record(record: &InstrumentRecord, policy: FinalCouponPolicy) -> BondResult<Self> {
        let frequency: Frequency = record
            .frequency
            .parse()
            .map_err(|e: keyrate_core::CoreError| {
                BondError::invalid_instrument(&record.id, e.to_string())
            })?;

        Self::builder(record.id.clone())
            .issue_date(record.issue_date)
            .maturity_date(record.maturity_date)
            .coupon_rate(record.coupon.unwrap_or(0.0))
            .frequency(frequency)
            .quantity(record.quantity)
            .face_value(record.face_value.unwrap_or(DEFAULT_FACE_VALUE))
            .final_coupon_policy(policy)
            .build()
    }

    /// Instrument identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Issue date.
    pub fn issue_date(&self) -> Date {
        self.issue_date
    }

    /// Maturity date.
    pub fn maturity_date(&self) -> Date {
        self.maturity_date
    }

    /// Annual coupon rate in percent.
    pub fn coupon_rate(&self) -> f64 {
        self.coupon_rate
    }

    /// Payment frequency.
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Coupon payments per year.
    pub fn periods_per_year(&self) -> u32 {
        self.frequency.periods_per_year()
    }

    /// Signed position size.
    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    /// Face value per unit.
    pub fn face_value(&self) -> f64 {
        self.face_value
    }

    /// Coupon dates, strictly increasing.
    pub fn cashflow_dates(&self) -> &[Date] {
        &self.dates
    }

    /// Cashflow amounts per unit, aligned with [`cashflow_dates`](Self::cashflow_dates).
    pub fn cashflow_amounts(&self) -> &[f64] {
        &self.flows
    }

    /// Number of cashflows.
    pub fn cashflow_count(&self) -> usize {
        self.dates.len()
    }

    /// (date, amount) pairs per unit.
    pub fn cashflows(&self) -> impl Iterator<Item = (Date, f64)> + '_ {
        self.dates.iter().copied().zip(self.flows.iter().copied())
    }

    /// Coupon paid each period per unit.
    pub fn coupon_amount(&self) -> f64 {
        self.face_value * self.coupon_rate / 100.0 / f64::from(self.periods_per_year())
    }

    /// The coupon period containing `as_of`, or `None` after the last coupon.
    pub fn coupon_period(&self, as_of: Date) -> Option<CouponPeriod> {
        CouponPeriod::locate(&self.dates, self.issue_date, as_of)
    }

    /// Fraction of the current coupon accrued at `as_of`.
    ///
    /// Zero on a coupon date and after the last coupon. Before issue the
    /// fraction is negative and returned as computed.
    pub fn accrual_fraction(&self, as_of: Date) -> f64 {
        self.coupon_period(as_of)
            .map_or(0.0, |period| period.fraction(as_of))
    }

    /// Accrued interest per unit at `as_of`.
    pub fn accrued_interest(&self, as_of: Date) -> f64 {
        self.coupon_amount() * self.accrual_fraction(as_of)
    }
}

/// Builder for [`BondContract`].
#[derive(Debug, Clone)]
pub struct BondContractBuilder {
    id: String,
    issue_date: Option<Date>,
    maturity_date: Option<Date>,
    coupon_rate: f64,
    frequency: Frequency,
    quantity: f64,
    face_value: f64,
    policy: FinalCouponPolicy,
}

impl BondContractBuilder {
    /// Creates a builder: zero coupon, semi-annual, quantity 1, face 100.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            issue_date: None,
            maturity_date: None,
            coupon_rate: 0.0,
            frequency: Frequency::SemiAnnual,
            quantity: 1.0,
            face_value: DEFAULT_FACE_VALUE,
            policy: FinalCouponPolicy::default(),
        }
    }

    /// Sets the issue date.
    pub fn issue_date(mut self, date: Date) -> Self {
        self.issue_date = Some(date);
        self
    }

    /// Sets the maturity date.
    pub fn maturity_date(mut self, date: Date) -> Self {
        self.maturity_date = Some(date);
        self
    }

    /// Sets the annual coupon rate in percent.
    pub fn coupon_rate(mut self, rate: f64) -> Self {
        self.coupon_rate = rate;
        self
    }

    /// Sets the payment frequency.
    pub fn frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    /// Sets the signed position size.
    pub fn quantity(mut self, quantity: f64) -> Self {
        self.quantity = quantity;
        self
    }

    /// Sets the face value.
    pub fn face_value(mut self, face_value: f64) -> Self {
        self.face_value = face_value;
        self
    }

    /// Sets the treatment of a final date past maturity.
    pub fn final_coupon_policy(mut self, policy: FinalCouponPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Validates the terms and generates the cashflows.
    pub fn build(self) -> BondResult<BondContract> {
        let id = self.id;
        let issue_date = self
            .issue_date
            .ok_or_else(|| BondError::invalid_instrument(&id, "missing issue date"))?;
        let maturity_date = self
            .maturity_date
            .ok_or_else(|| BondError::invalid_instrument(&id, "missing maturity date"))?;
        if !self.quantity.is_finite() {
            return Err(BondError::invalid_instrument(&id, "quantity is not finite"));
        }
        if !self.face_value.is_finite() {
            return Err(BondError::invalid_instrument(&id, "face value is not finite"));
        }
        let coupon_rate = if self.coupon_rate.is_nan() {
            0.0
        } else {
            self.coupon_rate
        };
        if !coupon_rate.is_finite() {
            return Err(BondError::invalid_instrument(&id, "coupon is not finite"));
        }

        let dates = coupon_dates(&id, issue_date, maturity_date, self.frequency, self.policy)?;

        let coupon =
            self.face_value * coupon_rate / 100.0 / f64::from(self.frequency.periods_per_year());
        let mut flows = vec![coupon; dates.len()];
        if let Some(last) = flows.last_mut() {
            *last += self.face_value;
        }

        Ok(BondContract {
            id,
            issue_date,
            maturity_date,
            coupon_rate,
            frequency: self.frequency,
            quantity: self.quantity,
            face_value: self.face_value,
            dates,
            flows,
        })
    }
}
