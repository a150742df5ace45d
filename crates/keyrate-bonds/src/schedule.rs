//! Coupon date generation.
//!
//! Dates step forward from the issue date by a fixed number of months,
//! each step applied to the previous date, until a date lands on or after
//! maturity. Month arithmetic clamps to the last day of a short month, and
//! the clamp carries into later steps (Aug 31, Feb 28, Aug 28, ...).

use serde::{Deserialize, Serialize};

use keyrate_core::types::{Date, Frequency};

use crate::error::{BondError, BondResult};

/// Treatment of a final generated date that overshoots maturity.
///
/// When the term is not a whole number of coupon periods, the last step
/// lands after the maturity date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinalCouponPolicy {
    /// Keep the generated date, so redemption is paid after maturity.
    #[default]
    Unadjusted,
    /// Replace the final date with the maturity date.
    ClampToMaturity,
}

/// Generates coupon dates for an instrument.
///
/// Returns at least one date; the last one is on or after `maturity`
/// unless clamped.
///
/// # Errors
///
/// Returns `InvalidInstrument` if `maturity <= issue`, or if the month
/// arithmetic leaves the supported date range.
pub fn coupon_dates(
    id: &str,
    issue: Date,
    maturity: Date,
    frequency: Frequency,
    policy: FinalCouponPolicy,
) -> BondResult<Vec<Date>> {
    if maturity <= issue {
        return Err(BondError::invalid_instrument(
            id,
            format!("maturity {maturity} is not after issue {issue}"),
        ));
    }

    let step = frequency.months_per_period() as i32;
    let mut dates = Vec::new();
    let mut date = issue;
    while date < maturity {
        date = date
            .add_months(step)
            .map_err(|e| BondError::invalid_instrument(id, e.to_string()))?;
        dates.push(date);
    }

    if let Some(last) = dates.last_mut() {
        if *last > maturity {
            match policy {
                FinalCouponPolicy::Unadjusted => log::warn!(
                    "{id}: final coupon date {last} falls after maturity {maturity}"
                ),
                FinalCouponPolicy::ClampToMaturity => *last = maturity,
            }
        }
    }

    Ok(dates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_semi_annual_dates() {
        let dates = coupon_dates(
            "T1",
            d(2022, 1, 1),
            d(2025, 1, 1),
            Frequency::SemiAnnual,
            FinalCouponPolicy::default(),
        )
        .unwrap();

        assert_eq!(dates.len(), 6);
        assert_eq!(dates[0], d(2022, 7, 1));
        assert_eq!(dates[5], d(2025, 1, 1));
    }

    #[test]
    fn test_annual_dates() {
        let dates = coupon_dates(
            "A",
            d(2020, 3, 15),
            d(2023, 3, 15),
            Frequency::Annual,
            FinalCouponPolicy::default(),
        )
        .unwrap();
        assert_eq!(dates, vec![d(2021, 3, 15), d(2022, 3, 15), d(2023, 3, 15)]);
    }

    #[test]
    fn test_month_end_clamp_carries_forward() {
        let dates = coupon_dates(
            "EOM",
            d(2023, 8, 31),
            d(2025, 2, 28),
            Frequency::SemiAnnual,
            FinalCouponPolicy::default(),
        )
        .unwrap();
        assert_eq!(
            dates,
            vec![d(2024, 2, 29), d(2024, 8, 29), d(2025, 2, 28)]
        );
    }

    #[test]
    fn test_short_term_overshoots_maturity() {
        let issue = d(2024, 1, 1);
        let maturity = d(2024, 3, 1);

        let dates = coupon_dates(
            "S",
            issue,
            maturity,
            Frequency::SemiAnnual,
            FinalCouponPolicy::Unadjusted,
        )
        .unwrap();
        assert_eq!(dates, vec![d(2024, 7, 1)]);

        let dates = coupon_dates(
            "S",
            issue,
            maturity,
            Frequency::SemiAnnual,
            FinalCouponPolicy::ClampToMaturity,
        )
        .unwrap();
        assert_eq!(dates, vec![maturity]);
    }

    #[test]
    fn test_maturity_not_after_issue() {
        let err = coupon_dates(
            "BAD",
            d(2024, 1, 1),
            d(2024, 1, 1),
            Frequency::Annual,
            FinalCouponPolicy::default(),
        )
        .unwrap_err();
        assert_eq!(err.instrument_id(), Some("BAD"));
    }

    proptest! {
        #[test]
        fn prop_dates_strictly_increasing(
            start_offset in 0i64..3650,
            term_days in 1i64..11000,
            semi in any::<bool>(),
            clamp in any::<bool>(),
        ) {
            let issue = d(2000, 1, 1).add_days(start_offset);
            let maturity = issue.add_days(term_days);
            let frequency = if semi { Frequency::SemiAnnual } else { Frequency::Annual };
            let policy = if clamp {
                FinalCouponPolicy::ClampToMaturity
            } else {
                FinalCouponPolicy::Unadjusted
            };

            let dates = coupon_dates("P", issue, maturity, frequency, policy).unwrap();
            prop_assert!(!dates.is_empty());
            prop_assert!(dates[0] > issue);
            prop_assert!(dates.windows(2).all(|w| w[0] < w[1]));
            prop_assert!(*dates.last().unwrap() >= maturity);
            if clamp {
                prop_assert_eq!(*dates.last().unwrap(), maturity);
            }
        }
    }
}
