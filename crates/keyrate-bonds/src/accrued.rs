//! Coupon periods and accrued interest.
//!
//! Accrual is actual days over actual days within the coupon period that
//! contains the as-of date.

use serde::{Deserialize, Serialize};

use keyrate_core::types::Date;

/// The coupon period bracketing an as-of date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouponPeriod {
    /// Previous coupon date, or the issue date before the first coupon.
    pub previous: Date,
    /// First coupon date strictly after the as-of date.
    pub next: Date,
}

impl CouponPeriod {
    /// Locates the period for `as_of` within ascending coupon `dates`.
    ///
    /// Returns `None` once every coupon date is on or before `as_of`.
    pub fn locate(dates: &[Date], issue: Date, as_of: Date) -> Option<Self> {
        let idx = dates.iter().position(|d| *d > as_of)?;
        let previous = if idx == 0 { issue } else { dates[idx - 1] };
        Some(Self {
            previous,
            next: dates[idx],
        })
    }

    /// Length of the period in days.
    pub fn days(&self) -> i64 {
        self.previous.days_between(&self.next)
    }

    /// Days accrued from the previous coupon to `as_of`.
    ///
    /// Negative when `as_of` precedes the issue date.
    pub fn accrued_days(&self, as_of: Date) -> i64 {
        self.previous.days_between(&as_of)
    }

    /// Accrued days over period days; 0 for an empty period.
    pub fn fraction(&self, as_of: Date) -> f64 {
        let period = self.days();
        if period > 0 {
            self.accrued_days(as_of) as f64 / period as f64
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn dates() -> Vec<Date> {
        vec![d(2024, 1, 1), d(2024, 7, 1), d(2025, 1, 1)]
    }

    #[test]
    fn test_locate_mid_period() {
        let period = CouponPeriod::locate(&dates(), d(2023, 7, 1), d(2024, 4, 1)).unwrap();
        assert_eq!(period.previous, d(2024, 1, 1));
        assert_eq!(period.next, d(2024, 7, 1));
        assert_eq!(period.days(), 182);
        assert_eq!(period.accrued_days(d(2024, 4, 1)), 91);
        assert_relative_eq!(period.fraction(d(2024, 4, 1)), 0.5, epsilon = 1e-15);
    }

    #[test]
    fn test_on_coupon_date_starts_new_period() {
        let as_of = d(2024, 7, 1);
        let period = CouponPeriod::locate(&dates(), d(2023, 7, 1), as_of).unwrap();
        assert_eq!(period.previous, as_of);
        assert_relative_eq!(period.fraction(as_of), 0.0);
    }

    #[test]
    fn test_before_first_coupon_uses_issue() {
        let issue = d(2023, 7, 1);
        let period = CouponPeriod::locate(&dates(), issue, d(2023, 10, 1)).unwrap();
        assert_eq!(period.previous, issue);
    }

    #[test]
    fn test_before_issue_is_negative() {
        let issue = d(2023, 7, 1);
        let as_of = d(2023, 6, 1);
        let period = CouponPeriod::locate(&dates(), issue, as_of).unwrap();
        assert!(period.fraction(as_of) < 0.0);
    }

    #[test]
    fn test_after_last_coupon() {
        assert!(CouponPeriod::locate(&dates(), d(2023, 7, 1), d(2025, 1, 1)).is_none());
    }

    #[test]
    fn test_empty_period() {
        let period = CouponPeriod {
            previous: d(2024, 1, 1),
            next: d(2024, 1, 1),
        };
        assert_relative_eq!(period.fraction(d(2024, 1, 1)), 0.0);
    }
}
