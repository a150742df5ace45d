//! Property-based tests for pricing invariants.
//!
//! - clean = dirty - accrued for every position
//! - key-rate DV01 sums to parallel DV01 inside the key range
//! - results scale linearly with quantity

use approx::assert_relative_eq;
use keyrate_bonds::BondContract;
use keyrate_core::types::{Date, Frequency};
use keyrate_curves::YieldCurve;
use keyrate_portfolio::prelude::*;
use proptest::prelude::*;

fn bond(years: i32, coupon: f64, annual: bool, qty: f64) -> BondContract {
    let frequency = if annual {
        Frequency::Annual
    } else {
        Frequency::SemiAnnual
    };
    BondContract::new(
        "P",
        Date::from_ymd(2020, 3, 15).unwrap(),
        Date::from_ymd(2020 + years, 3, 15).unwrap(),
        coupon,
        frequency,
        qty,
        100.0,
    )
    .unwrap()
}

fn curve(short: f64, long: f64) -> YieldCurve {
    YieldCurve::from_points(vec![(0.5, short), (5.0, (short + long) / 2.0), (30.0, long)]).unwrap()
}

proptest! {
    #[test]
    fn clean_is_dirty_less_accrued(
        years in 1i32..25,
        coupon in 0.0f64..8.0,
        annual in any::<bool>(),
        offset in 0i64..2000,
        short in 0.0f64..6.0,
        long in 0.0f64..6.0,
        qty in prop::sample::select(vec![1.0, 3.0, 7.0, -13.0, 0.3, 1234.5, 999_999.0]),
    ) {
        let as_of = Date::from_ymd(2020, 1, 1).unwrap().add_days(offset);
        let results = PortfolioPricer::default()
            .price(&[bond(years, coupon, annual, qty)], as_of, &curve(short, long))
            .unwrap();
        let r = &results[0];
        prop_assert_eq!(r.clean_price, r.dirty_price - r.accrued_interest);
    }

    #[test]
    fn key_rates_sum_to_dv01(
        years in 1i32..20,
        coupon in 0.5f64..8.0,
        short in 0.5f64..6.0,
        long in 0.5f64..6.0,
    ) {
        let as_of = Date::from_ymd(2020, 3, 15).unwrap();
        let results = PortfolioPricer::default()
            .price(&[bond(years, coupon, false, 1.0)], as_of, &curve(short, long))
            .unwrap();
        let r = &results[0];
        prop_assert!(r.dv01 > 0.0);
        prop_assert!((r.key_rate_total() - r.dv01).abs() <= 1e-3 * r.dv01);
    }

    #[test]
    fn results_scale_with_quantity(qty in -1.0e6f64..1.0e6) {
        prop_assume!(qty.abs() > 1e-3);
        let as_of = Date::from_ymd(2023, 9, 1).unwrap();
        let c = curve(4.0, 4.5);
        let pricer = PortfolioPricer::default();
        let unit = pricer.price(&[bond(10, 3.0, false, 1.0)], as_of, &c).unwrap();
        let scaled = pricer.price(&[bond(10, 3.0, false, qty)], as_of, &c).unwrap();

        assert_relative_eq!(scaled[0].dirty_price, unit[0].dirty_price * qty, max_relative = 1e-12);
        assert_relative_eq!(scaled[0].dv01, unit[0].dv01 * qty, max_relative = 1e-12);
    }
}
