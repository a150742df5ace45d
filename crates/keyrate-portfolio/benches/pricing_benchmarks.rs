//! Benchmarks for batch pricing.
//!
//! Run with: cargo bench -p keyrate-portfolio

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use keyrate_bonds::BondContract;
use keyrate_core::types::{Date, Frequency};
use keyrate_curves::YieldCurve;
use keyrate_portfolio::{LoadingVector, PortfolioPricer};

// =============================================================================
// TEST DATA GENERATORS
// =============================================================================

fn create_test_curve() -> YieldCurve {
    YieldCurve::from_points(vec![
        (0.25, 3.0),
        (0.5, 3.2),
        (1.0, 3.5),
        (2.0, 3.8),
        (3.0, 4.0),
        (5.0, 4.5),
        (7.0, 4.8),
        (10.0, 5.0),
        (30.0, 5.5),
    ])
    .unwrap()
}

fn create_test_bond(id: usize) -> BondContract {
    let coupons = [2.0, 2.5, 3.0, 3.5, 4.0, 4.5, 5.0];
    let maturities = [2026, 2027, 2028, 2029, 2030, 2031, 2032, 2033, 2034, 2035, 2045, 2054];
    let frequency = if id % 5 == 0 {
        Frequency::Annual
    } else {
        Frequency::SemiAnnual
    };

    BondContract::new(
        format!("BOND_{id:05}"),
        Date::from_ymd(2020, 1, 15).unwrap(),
        Date::from_ymd(maturities[id % maturities.len()], 1, 15).unwrap(),
        coupons[id % coupons.len()],
        frequency,
        1_000.0 * (1 + id % 7) as f64,
        100.0,
    )
    .unwrap()
}

fn create_portfolio(n: usize) -> Vec<BondContract> {
    (0..n).map(create_test_bond).collect()
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_price(c: &mut Criterion) {
    let curve = create_test_curve();
    let pricer = PortfolioPricer::default();
    let as_of = Date::from_ymd(2025, 6, 1).unwrap();

    let mut group = c.benchmark_group("portfolio_price");
    for size in [10, 100, 1_000] {
        let bonds = create_portfolio(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &bonds, |b, bonds| {
            b.iter(|| pricer.price(black_box(bonds), black_box(as_of), &curve));
        });
    }
    group.finish();
}

fn bench_scenarios(c: &mut Criterion) {
    let curve = create_test_curve();
    let pricer = PortfolioPricer::default();
    let as_of = Date::from_ymd(2025, 6, 1).unwrap();
    let bonds = create_portfolio(100);
    let tenors = vec![1.0, 2.0, 5.0, 10.0, 30.0];
    let loadings = vec![
        LoadingVector::level("PC1", tenors.clone()),
        LoadingVector::new("PC2", tenors, vec![-0.6, -0.3, 0.0, 0.3, 0.6]),
    ];

    c.bench_function("scenarios_100", |b| {
        b.iter(|| pricer.price_scenarios(black_box(&bonds), as_of, &curve, black_box(&loadings)));
    });
}

criterion_group!(benches, bench_price, bench_scenarios);
criterion_main!(benches);
