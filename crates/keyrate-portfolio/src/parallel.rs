//! Parallel pricing of independent requests.
//!
//! A request is one (curve, portfolio, as-of) triple. Requests share no
//! state, so a batch maps cleanly onto rayon when the `parallel` feature is
//! enabled and the batch is large enough.

use keyrate_bonds::BondContract;
use keyrate_core::types::Date;
use keyrate_curves::TermStructure;

use crate::config::PricingConfig;
use crate::error::PortfolioResult;
use crate::pricer::{PortfolioPricer, PricingResult};

/// Maps a function over items, conditionally using parallel iteration.
///
/// Uses parallel iteration when:
/// - The `parallel` feature is enabled
/// - `config.parallel` is true
/// - The collection size reaches `config.parallel_threshold`
#[allow(unused_variables)]
pub fn maybe_parallel_map<T, U, F>(items: &[T], config: &PricingConfig, f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        if config.should_parallelize(items.len()) {
            return items.par_iter().map(f).collect();
        }
    }

    items.iter().map(f).collect()
}

/// One independent pricing request.
#[derive(Debug, Clone)]
pub struct PricingRequest<C> {
    /// Zero curve to discount on.
    pub curve: C,
    /// Positions to price.
    pub bonds: Vec<BondContract>,
    /// Valuation date.
    pub as_of: Date,
}

impl<C: TermStructure> PricingRequest<C> {
    /// Creates a request.
    pub fn new(curve: C, bonds: Vec<BondContract>, as_of: Date) -> Self {
        Self {
            curve,
            bonds,
            as_of,
        }
    }
}

/// Prices each request independently; one result per request, in order.
///
/// A failing request does not affect the others.
pub fn price_requests<C: TermStructure>(
    pricer: &PortfolioPricer,
    requests: &[PricingRequest<C>],
) -> Vec<PortfolioResult<Vec<PricingResult>>> {
    log::debug!("pricing {} independent requests", requests.len());
    maybe_parallel_map(requests, pricer.config(), |req| {
        pricer.price(&req.bonds, req.as_of, &req.curve)
    })
}
