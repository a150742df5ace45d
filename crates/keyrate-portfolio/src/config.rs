//! Configuration for portfolio pricing.

use serde::{Deserialize, Serialize};

use keyrate_bonds::FinalCouponPolicy;
use keyrate_curves::{KeyRateShockBuilder, STANDARD_KEY_TENORS};

use crate::error::{PortfolioResult, PricingError};

/// How curve rates are turned into discount factors.
///
/// `Continuous` discounts with `exp(-r·t)`; `Periodic` with
/// `(1 + r/f)^(-f·t)` using each bond's coupon frequency `f`.
pub use keyrate_core::types::Compounding as DiscountCompounding;

/// Configuration for portfolio pricing.
///
/// Every field has a default, so a partial TOML or JSON document
/// deserializes into a complete configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Key tenors (years) for key-rate DV01, strictly ascending.
    pub key_tenors: Vec<f64>,

    /// Bump size in basis points for DV01 and key-rate DV01.
    pub bump_bps: f64,

    /// Day basis for time to cashflow.
    pub days_per_year: f64,

    /// Discount factor convention.
    pub compounding: DiscountCompounding,

    /// Treatment of a final coupon date past maturity.
    pub final_coupon_policy: FinalCouponPolicy,

    /// Enable parallel processing (requires 'parallel' feature).
    pub parallel: bool,

    /// Minimum request count to trigger parallel processing.
    pub parallel_threshold: usize,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            key_tenors: STANDARD_KEY_TENORS.to_vec(),
            bump_bps: 1.0,
            days_per_year: 365.25,
            compounding: DiscountCompounding::Continuous,
            final_coupon_policy: FinalCouponPolicy::Unadjusted,
            parallel: true,
            parallel_threshold: 8,
        }
    }
}

impl PricingConfig {
    /// Creates a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config that always prices sequentially.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Sets the key tenors.
    #[must_use]
    pub fn with_key_tenors(mut self, tenors: Vec<f64>) -> Self {
        self.key_tenors = tenors;
        self
    }

    /// Sets the bump size in basis points.
    #[must_use]
    pub fn with_bump_bps(mut self, bump_bps: f64) -> Self {
        self.bump_bps = bump_bps;
        self
    }

    /// Sets the day basis.
    #[must_use]
    pub fn with_days_per_year(mut self, days: f64) -> Self {
        self.days_per_year = days;
        self
    }

    /// Sets the discount compounding.
    #[must_use]
    pub fn with_compounding(mut self, compounding: DiscountCompounding) -> Self {
        self.compounding = compounding;
        self
    }

    /// Sets the final coupon policy.
    #[must_use]
    pub fn with_final_coupon_policy(mut self, policy: FinalCouponPolicy) -> Self {
        self.final_coupon_policy = policy;
        self
    }

    /// Sets whether to use parallel processing.
    #[must_use]
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Sets the threshold for parallel processing.
    #[must_use]
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Returns the key tenors.
    pub fn key_tenors(&self) -> &[f64] {
        &self.key_tenors
    }

    /// Returns true if parallel processing should be used for the given count.
    #[must_use]
    pub fn should_parallelize(&self, count: usize) -> bool {
        cfg!(feature = "parallel") && self.parallel && count >= self.parallel_threshold
    }

    /// Checks the configuration and builds the key-rate shock builder.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for unusable key tenors, a non-finite or zero
    /// bump, or a non-positive day basis.
    pub fn key_rate_builder(&self) -> PortfolioResult<KeyRateShockBuilder> {
        if !self.bump_bps.is_finite() || self.bump_bps == 0.0 {
            return Err(PricingError::invalid_config(format!(
                "bump_bps must be finite and non-zero, got {}",
                self.bump_bps
            )));
        }
        if !self.days_per_year.is_finite() || self.days_per_year <= 0.0 {
            return Err(PricingError::invalid_config(format!(
                "days_per_year must be positive, got {}",
                self.days_per_year
            )));
        }
        Ok(KeyRateShockBuilder::new(self.key_tenors.clone())?.with_shift_bps(self.bump_bps))
    }

    /// Checks the configuration.
    pub fn validate(&self) -> PortfolioResult<()> {
        self.key_rate_builder().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = PricingConfig::default();
        assert_eq!(config.key_tenors, STANDARD_KEY_TENORS.to_vec());
        assert!((config.bump_bps - 1.0).abs() < f64::EPSILON);
        assert!((config.days_per_year - 365.25).abs() < f64::EPSILON);
        assert_eq!(config.compounding, DiscountCompounding::Continuous);
        assert_eq!(config.final_coupon_policy, FinalCouponPolicy::Unadjusted);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = PricingConfig::new()
            .with_key_tenors(vec![2.0, 5.0, 10.0])
            .with_bump_bps(0.5)
            .with_compounding(DiscountCompounding::Periodic)
            .with_final_coupon_policy(FinalCouponPolicy::ClampToMaturity)
            .with_threshold(2);

        assert_eq!(config.key_tenors(), &[2.0, 5.0, 10.0]);
        assert_eq!(config.parallel_threshold, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid() {
        assert!(PricingConfig::new().with_bump_bps(0.0).validate().is_err());
        assert!(PricingConfig::new().with_days_per_year(-1.0).validate().is_err());
        assert!(matches!(
            PricingConfig::new().with_key_tenors(vec![5.0, 2.0]).validate(),
            Err(PricingError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_should_parallelize() {
        let config = PricingConfig::new().with_threshold(4);

        #[cfg(feature = "parallel")]
        {
            assert!(!config.should_parallelize(3));
            assert!(config.should_parallelize(4));
        }

        #[cfg(not(feature = "parallel"))]
        {
            assert!(!config.should_parallelize(3));
            assert!(!config.should_parallelize(4));
        }

        assert!(!PricingConfig::sequential().should_parallelize(1000));
    }

    #[test]
    fn test_serde_partial() {
        let parsed: PricingConfig =
            serde_json::from_str(r#"{"bump_bps": 2.0, "compounding": "periodic"}"#).unwrap();
        assert!((parsed.bump_bps - 2.0).abs() < f64::EPSILON);
        assert_eq!(parsed.compounding, DiscountCompounding::Periodic);
        assert_eq!(parsed.key_tenors.len(), 8);
    }
}
