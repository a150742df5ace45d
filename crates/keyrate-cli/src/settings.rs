//! Settings file: pricing configuration plus scenario-estimation options.

use std::path::Path;

use serde::{Deserialize, Serialize};

use keyrate_math::covariance::{EstimatorKind, DEFAULT_DECAY};
use keyrate_portfolio::PricingConfig;

use crate::error::{CliError, CliResult};

/// Default number of principal components turned into loading vectors.
pub const DEFAULT_COMPONENTS: usize = 3;

/// Options for deriving loading vectors from historical rate changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioSettings {
    /// Covariance estimator.
    pub estimator: EstimatorKind,
    /// EWMA decay factor.
    pub decay: f64,
    /// Number of principal components to shock along.
    pub components: usize,
}

impl Default for ScenarioSettings {
    fn default() -> Self {
        Self {
            estimator: EstimatorKind::default(),
            decay: DEFAULT_DECAY,
            components: DEFAULT_COMPONENTS,
        }
    }
}

/// Effective CLI settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Pricing configuration.
    pub pricing: PricingConfig,
    /// Scenario estimation options.
    pub scenarios: ScenarioSettings,
}

impl Settings {
    /// Loads settings from `path`, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> CliResult<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)?;
        let settings = Self::from_toml(&text)?;
        tracing::info!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Parses and validates settings from TOML text.
    pub fn from_toml(text: &str) -> CliResult<Self> {
        let settings: Self = toml::from_str(text).map_err(|e| CliError::Config(e.to_string()))?;
        settings.pricing.validate()?;
        if settings.scenarios.components == 0 {
            return Err(CliError::Config("scenarios.components must be at least 1".into()));
        }
        Ok(settings)
    }

    /// Serializes the settings as TOML.
    pub fn to_toml(&self) -> CliResult<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::Config(e.to_string()))
    }
}
