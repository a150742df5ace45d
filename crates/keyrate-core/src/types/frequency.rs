//! Frequency and compounding types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};

/// Payment frequency for coupon bonds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Frequency {
    /// Annual payments (1 per year)
    Annual,
    /// Semi-annual payments (2 per year) - most common for US Treasuries
    #[default]
    SemiAnnual,
}

impl Frequency {
    /// Returns the number of periods per year.
    #[must_use]
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Frequency::Annual => 1,
            Frequency::SemiAnnual => 2,
        }
    }

    /// Returns the number of months per period.
    #[must_use]
    pub fn months_per_period(&self) -> u32 {
        12 / self.periods_per_year()
    }

    /// Maps a periods-per-year count onto a supported frequency.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidFrequency` for non-positive or unsupported counts.
    pub fn from_periods_per_year(periods: i64) -> CoreResult<Self> {
        match periods {
            1 => Ok(Frequency::Annual),
            2 => Ok(Frequency::SemiAnnual),
            other => Err(CoreError::invalid_frequency(other.to_string())),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Frequency::Annual => "Annual",
            Frequency::SemiAnnual => "Semi-Annual",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Frequency {
    type Err = CoreError;

    /// Parses inventory labels ("Semi-Annual", "SemiAnnual", "Annual") or a
    /// periods-per-year count ("1", "2").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();
        match label.to_ascii_lowercase().replace(['-', '_', ' '], "").as_str() {
            "semiannual" | "semi" => Ok(Frequency::SemiAnnual),
            "annual" => Ok(Frequency::Annual),
            _ => match label.parse::<f64>() {
                Ok(n) if n.fract() == 0.0 => Frequency::from_periods_per_year(n as i64),
                _ => Err(CoreError::invalid_frequency(label)),
            },
        }
    }
}

/// Compounding convention used to turn a rate into a discount factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Compounding {
    /// `exp(-r * t)`, independent of the instrument's payment frequency.
    #[default]
    Continuous,
    /// `(1 + r / f)^(-f * t)` with `f` the instrument's periods per year.
    Periodic,
}

impl Compounding {
    /// Discount factor for a decimal rate over `t` years.
    ///
    /// `periods_per_year` is only read by [`Compounding::Periodic`].
    #[must_use]
    pub fn discount_factor(&self, rate: f64, t: f64, periods_per_year: u32) -> f64 {
        match self {
            Compounding::Continuous => (-rate * t).exp(),
            Compounding::Periodic => {
                let f = f64::from(periods_per_year);
                (1.0 + rate / f).powf(-f * t)
            }
        }
    }

    /// Returns true if this is continuous compounding.
    #[must_use]
    pub fn is_continuous(&self) -> bool {
        matches!(self, Compounding::Continuous)
    }
}

impl fmt::Display for Compounding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Compounding::Continuous => "Continuous",
            Compounding::Periodic => "Periodic",
        };
        write!(f, "{name}")
    }
}
