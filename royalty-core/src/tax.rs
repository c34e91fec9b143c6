//! The single tax-deduction rule shared by every distributor.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ParseError, Result};

/// Percentage withheld from gross royalties, validated to `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct TaxRate(f64);

impl TaxRate {
    pub const ZERO: TaxRate = TaxRate(0.0);

    pub fn new(percent: f64) -> Result<Self> {
        if percent.is_finite() && (0.0..=100.0).contains(&percent) {
            Ok(TaxRate(percent))
        } else {
            Err(ParseError::InvalidTaxRate(percent))
        }
    }

    pub fn percent(&self) -> f64 {
        self.0
    }

    /// Fraction of the gross amount that is kept.
    pub fn retained_fraction(&self) -> f64 {
        1.0 - self.0 / 100.0
    }

    /// Net amount for a gross amount.
    pub fn apply(&self, gross: f64) -> f64 {
        gross * self.retained_fraction()
    }
}

impl TryFrom<f64> for TaxRate {
    type Error = ParseError;

    fn try_from(value: f64) -> Result<Self> {
        TaxRate::new(value)
    }
}

impl From<TaxRate> for f64 {
    fn from(rate: TaxRate) -> f64 {
        rate.0
    }
}

impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
