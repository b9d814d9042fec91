//! Price value object for article unlock amounts.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// A strictly positive amount in major currency units.
///
/// The payment provider bills in minor units (cents/fen), so the only
/// arithmetic this type offers is the major-to-minor conversion:
/// `unit_amount = round(amount * 100)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(f64);

impl Price {
    /// Creates a price, rejecting non-positive or non-finite amounts.
    pub fn new(amount: f64) -> Result<Self, ValidationError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(ValidationError::non_positive_amount("amount", amount));
        }
        Ok(Self(amount))
    }

    /// Returns the amount in major currency units.
    pub fn amount(&self) -> f64 {
        self.0
    }

    /// Converts to minor currency units, rounded to the nearest integer.
    pub fn to_minor_units(&self) -> i64 {
        (self.0 * 100.0).round() as i64
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}
