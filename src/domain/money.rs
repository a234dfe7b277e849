use crate::error::ParkingError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A strictly positive monetary amount charged for a stay.
///
/// Wraps `rust_decimal::Decimal` so fees are computed exactly and a settler is
/// never asked to collect zero or a negative sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, ParkingError> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(ParkingError::Validation(format!(
                "Amount must be positive, got {value}"
            )))
        }
    }

    /// For compile-time rate defaults; the value must be positive.
    pub(crate) const fn from_const(value: Decimal) -> Self {
        Self(value)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Multiplies the amount by a whole number of billable units.
    pub fn times(self, units: u32) -> Result<Self, ParkingError> {
        let product = self
            .0
            .checked_mul(Decimal::from(units))
            .ok_or_else(|| overflow(self, "*", units))?;
        Self::new(product)
    }

    pub fn checked_add(self, rhs: Self) -> Result<Self, ParkingError> {
        self.0
            .checked_add(rhs.0)
            .map(Self)
            .ok_or_else(|| overflow(self, "+", rhs))
    }
}

fn overflow(lhs: Amount, op: &str, rhs: impl fmt::Display) -> ParkingError {
    ParkingError::Validation(format!("Amount overflow: {lhs} {op} {rhs}"))
}

impl TryFrom<Decimal> for Amount {
    type Error = ParkingError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}
