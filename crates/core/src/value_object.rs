//! Value objects: equality by value, not identity.
//!
//! Every value object here is validated on construction, so holding one is
//! proof that the input passed the catalog's validation policy.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by value. To "modify" one, build a
/// new one.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

/// A human-readable label made of letters and spaces (product names, categories).
///
/// Leading/trailing whitespace is trimmed; the remainder must be non-empty.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Label(String);

impl Label {
    /// Validate `raw` for the named field (used in the error message).
    pub fn parse(field: &str, raw: &str) -> DomainResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation(format!("{field} cannot be empty")));
        }
        if let Some(bad) = trimmed.chars().find(|c| !(c.is_alphabetic() || *c == ' ')) {
            return Err(DomainError::validation(format!(
                "{field} may only contain letters and spaces (found {bad:?})"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for Label {}

impl core::fmt::Display for Label {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Label {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Label::parse("label", &value)
    }
}

impl From<Label> for String {
    fn from(value: Label) -> Self {
        value.0
    }
}

/// A strictly positive unit price, held as an exact decimal.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct UnitPrice(Decimal);

impl UnitPrice {
    pub fn new(amount: Decimal) -> DomainResult<Self> {
        if amount <= Decimal::ZERO {
            return Err(DomainError::validation(format!(
                "unit price must be greater than zero (got {amount})"
            )));
        }
        Ok(Self(amount))
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Exact `price × quantity`; `quantity` must be positive.
    pub fn total_for(&self, quantity: i64) -> DomainResult<Decimal> {
        if quantity <= 0 {
            return Err(DomainError::validation(format!(
                "quantity must be greater than zero (got {quantity})"
            )));
        }
        self.0
            .checked_mul(Decimal::from(quantity))
            .ok_or_else(|| DomainError::validation("total price is out of range"))
    }
}

impl ValueObject for UnitPrice {}

impl core::fmt::Display for UnitPrice {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl TryFrom<Decimal> for UnitPrice {
    type Error = DomainError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        UnitPrice::new(value)
    }
}

impl From<UnitPrice> for Decimal {
    fn from(value: UnitPrice) -> Self {
        value.0
    }
}
