use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, ExpectedVersion, ProductId, Versioned};

/// On-hand quantity for one product.
///
/// Invariant: `quantity >= 0`. `version` counts committed writes; an entry that
/// was never stored has version 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockEntry {
    product_id: ProductId,
    quantity: i64,
    version: u64,
}

impl StockEntry {
    /// Implicit entry for a product with no stored stock.
    pub fn empty(product_id: ProductId) -> Self {
        Self {
            product_id,
            quantity: 0,
            version: 0,
        }
    }

    /// Rebuild a stored entry. Used by store implementations only.
    pub fn stored(product_id: ProductId, quantity: i64, version: u64) -> DomainResult<Self> {
        if quantity < 0 {
            return Err(DomainError::persistence(format!(
                "stored stock for product {product_id} is negative ({quantity})"
            )));
        }
        Ok(Self {
            product_id,
            quantity,
            version,
        })
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn is_stored(&self) -> bool {
        self.version > 0
    }

    /// Compute the result of adding `delta`, clamping at zero.
    pub fn apply_delta(&self, delta: i64) -> DomainResult<StockChange> {
        let raw = self.quantity.checked_add(delta).ok_or_else(|| {
            DomainError::validation(format!(
                "stock for product {} would overflow (current {}, delta {delta})",
                self.product_id, self.quantity
            ))
        })?;
        let current = raw.max(0);
        Ok(StockChange {
            product_id: self.product_id,
            previous: self.quantity,
            current,
            // `i64::MIN` against empty stock cannot be represented exactly.
            clamped: current.saturating_sub(raw),
        })
    }

    /// Plan an increment against this entry's version.
    ///
    /// No write is planned when the quantity would not change (zero delta, or a
    /// deduction from an already-empty entry).
    pub fn plan_delta(&self, delta: i64) -> DomainResult<StockPlan> {
        let change = self.apply_delta(delta)?;
        let write = (change.current != change.previous).then(|| StockWrite {
            product_id: self.product_id,
            quantity: change.current,
            expected: ExpectedVersion::Exact(self.version),
        });
        Ok(StockPlan { change, write })
    }
}

impl Versioned for StockEntry {
    fn version(&self) -> u64 {
        self.version
    }
}

/// Outcome of an increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockChange {
    pub product_id: ProductId,
    pub previous: i64,
    pub current: i64,
    /// Units of a deduction that could not be applied because stock hit zero.
    pub clamped: i64,
}

impl StockChange {
    pub fn was_clamped(&self) -> bool {
        self.clamped > 0
    }

    /// Net change actually recorded.
    pub fn applied_delta(&self) -> i64 {
        self.current - self.previous
    }
}

/// A conditional write of a stock quantity.
///
/// The store assigns the next version; it rejects the write with `Conflict`
/// when the stored version does not match `expected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockWrite {
    pub product_id: ProductId,
    pub quantity: i64,
    pub expected: ExpectedVersion,
}

impl StockWrite {
    /// Unconditional overwrite; `quantity` must be non-negative.
    pub fn absolute(product_id: ProductId, quantity: i64) -> DomainResult<Self> {
        if quantity < 0 {
            return Err(DomainError::validation(format!(
                "stock quantity cannot be negative (got {quantity})"
            )));
        }
        Ok(Self {
            product_id,
            quantity,
            expected: ExpectedVersion::Any,
        })
    }

    /// Check the expectation against `current` and produce the entry to store.
    pub fn apply_to(&self, current: Option<&StockEntry>) -> DomainResult<StockEntry> {
        let version = current.map(|e| e.version).unwrap_or(0);
        self.expected.check(version)?;
        StockEntry::stored(self.product_id, self.quantity, version + 1)
    }
}

/// A planned increment: what it changes, and the write needed (if any).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockPlan {
    pub change: StockChange,
    pub write: Option<StockWrite>,
}
