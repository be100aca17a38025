use std::sync::Arc;

use stockroom_core::{DomainResult, ProductId};

use crate::entry::{StockEntry, StockWrite};

/// Persistence contract for stock entries (keyed by product id).
///
/// `save` is a compare-and-swap: it applies the write only when the stored
/// version matches `write.expected`, and returns `Conflict` otherwise. A SQL
/// backend maps this to `UPDATE ... WHERE product_id = $1 AND version = $2`.
pub trait StockStore: Send + Sync {
    fn load(&self, product_id: ProductId) -> DomainResult<Option<StockEntry>>;

    fn save(&self, write: StockWrite) -> DomainResult<StockEntry>;

    fn list(&self) -> DomainResult<Vec<StockEntry>>;
}

impl<S> StockStore for Arc<S>
where
    S: StockStore + ?Sized,
{
    fn load(&self, product_id: ProductId) -> DomainResult<Option<StockEntry>> {
        (**self).load(product_id)
    }

    fn save(&self, write: StockWrite) -> DomainResult<StockEntry> {
        (**self).save(write)
    }

    fn list(&self) -> DomainResult<Vec<StockEntry>> {
        (**self).list()
    }
}
