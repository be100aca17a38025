use std::sync::Arc;

use stockroom_core::{DomainResult, OrderId};
use stockroom_inventory::{StockEntry, StockWrite};

use crate::order::ReplenishmentOrder;

/// Persistence for replenishment orders.
///
/// `commit_replenishment` is the unit of work behind placing an order: the
/// order row and the stock write are applied together or not at all. A stale
/// stock version fails the whole unit with `Conflict`.
pub trait ReplenishmentStore: Send + Sync {
    fn get_order(&self, id: OrderId) -> DomainResult<Option<ReplenishmentOrder>>;

    /// Orders in creation order.
    fn list_orders(&self) -> DomainResult<Vec<ReplenishmentOrder>>;

    fn commit_replenishment(
        &self,
        order: &ReplenishmentOrder,
        stock: StockWrite,
    ) -> DomainResult<StockEntry>;
}

impl<S> ReplenishmentStore for Arc<S>
where
    S: ReplenishmentStore + ?Sized,
{
    fn get_order(&self, id: OrderId) -> DomainResult<Option<ReplenishmentOrder>> {
        (**self).get_order(id)
    }

    fn list_orders(&self) -> DomainResult<Vec<ReplenishmentOrder>> {
        (**self).list_orders()
    }

    fn commit_replenishment(
        &self,
        order: &ReplenishmentOrder,
        stock: StockWrite,
    ) -> DomainResult<StockEntry> {
        (**self).commit_replenishment(order, stock)
    }
}
