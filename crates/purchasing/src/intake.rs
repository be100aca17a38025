use chrono::Utc;
use tracing::info;

use stockroom_catalog::{ProductCatalog, ProductRepository};
use stockroom_core::{DomainError, DomainResult, EmployeeId, OrderId, ProductId};
use stockroom_inventory::{StockLedger, StockStore, retry_on_conflict};

use crate::employee::{EmployeeDirectory, require_employee};
use crate::order::ReplenishmentOrder;
use crate::store::ReplenishmentStore;

/// Replenishment intake service.
///
/// ```text
/// validate quantity → resolve product → resolve employee → snapshot price
///   → commit { insert order, stock += quantity }   (one unit of work)
/// ```
///
/// The commit is retried from a fresh stock read when another writer bumped the
/// entry version in between; the order itself is built once.
#[derive(Debug, Clone)]
pub struct ReplenishmentIntake<P, S, O, E> {
    catalog: ProductCatalog<P>,
    ledger: StockLedger<S>,
    orders: O,
    employees: E,
}

impl<P, S, O, E> ReplenishmentIntake<P, S, O, E>
where
    P: ProductRepository,
    S: StockStore,
    O: ReplenishmentStore,
    E: EmployeeDirectory,
{
    pub fn new(products: P, stock: S, orders: O, employees: E) -> Self {
        Self {
            catalog: ProductCatalog::new(products),
            ledger: StockLedger::new(stock),
            orders,
            employees,
        }
    }

    pub fn place_order(
        &self,
        product_id: ProductId,
        employee_id: EmployeeId,
        quantity: i64,
    ) -> DomainResult<ReplenishmentOrder> {
        if quantity <= 0 {
            return Err(DomainError::validation(format!(
                "order quantity must be greater than zero (got {quantity})"
            )));
        }

        let product = self.catalog.get(product_id)?;
        let employee = self
            .employees
            .resolve(employee_id)?
            .ok_or_else(|| DomainError::not_found(format!("employee {employee_id}")))?;

        let order = ReplenishmentOrder::place(OrderId::new(), &product, &employee, quantity, Utc::now())?;

        let entry = retry_on_conflict(product_id, || {
            let plan = self.ledger.plan_increment(product_id, quantity)?;
            let write = plan.write.ok_or_else(|| {
                DomainError::persistence(format!(
                    "positive increment for product {product_id} planned no stock write"
                ))
            })?;
            self.orders.commit_replenishment(&order, write)
        })?;

        info!(
            order_id = %order.id_typed(),
            product_id = %product_id,
            employee_id = %employee_id,
            quantity,
            total_price = %order.total_price(),
            stock = entry.quantity(),
            "replenishment order placed"
        );
        Ok(order)
    }

    /// Place an order on behalf of the session's employee.
    pub fn place_order_for_session(
        &self,
        session: Option<EmployeeId>,
        product_id: ProductId,
        quantity: i64,
    ) -> DomainResult<ReplenishmentOrder> {
        let employee_id = require_employee(session)?;
        self.place_order(product_id, employee_id, quantity)
    }

    pub fn get_order(&self, id: OrderId) -> DomainResult<ReplenishmentOrder> {
        self.orders
            .get_order(id)?
            .ok_or_else(|| DomainError::not_found(format!("order {id}")))
    }

    pub fn list_orders(&self) -> DomainResult<Vec<ReplenishmentOrder>> {
        self.orders.list_orders()
    }
}
