use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use stockroom_catalog::{Product, ProductRepository};
use stockroom_core::{DomainError, DomainResult, OrderId, ProductId, position_of};
use stockroom_inventory::{StockEntry, StockStore, StockWrite};
use stockroom_purchasing::{ReplenishmentOrder, ReplenishmentStore};

#[derive(Debug, Default)]
struct Tables {
    products: Vec<Product>,
    stock: HashMap<ProductId, StockEntry>,
    orders: Vec<ReplenishmentOrder>,
}

/// In-memory persistence store for tests/dev.
///
/// All tables sit behind one lock, so every write (including the two-row
/// replenishment commit) is atomic. Products and orders keep insertion order.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> DomainResult<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|_| DomainError::persistence("store lock poisoned"))
    }

    fn write(&self) -> DomainResult<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|_| DomainError::persistence("store lock poisoned"))
    }
}

impl ProductRepository for InMemoryStore {
    fn get(&self, id: ProductId) -> DomainResult<Option<Product>> {
        let tables = self.read()?;
        Ok(position_of(&tables.products, &id).map(|i| tables.products[i].clone()))
    }

    fn insert(&self, product: Product) -> DomainResult<()> {
        let mut tables = self.write()?;
        if position_of(&tables.products, &product.id_typed()).is_some() {
            return Err(DomainError::conflict(format!(
                "product {} already exists",
                product.id_typed()
            )));
        }
        tables.products.push(product);
        Ok(())
    }

    fn update(&self, product: Product) -> DomainResult<()> {
        let mut tables = self.write()?;
        let idx = position_of(&tables.products, &product.id_typed())
            .ok_or_else(|| DomainError::not_found(format!("product {}", product.id_typed())))?;
        tables.products[idx] = product;
        Ok(())
    }

    fn list(&self) -> DomainResult<Vec<Product>> {
        Ok(self.read()?.products.clone())
    }
}

impl StockStore for InMemoryStore {
    fn load(&self, product_id: ProductId) -> DomainResult<Option<StockEntry>> {
        Ok(self.read()?.stock.get(&product_id).copied())
    }

    fn save(&self, write: StockWrite) -> DomainResult<StockEntry> {
        let mut tables = self.write()?;
        let next = write.apply_to(tables.stock.get(&write.product_id))?;
        tables.stock.insert(write.product_id, next);
        Ok(next)
    }

    /// Entries ordered by product id.
    fn list(&self) -> DomainResult<Vec<StockEntry>> {
        let mut entries: Vec<StockEntry> = self.read()?.stock.values().copied().collect();
        entries.sort_by_key(|e| e.product_id());
        Ok(entries)
    }
}

impl ReplenishmentStore for InMemoryStore {
    fn get_order(&self, id: OrderId) -> DomainResult<Option<ReplenishmentOrder>> {
        let tables = self.read()?;
        Ok(position_of(&tables.orders, &id).map(|i| tables.orders[i].clone()))
    }

    fn list_orders(&self) -> DomainResult<Vec<ReplenishmentOrder>> {
        Ok(self.read()?.orders.clone())
    }

    fn commit_replenishment(
        &self,
        order: &ReplenishmentOrder,
        stock: StockWrite,
    ) -> DomainResult<StockEntry> {
        if stock.product_id != order.product_id() {
            return Err(DomainError::persistence(format!(
                "stock write for product {} does not match order product {}",
                stock.product_id,
                order.product_id()
            )));
        }

        let mut tables = self.write()?;
        if position_of(&tables.orders, &order.id_typed()).is_some() {
            return Err(DomainError::persistence(format!(
                "order {} already recorded",
                order.id_typed()
            )));
        }

        // Validate both rows before touching either.
        let next = stock.apply_to(tables.stock.get(&stock.product_id))?;
        tables.stock.insert(stock.product_id, next);
        tables.orders.push(order.clone());
        Ok(next)
    }
}
