use std::collections::BTreeSet;

use tracing::debug;

use stockroom_catalog::{ProductCatalog, ProductRepository};
use stockroom_core::{DomainError, DomainResult};
use stockroom_inventory::{StockLedger, StockStore};

use crate::row::ReportRow;

/// Builds the stock report dataset.
///
/// Reads are not coordinated with concurrent writers; a report may reflect a
/// stock level that changes right after it is read.
#[derive(Debug, Clone)]
pub struct ReportAggregator<P, S> {
    catalog: ProductCatalog<P>,
    ledger: StockLedger<S>,
}

impl<P, S> ReportAggregator<P, S>
where
    P: ProductRepository,
    S: StockStore,
{
    pub fn new(products: P, stock: S) -> Self {
        Self {
            catalog: ProductCatalog::new(products),
            ledger: StockLedger::new(stock),
        }
    }

    /// One row per selected product, in catalog order.
    ///
    /// An empty `categories` set selects every product.
    pub fn build(
        &self,
        categories: &BTreeSet<String>,
        low_stock_threshold: i64,
    ) -> DomainResult<Vec<ReportRow>> {
        if low_stock_threshold < 0 {
            return Err(DomainError::validation(format!(
                "low-stock threshold cannot be negative (got {low_stock_threshold})"
            )));
        }

        let products = self.catalog.list_by_category(categories)?;
        let mut rows = Vec::with_capacity(products.len());
        for product in &products {
            let quantity = self.ledger.get(product.id_typed())?;
            rows.push(ReportRow::new(product, quantity, low_stock_threshold));
        }

        debug!(
            rows = rows.len(),
            low_stock = rows.iter().filter(|r| r.is_low_stock).count(),
            threshold = low_stock_threshold,
            "stock report built"
        );
        Ok(rows)
    }

    /// Categories available for the report's filter.
    pub fn categories(&self) -> DomainResult<Vec<String>> {
        self.catalog.list_categories()
    }
}
