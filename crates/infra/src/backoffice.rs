//! Composition root: wires services to the in-memory adapters.

use std::collections::BTreeSet;
use std::sync::Arc;

use stockroom_catalog::ProductCatalog;
use stockroom_core::DomainResult;
use stockroom_filters::{OrderRow, RowCriteria, RowFilter, StockRow};
use stockroom_inventory::StockLedger;
use stockroom_purchasing::{EmployeeDirectory, ReplenishmentIntake};
use stockroom_reporting::{ReportAggregator, ReportPublisher, ReportRow};

use crate::config::AppConfig;
use crate::employees::InMemoryEmployeeDirectory;
use crate::store::InMemoryStore;

pub type Store = Arc<InMemoryStore>;
pub type Directory = Arc<InMemoryEmployeeDirectory>;

/// The inventory back office with all services sharing one store.
#[derive(Debug)]
pub struct Backoffice {
    employees: Directory,
    catalog: ProductCatalog<Store>,
    ledger: StockLedger<Store>,
    intake: ReplenishmentIntake<Store, Store, Store, Directory>,
    reports: ReportPublisher<Store, Store>,
    config: AppConfig,
}

impl Backoffice {
    /// Initialise logging, read configuration from the environment, and wire
    /// an in-memory back office.
    pub fn bootstrap() -> Self {
        stockroom_observability::init();
        Self::in_memory(AppConfig::from_env())
    }

    pub fn in_memory(config: AppConfig) -> Self {
        let store: Store = Arc::new(InMemoryStore::new());
        let employees: Directory = Arc::new(InMemoryEmployeeDirectory::new());

        Self {
            catalog: ProductCatalog::new(store.clone()),
            ledger: StockLedger::new(store.clone()),
            intake: ReplenishmentIntake::new(store.clone(), store.clone(), store.clone(), employees.clone()),
            reports: ReportPublisher::new(
                ReportAggregator::new(store.clone(), store),
                config.report.clone(),
            ),
            employees,
            config,
        }
    }

    pub fn catalog(&self) -> &ProductCatalog<Store> {
        &self.catalog
    }

    pub fn ledger(&self) -> &StockLedger<Store> {
        &self.ledger
    }

    pub fn intake(&self) -> &ReplenishmentIntake<Store, Store, Store, Directory> {
        &self.intake
    }

    pub fn reports(&self) -> &ReportPublisher<Store, Store> {
        &self.reports
    }

    pub fn employees(&self) -> &InMemoryEmployeeDirectory {
        &self.employees
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Report rows using the configured low-stock threshold.
    pub fn stock_report(&self, categories: &BTreeSet<String>) -> DomainResult<Vec<ReportRow>> {
        self.reports
            .aggregator()
            .build(categories, self.config.low_stock_threshold)
    }

    /// Stock table rows, one per product, in catalog order.
    pub fn stock_rows(&self) -> DomainResult<Vec<StockRow>> {
        let products = self.catalog.list_by_category(&BTreeSet::new())?;
        let mut rows = Vec::with_capacity(products.len());
        for product in products {
            rows.push(StockRow {
                quantity: self.ledger.get(product.id_typed())?,
                name: product.name().to_string(),
                category: product.category().to_string(),
                unit_price: product.unit_price().amount(),
            });
        }
        Ok(rows)
    }

    /// Order history rows, in creation order.
    ///
    /// An employee missing from the directory is shown by id.
    pub fn order_rows(&self) -> DomainResult<Vec<OrderRow>> {
        let orders = self.intake.list_orders()?;
        let mut rows = Vec::with_capacity(orders.len());
        for order in orders {
            let product = self.catalog.get(order.product_id())?;
            let employee_name = match self.employees.resolve(order.employee_id())? {
                Some(employee) => employee.name,
                None => order.employee_id().to_string(),
            };
            rows.push(OrderRow {
                product_name: product.name().to_string(),
                employee_name,
                quantity: order.quantity(),
                total_price: order.total_price(),
                date: order.date().date_naive(),
            });
        }
        Ok(rows)
    }

    pub fn filter_stock(&self, criteria: &RowCriteria) -> DomainResult<Vec<StockRow>> {
        let rows = self.stock_rows()?;
        let filter = RowFilter::from_criteria(criteria);
        Ok(filter.apply(&rows).into_iter().cloned().collect())
    }

    pub fn filter_orders(&self, criteria: &RowCriteria) -> DomainResult<Vec<OrderRow>> {
        let rows = self.order_rows()?;
        let filter = RowFilter::from_criteria(criteria);
        Ok(filter.apply(&rows).into_iter().cloned().collect())
    }
}
