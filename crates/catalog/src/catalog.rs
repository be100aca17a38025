use std::collections::BTreeSet;

use rust_decimal::Decimal;
use tracing::info;

use stockroom_core::{DomainError, DomainResult, ProductId};

use crate::product::Product;
use crate::repository::ProductRepository;

/// Catalog service: validates input, then delegates to the repository.
#[derive(Debug, Clone)]
pub struct ProductCatalog<R> {
    repo: R,
}

impl<R> ProductCatalog<R>
where
    R: ProductRepository,
{
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validate and persist a new product under a fresh identity.
    pub fn create(&self, name: &str, category: &str, unit_price: Decimal) -> DomainResult<Product> {
        let product = Product::new(ProductId::new(), name, category, unit_price)?;
        self.repo.insert(product.clone())?;
        info!(
            product_id = %product.id_typed(),
            name = product.name(),
            category = product.category(),
            unit_price = %product.unit_price(),
            "product created"
        );
        Ok(product)
    }

    /// Validate and overwrite an existing product.
    pub fn update(
        &self,
        id: ProductId,
        name: &str,
        category: &str,
        unit_price: Decimal,
    ) -> DomainResult<Product> {
        let product = Product::new(id, name, category, unit_price)?;
        self.repo.update(product.clone())?;
        info!(product_id = %id, "product updated");
        Ok(product)
    }

    /// Change only the unit price. Past orders keep their own snapshot.
    pub fn reprice(&self, id: ProductId, unit_price: Decimal) -> DomainResult<Product> {
        let current = self.get(id)?;
        let product = current.with_unit_price(unit_price)?;
        self.repo.update(product.clone())?;
        info!(
            product_id = %id,
            from = %current.unit_price(),
            to = %product.unit_price(),
            "product repriced"
        );
        Ok(product)
    }

    pub fn get(&self, id: ProductId) -> DomainResult<Product> {
        self.repo
            .get(id)?
            .ok_or_else(|| DomainError::not_found(format!("product {id}")))
    }

    /// Products whose category is in `categories`, in catalog order.
    ///
    /// An empty set returns every product.
    pub fn list_by_category(&self, categories: &BTreeSet<String>) -> DomainResult<Vec<Product>> {
        let mut products = self.repo.list()?;
        products.retain(|p| p.in_categories(categories));
        Ok(products)
    }

    /// Distinct categories, sorted.
    pub fn list_categories(&self) -> DomainResult<Vec<String>> {
        let categories: BTreeSet<String> = self
            .repo
            .list()?
            .into_iter()
            .map(|p| p.category().to_string())
            .collect();
        Ok(categories.into_iter().collect())
    }
}
