use std::sync::Arc;

use stockroom_core::{DomainResult, ProductId};

use crate::product::Product;

/// Storage delegate for catalog products.
///
/// Implementations keep products in insertion order; `list` must return them in
/// that order so reports stay stable between calls.
pub trait ProductRepository: Send + Sync {
    fn get(&self, id: ProductId) -> DomainResult<Option<Product>>;

    /// Store a new product. Fails with `Conflict` if the id is already taken.
    fn insert(&self, product: Product) -> DomainResult<()>;

    /// Overwrite an existing product. Fails with `NotFound` if the id is unknown.
    fn update(&self, product: Product) -> DomainResult<()>;

    fn list(&self) -> DomainResult<Vec<Product>>;
}

impl<S> ProductRepository for Arc<S>
where
    S: ProductRepository + ?Sized,
{
    fn get(&self, id: ProductId) -> DomainResult<Option<Product>> {
        (**self).get(id)
    }

    fn insert(&self, product: Product) -> DomainResult<()> {
        (**self).insert(product)
    }

    fn update(&self, product: Product) -> DomainResult<()> {
        (**self).update(product)
    }

    fn list(&self) -> DomainResult<Vec<Product>> {
        (**self).list()
    }
}
