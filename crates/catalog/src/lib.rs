//! Product catalog: validated product records and the catalog service.
//!
//! Storage is reached only through [`ProductRepository`]; this crate performs no IO.

pub mod catalog;
pub mod product;
pub mod repository;

pub use catalog::ProductCatalog;
pub use product::Product;
pub use repository::ProductRepository;
