//! `stockroom-core`: shared domain building blocks.
//!
//! Identifiers, validated value objects, the error taxonomy and optimistic
//! versioning. This crate contains no storage or IO.

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;
pub mod version;

pub use entity::{Entity, position_of};
pub use error::{DomainError, DomainResult};
pub use id::{EmployeeId, OrderId, ProductId};
pub use value_object::{Label, UnitPrice, ValueObject};
pub use version::{ExpectedVersion, Versioned};
