//! Replenishment intake (supply-side purchase orders).
//!
//! Placing an order records a price snapshot and raises stock for the product
//! in a single unit of work.

pub mod employee;
pub mod intake;
pub mod order;
pub mod store;

pub use employee::{Employee, EmployeeDirectory, require_employee};
pub use intake::ReplenishmentIntake;
pub use order::ReplenishmentOrder;
pub use store::ReplenishmentStore;
