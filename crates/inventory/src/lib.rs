//! Stock ledger: one non-negative stock entry per product.
//!
//! Every read-modify-write goes through an optimistic compare-and-swap on the
//! entry version, so concurrent increments compose without lost updates.

pub mod entry;
pub mod ledger;
pub mod store;

pub use entry::{StockChange, StockEntry, StockPlan, StockWrite};
pub use ledger::{MAX_WRITE_ATTEMPTS, StockLedger, retry_on_conflict};
pub use store::StockStore;
