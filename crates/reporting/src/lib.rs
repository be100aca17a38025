//! Stock reporting: joins the catalog with the stock ledger.
//!
//! The aggregator produces rows only; rendering to PDF/CSV belongs to a
//! [`DocumentWriter`] supplied by the caller.

pub mod aggregator;
pub mod document;
pub mod publisher;
pub mod row;

pub use aggregator::ReportAggregator;
pub use document::{DocumentWriter, ReportDocument};
pub use publisher::{ReportConfig, ReportPublisher};
pub use row::ReportRow;
