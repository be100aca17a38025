//! Row filtering for on-screen stock and order tables.
//!
//! Criteria arrive as raw text from filter fields. Blank criteria are ignored;
//! criteria that fail to parse match nothing.

pub mod criteria;
pub mod row;

pub use criteria::{Criterion, FilterDiagnostic, RowCriteria, RowFilter};
pub use row::{FilterRow, OrderRow, StockRow};
