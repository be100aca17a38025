use std::collections::BTreeSet;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

use stockroom_core::DomainResult;

use crate::row::ReportRow;

/// Everything a document writer needs to render a stock report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportDocument {
    pub rows: Vec<ReportRow>,
    pub categories: BTreeSet<String>,
    pub low_stock_threshold: i64,
    pub logo_path: PathBuf,
    pub output_path: PathBuf,
    pub generated_at: DateTime<Utc>,
}

impl ReportDocument {
    /// Heading naming the category selection.
    pub fn title(&self) -> String {
        if self.categories.is_empty() {
            "Stock report: all categories".to_string()
        } else {
            let names: Vec<&str> = self.categories.iter().map(String::as_str).collect();
            format!("Stock report: {}", names.join(", "))
        }
    }

    pub fn low_stock_rows(&self) -> impl Iterator<Item = &ReportRow> {
        self.rows.iter().filter(|r| r.is_low_stock)
    }
}

/// Renders a report to a file (PDF, CSV, ...). Implemented outside the core.
pub trait DocumentWriter {
    /// File extension without the dot, e.g. `"pdf"`.
    fn extension(&self) -> &str;

    /// Write `document` to `document.output_path` and return the written path.
    fn write(&self, document: &ReportDocument) -> DomainResult<PathBuf>;
}
