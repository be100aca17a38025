use std::collections::BTreeSet;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use stockroom_catalog::ProductRepository;
use stockroom_core::{DomainError, DomainResult};
use stockroom_inventory::StockStore;

use crate::aggregator::ReportAggregator;
use crate::document::{DocumentWriter, ReportDocument};

/// Report locations supplied by configuration. Treated as opaque paths.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    pub output_dir: Option<String>,
    pub logo_path: Option<String>,
}

impl ReportConfig {
    /// Output directory and logo path; blank values count as missing.
    pub fn require(&self) -> DomainResult<(PathBuf, PathBuf)> {
        let output_dir = non_blank(&self.output_dir)
            .ok_or_else(|| DomainError::config("report output directory is not configured"))?;
        let logo_path = non_blank(&self.logo_path)
            .ok_or_else(|| DomainError::config("report logo path is not configured"))?;
        Ok((PathBuf::from(output_dir), PathBuf::from(logo_path)))
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// File name for a report generated at `at`.
pub fn report_file_name(at: DateTime<Utc>, extension: &str) -> String {
    format!("stock_report_{}.{extension}", at.format("%Y%m%d_%H%M%S"))
}

/// Builds a report and hands it to a document writer.
#[derive(Debug, Clone)]
pub struct ReportPublisher<P, S> {
    aggregator: ReportAggregator<P, S>,
    config: ReportConfig,
}

impl<P, S> ReportPublisher<P, S>
where
    P: ProductRepository,
    S: StockStore,
{
    pub fn new(aggregator: ReportAggregator<P, S>, config: ReportConfig) -> Self {
        Self { aggregator, config }
    }

    pub fn aggregator(&self) -> &ReportAggregator<P, S> {
        &self.aggregator
    }

    /// Check configuration, build rows, and write the document.
    ///
    /// Nothing is built or written when configuration is missing.
    pub fn publish(
        &self,
        categories: &BTreeSet<String>,
        low_stock_threshold: i64,
        writer: &dyn DocumentWriter,
    ) -> DomainResult<PathBuf> {
        let (output_dir, logo_path) = self.config.require()?;
        let rows = self.aggregator.build(categories, low_stock_threshold)?;

        let generated_at = Utc::now();
        let output_path = output_dir.join(report_file_name(generated_at, writer.extension()));
        let document = ReportDocument {
            rows,
            categories: categories.clone(),
            low_stock_threshold,
            logo_path,
            output_path,
            generated_at,
        };

        let written = writer.write(&document)?;
        info!(
            path = %written.display(),
            rows = document.rows.len(),
            threshold = low_stock_threshold,
            "stock report written"
        );
        Ok(written)
    }
}
