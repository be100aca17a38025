//! Configuration loading and representation.
//!
//! Configuration is read once at startup and passed to the services that need
//! it; nothing reads the environment after that.

use serde::{Deserialize, Serialize};
use tracing::warn;

use stockroom_reporting::ReportConfig;

pub const REPORT_DIR_VAR: &str = "STOCKROOM_REPORT_DIR";
pub const LOGO_PATH_VAR: &str = "STOCKROOM_LOGO_PATH";
pub const LOW_STOCK_THRESHOLD_VAR: &str = "STOCKROOM_LOW_STOCK_THRESHOLD";

/// Threshold used when none is configured.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 5;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub report: ReportConfig,
    pub low_stock_threshold: i64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            report: ReportConfig::default(),
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (environment, test map, ...).
    ///
    /// Missing report paths are kept as `None` so the failure surfaces when a
    /// report is requested, not at startup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let output_dir = lookup(REPORT_DIR_VAR);
        if output_dir.is_none() {
            warn!("{REPORT_DIR_VAR} not set; stock reports cannot be written");
        }
        let logo_path = lookup(LOGO_PATH_VAR);
        if logo_path.is_none() {
            warn!("{LOGO_PATH_VAR} not set; stock reports cannot be written");
        }

        let low_stock_threshold = match lookup(LOW_STOCK_THRESHOLD_VAR) {
            None => DEFAULT_LOW_STOCK_THRESHOLD,
            Some(raw) => match raw.trim().parse::<i64>() {
                Ok(v) if v >= 0 => v,
                _ => {
                    warn!(
                        value = %raw,
                        default = DEFAULT_LOW_STOCK_THRESHOLD,
                        "{LOW_STOCK_THRESHOLD_VAR} is not a non-negative integer; using default"
                    );
                    DEFAULT_LOW_STOCK_THRESHOLD
                }
            },
        };

        Self {
            report: ReportConfig {
                output_dir,
                logo_path,
            },
            low_stock_threshold,
        }
    }
}
