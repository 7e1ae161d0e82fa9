// ⚙️ Report Configuration - Settings as data (JSON)
//
// Example file:
// {
//   "month_grouping": "calendar",
//   "budgets": [{ "category": "Food", "limit": 400 }]
// }

use crate::aggregation::MonthGrouping;
use crate::models::BudgetLimit;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Month bucketing for the monthly series
    pub month_grouping: MonthGrouping,

    /// Category spending caps tracked in reports
    pub budgets: Vec<BudgetLimit>,
}

impl ReportConfig {
    /// Load configuration from a JSON file; missing keys take defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }
}

// ============================================================================
// TESTS
// ============================================================================
