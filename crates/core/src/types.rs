// crates/core/src/types.rs
use serde::{Deserialize, Serialize};

use crate::format::{human_bytes, percentage};
use crate::thresholds::Thresholds;

/// One option as listed in an audit table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionRow {
    pub name: String,
    pub autoload: bool,
    /// Exact byte length of the stored value.
    pub size_bytes: i64,
}

impl OptionRow {
    pub fn new(name: impl Into<String>, autoload: bool, size_bytes: i64) -> Self {
        Self {
            name: name.into(),
            autoload,
            size_bytes,
        }
    }

    pub fn size_human(&self) -> String {
        human_bytes(self.size_bytes)
    }
}

/// Result of one audit run. Built fresh per request and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditResult {
    pub thresholds: Thresholds,
    pub total: i64,
    pub autoload_count: i64,
    pub autoload_bytes: i64,
    /// Largest autoloaded options, size descending.
    pub top_autoload: Vec<OptionRow>,
    /// Options of any autoload state at or above the large-option threshold.
    pub large_options: Vec<OptionRow>,
    /// Transient-like options at or above the large-transient threshold.
    pub large_transients: Vec<OptionRow>,
}

impl AuditResult {
    /// Share of options flagged autoload, as a whole percentage.
    pub fn autoload_share_percent(&self) -> i64 {
        percentage(self.autoload_count, self.total)
    }

    pub fn autoload_bytes_human(&self) -> String {
        human_bytes(self.autoload_bytes)
    }

    /// True when none of the three listings found anything.
    pub fn has_no_findings(&self) -> bool {
        self.top_autoload.is_empty() && self.large_options.is_empty() && self.large_transients.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(total: i64, autoload_count: i64, autoload_bytes: i64) -> AuditResult {
        AuditResult {
            thresholds: Thresholds::default(),
            total,
            autoload_count,
            autoload_bytes,
            top_autoload: vec![],
            large_options: vec![],
            large_transients: vec![],
        }
    }

    #[test]
    fn test_autoload_share_percent() {
        assert_eq!(result(0, 0, 0).autoload_share_percent(), 0);
        assert_eq!(result(3, 1, 0).autoload_share_percent(), 33);
        assert_eq!(result(4, 4, 0).autoload_share_percent(), 100);
    }

    #[test]
    fn test_autoload_bytes_human() {
        assert_eq!(result(1, 1, 2048).autoload_bytes_human(), "2.0 KB");
    }

    #[test]
    fn test_has_no_findings() {
        let mut r = result(1, 1, 10);
        assert!(r.has_no_findings());
        r.large_transients.push(OptionRow::new("_transient_x", false, 30_000));
        assert!(!r.has_no_findings());
    }

    #[test]
    fn test_option_row_serialization() {
        let row = OptionRow::new("siteurl", true, 21);
        let json = serde_json::to_string(&row).unwrap();
        assert!(json.contains("\"name\":\"siteurl\""));
        assert!(json.contains("\"autoload\":true"));
        assert!(json.contains("\"sizeBytes\":21"));
        assert_eq!(row.size_human(), "21 B");
    }
}
