// crates/core/src/planner.rs
//! Turns resolved thresholds into the six read-only query specifications an
//! audit needs.
//!
//! Specifications are typed filters, not SQL. The store decides how to
//! express them and must bind every number and pattern as a parameter.

use crate::thresholds::Thresholds;

/// Hard cap on rows returned by the two threshold listings.
pub const MAX_LISTED_ROWS: i64 = 200;

/// Name prefixes that mark an option as transient-like.
pub const TRANSIENT_PREFIXES: [&str; 2] = ["_transient_", "_site_transient_"];

/// Single-value aggregate queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarQuery {
    /// Count of every option.
    CountAll,
    /// Count of options flagged autoload.
    CountAutoload,
    /// Sum of value byte lengths across autoloaded options (0 when none).
    SumAutoloadBytes,
}

impl ScalarQuery {
    pub fn label(self) -> &'static str {
        match self {
            ScalarQuery::CountAll => "total_count",
            ScalarQuery::CountAutoload => "autoload_count",
            ScalarQuery::SumAutoloadBytes => "autoload_bytes",
        }
    }
}

/// A filtered row listing, always ordered by value size descending and then
/// by name ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowQuery {
    pub label: &'static str,
    /// Only rows with the autoload flag set.
    pub autoload_only: bool,
    /// Inclusive lower bound on value byte length.
    pub min_bytes: Option<i64>,
    /// Name must start with one of these literal prefixes. Empty means any name.
    pub name_prefixes: Vec<&'static str>,
    pub limit: i64,
}

/// Everything one audit run asks of the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditPlan {
    pub total: ScalarQuery,
    pub autoload_count: ScalarQuery,
    pub autoload_bytes: ScalarQuery,
    pub top_autoload: RowQuery,
    pub large_options: RowQuery,
    pub large_transients: RowQuery,
}

impl AuditPlan {
    pub fn new(thresholds: &Thresholds) -> Self {
        Self {
            total: ScalarQuery::CountAll,
            autoload_count: ScalarQuery::CountAutoload,
            autoload_bytes: ScalarQuery::SumAutoloadBytes,
            top_autoload: RowQuery {
                label: "top_autoload",
                autoload_only: true,
                min_bytes: None,
                name_prefixes: Vec::new(),
                limit: thresholds.top_autoload_limit,
            },
            large_options: RowQuery {
                label: "large_options",
                autoload_only: false,
                min_bytes: Some(thresholds.large_option_threshold),
                name_prefixes: Vec::new(),
                limit: MAX_LISTED_ROWS,
            },
            large_transients: RowQuery {
                label: "large_transients",
                autoload_only: false,
                min_bytes: Some(thresholds.large_transient_threshold),
                name_prefixes: TRANSIENT_PREFIXES.to_vec(),
                limit: MAX_LISTED_ROWS,
            },
        }
    }
}

/// True when `name` carries one of the transient prefixes.
pub fn is_transient_name(name: &str) -> bool {
    TRANSIENT_PREFIXES.iter().any(|p| name.starts_with(p))
}
