// crates/core/src/thresholds.rs
//! Caller-adjustable audit thresholds.
//!
//! Each knob takes an optional override. Anything absent, zero or negative
//! resolves to the documented default instead of being rejected.

use serde::{Deserialize, Serialize};

/// Default number of autoloaded options listed in the "largest autoloaded" table.
pub const DEFAULT_TOP_AUTOLOAD_LIMIT: i64 = 50;
/// Default byte size at which any option counts as oversized.
pub const DEFAULT_LARGE_OPTION_THRESHOLD: i64 = 50_000;
/// Default byte size at which a transient-like option is listed.
pub const DEFAULT_LARGE_TRANSIENT_THRESHOLD: i64 = 20_000;

/// Override points supplied by the host before a report runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdOverrides {
    pub top_autoload_limit: Option<i64>,
    pub large_option_threshold: Option<i64>,
    pub large_transient_threshold: Option<i64>,
}

/// Thresholds after coercion; every field is strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Thresholds {
    pub top_autoload_limit: i64,
    pub large_option_threshold: i64,
    pub large_transient_threshold: i64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            top_autoload_limit: DEFAULT_TOP_AUTOLOAD_LIMIT,
            large_option_threshold: DEFAULT_LARGE_OPTION_THRESHOLD,
            large_transient_threshold: DEFAULT_LARGE_TRANSIENT_THRESHOLD,
        }
    }
}

impl ThresholdOverrides {
    /// Resolve overrides into usable thresholds.
    pub fn resolve(&self) -> Thresholds {
        Thresholds {
            top_autoload_limit: positive_or(self.top_autoload_limit, DEFAULT_TOP_AUTOLOAD_LIMIT),
            large_option_threshold: positive_or(
                self.large_option_threshold,
                DEFAULT_LARGE_OPTION_THRESHOLD,
            ),
            large_transient_threshold: positive_or(
                self.large_transient_threshold,
                DEFAULT_LARGE_TRANSIENT_THRESHOLD,
            ),
        }
    }
}

impl From<ThresholdOverrides> for Thresholds {
    fn from(overrides: ThresholdOverrides) -> Self {
        overrides.resolve()
    }
}

fn positive_or(value: Option<i64>, default: i64) -> i64 {
    match value {
        Some(v) if v > 0 => v,
        Some(v) => {
            tracing::debug!(value = v, default, "Non-positive threshold override, using default");
            default
        }
        None => default,
    }
}
