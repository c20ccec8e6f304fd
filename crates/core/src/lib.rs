// crates/core/src/lib.rs
//! Options size audit: thresholds, query planning, formatting and the report
//! assembler. No I/O lives here; stores and access checks are supplied by the
//! caller through the traits in [`store`].

pub mod audit;
pub mod error;
pub mod format;
pub mod planner;
pub mod store;
pub mod thresholds;
pub mod types;

pub use audit::OptionsAudit;
pub use error::*;
pub use format::{format_duration, group_digits, human_bytes, percentage};
pub use planner::{AuditPlan, RowQuery, ScalarQuery, MAX_LISTED_ROWS, TRANSIENT_PREFIXES};
pub use store::{AccessControl, OptionStore};
pub use thresholds::{ThresholdOverrides, Thresholds};
pub use types::*;
