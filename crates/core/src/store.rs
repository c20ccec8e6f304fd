// crates/core/src/store.rs
//! Collaborator seams for the audit: the option store and the access check.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::planner::{RowQuery, ScalarQuery};
use crate::types::OptionRow;

/// Read-only access to the option table.
///
/// Implementations:
/// - `options_audit_db::Database`: SQLite via sqlx
#[async_trait]
pub trait OptionStore: Send + Sync {
    /// Run a single-value aggregate.
    async fn scalar(&self, query: &ScalarQuery) -> Result<i64, StoreError>;

    /// Run a filtered listing. Rows come back ordered by size descending,
    /// then name ascending, at most `query.limit` of them.
    async fn rows(&self, query: &RowQuery) -> Result<Vec<OptionRow>, StoreError>;
}

/// Decides whether the current caller may run the audit.
pub trait AccessControl {
    fn is_admin(&self) -> bool;
}

impl AccessControl for bool {
    fn is_admin(&self) -> bool {
        *self
    }
}
