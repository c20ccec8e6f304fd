// crates/core/src/audit.rs
//! Report assembler: access check → plan → six query groups → `AuditResult`.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::error::AuditError;
use crate::format::format_duration;
use crate::planner::{AuditPlan, RowQuery, ScalarQuery};
use crate::store::{AccessControl, OptionStore};
use crate::thresholds::Thresholds;
use crate::types::{AuditResult, OptionRow};

/// Runs the options size audit with a fixed set of thresholds.
///
/// Holds no state between runs; every call reads the store again.
#[derive(Debug, Clone, Copy, Default)]
pub struct OptionsAudit {
    thresholds: Thresholds,
}

impl OptionsAudit {
    pub fn new(thresholds: impl Into<Thresholds>) -> Self {
        Self {
            thresholds: thresholds.into(),
        }
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Run the audit for `caller` against `store`.
    ///
    /// The access check happens before any query is issued. Query groups run
    /// sequentially and the first failure aborts the run; no partial result
    /// is ever returned.
    pub async fn run<C, S>(&self, caller: &C, store: &S) -> Result<AuditResult, AuditError>
    where
        C: AccessControl + ?Sized,
        S: OptionStore + ?Sized,
    {
        if !caller.is_admin() {
            warn!("Options audit refused: caller lacks administrative privilege");
            return Err(AuditError::PermissionDenied);
        }

        let start = Instant::now();
        let plan = AuditPlan::new(&self.thresholds);

        let total = scalar(store, plan.total).await?;
        let autoload_count = scalar(store, plan.autoload_count).await?;
        let autoload_bytes = scalar(store, plan.autoload_bytes).await?;
        let top_autoload = rows(store, &plan.top_autoload).await?;
        let large_options = rows(store, &plan.large_options).await?;
        let large_transients = rows(store, &plan.large_transients).await?;

        info!(
            total,
            autoload_count,
            autoload_bytes,
            top_autoload = top_autoload.len(),
            large_options = large_options.len(),
            large_transients = large_transients.len(),
            elapsed = %format_duration(start.elapsed()),
            "Options audit complete"
        );

        Ok(AuditResult {
            thresholds: self.thresholds,
            total,
            autoload_count,
            autoload_bytes,
            top_autoload,
            large_options,
            large_transients,
        })
    }
}

async fn scalar<S: OptionStore + ?Sized>(store: &S, query: ScalarQuery) -> Result<i64, AuditError> {
    let value = store
        .scalar(&query)
        .await
        .map_err(|e| AuditError::store(query.label(), e))?;
    debug!(query = query.label(), value, "Scalar query done");
    Ok(value)
}

async fn rows<S: OptionStore + ?Sized>(
    store: &S,
    query: &RowQuery,
) -> Result<Vec<OptionRow>, AuditError> {
    let rows = store
        .rows(query)
        .await
        .map_err(|e| AuditError::store(query.label, e))?;
    debug!(query = query.label, rows = rows.len(), "Row query done");
    Ok(rows)
}
