// crates/server/src/routes/audit.rs
//! The options audit admin page.
//!
//! - GET /admin/options-audit - run the audit and render it as HTML

use std::sync::Arc;
use std::time::Instant;

use axum::{extract::State, response::Html, routing::get, Router};
use options_audit_core::AuditError;

use crate::auth::AdminCaller;
use crate::error::ApiResult;
use crate::metrics::{record_audit, AuditOutcome};
use crate::render::audit_page;
use crate::state::AppState;

/// GET /admin/options-audit - Run the audit for the calling admin.
///
/// 403 without admin privilege (no query is issued), 503 when any query
/// group fails.
pub async fn options_audit(
    State(state): State<Arc<AppState>>,
    caller: AdminCaller,
) -> ApiResult<Html<String>> {
    let start = Instant::now();
    let result = state.audit.run(&caller, &state.db).await;

    let outcome = match &result {
        Ok(_) => AuditOutcome::Ok,
        Err(AuditError::PermissionDenied) => AuditOutcome::Denied,
        Err(AuditError::StoreUnavailable { .. }) => AuditOutcome::StoreError,
    };
    record_audit(outcome, start.elapsed());

    Ok(Html(audit_page(&result?)))
}

/// Create the audit routes router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/options-audit", get(options_audit))
}
