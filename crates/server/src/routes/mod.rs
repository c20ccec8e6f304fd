//! Route handlers for the options audit server.

pub mod audit;
pub mod health;
pub mod metrics;

use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

/// Create the combined router.
///
/// Routes:
/// - GET /admin/options-audit - Options size audit page (admin only)
/// - GET /api/health - Health check
/// - GET /metrics - Prometheus metrics
pub fn app_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/admin", audit::router())
        .nest("/api", health::router())
        .merge(metrics::router())
        .with_state(state)
}
