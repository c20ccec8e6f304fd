// crates/server/src/lib.rs
//! Options audit server library.
//!
//! Serves the read-only options size audit as an admin HTML page, plus
//! health and Prometheus endpoints.

pub mod auth;
pub mod config;
pub mod error;
pub mod metrics;
pub mod render;
pub mod routes;
pub mod state;

pub use config::{Cli, ServerConfig};
pub use error::*;
pub use metrics::init_metrics;
pub use routes::app_routes;
pub use state::AppState;

use axum::Router;
use options_audit_core::OptionsAudit;
use options_audit_db::Database;
use tower_http::trace::TraceLayer;

/// Create the Axum application with all routes and middleware.
pub fn create_app(db: Database, config: &ServerConfig) -> Router {
    let audit = OptionsAudit::new(config.thresholds);
    let state = AppState::new(db, audit, config.admin_token.clone());

    Router::new()
        .merge(app_routes(state))
        .layer(TraceLayer::new_for_http())
}

// ============================================================================
// Integration Tests
// ============================================================================
