// crates/server/src/state.rs
//! Application state for the Axum server.

use std::sync::Arc;
use std::time::Instant;

use options_audit_core::OptionsAudit;
use options_audit_db::Database;

/// Shared application state accessible from all route handlers.
pub struct AppState {
    /// Server start time for uptime tracking.
    pub start_time: Instant,
    /// Read handle on the option store.
    pub db: Database,
    /// Report assembler configured with the resolved thresholds.
    pub audit: OptionsAudit,
    /// Bearer token granting admin access; `None` refuses every caller.
    pub admin_token: Option<String>,
}

impl AppState {
    /// Create a new application state wrapped in an Arc for sharing.
    pub fn new(db: Database, audit: OptionsAudit, admin_token: Option<String>) -> Arc<Self> {
        Arc::new(Self {
            start_time: Instant::now(),
            db,
            audit,
            admin_token,
        })
    }

    /// Get the server uptime in seconds.
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_app_state_new() {
        let db = Database::new_in_memory().await.expect("in-memory DB");
        let state = AppState::new(db, OptionsAudit::default(), Some("token".into()));
        assert!(state.uptime_secs() < 5);
        assert_eq!(state.admin_token.as_deref(), Some("token"));
        assert_eq!(state.audit.thresholds().top_autoload_limit, 50);
    }
}
