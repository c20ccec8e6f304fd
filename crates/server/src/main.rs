// crates/server/src/main.rs
//! Options audit server binary.
//!
//! Opens the option store read-only and serves the audit page until stopped.

use anyhow::{Context, Result};
use clap::Parser;
use options_audit_db::{default_db_path, Database};
use options_audit_server::{create_app, init_metrics, Cli, ServerConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,options_audit_server=info,options_audit_core=info".into()),
        )
        .compact()
        .init();

    let config = ServerConfig::from_env(Cli::parse());

    init_metrics();

    let db_path = match &config.db_path {
        Some(path) => path.clone(),
        None => default_db_path()?,
    };
    let db = Database::open_read_only(&db_path)
        .await
        .with_context(|| format!("opening option store at {}", db_path.display()))?;
    info!(path = %db.db_path().display(), "Option store opened read-only");

    if config.admin_token.is_none() {
        warn!("OPTIONS_AUDIT_ADMIN_TOKEN is not set; every audit request will be refused");
    }
    let thresholds = config.thresholds.resolve();
    info!(
        top_autoload_limit = thresholds.top_autoload_limit,
        large_option_threshold = thresholds.large_option_threshold,
        large_transient_threshold = thresholds.large_transient_threshold,
        "Audit thresholds resolved"
    );

    let app = create_app(db, &config);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("binding {}", config.addr))?;
    info!("Options audit listening on http://{}/admin/options-audit", config.addr);

    axum::serve(listener, app).await?;

    Ok(())
}
