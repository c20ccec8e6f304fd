//! End-to-end tests for the audit page over HTTP.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use options_audit_db::Database;
use options_audit_server::{create_app, init_metrics, Cli, ServerConfig};
use tower::ServiceExt;

const TOKEN: &str = "test-admin-token";

fn config(extra: &[(&str, &str)]) -> ServerConfig {
    let mut vars: Vec<(String, String)> = vec![("OPTIONS_AUDIT_ADMIN_TOKEN".into(), TOKEN.into())];
    vars.extend(extra.iter().map(|(k, v)| (k.to_string(), v.to_string())));
    ServerConfig::resolve(Cli::default(), move |key| {
        vars.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
    })
}

async fn seeded_db() -> Database {
    let db = Database::new_in_memory().await.unwrap();
    db.upsert_option("siteurl", b"https://example.org", true)
        .await
        .unwrap();
    db.upsert_option("rewrite_rules", &vec![b'r'; 60_000], true)
        .await
        .unwrap();
    db.upsert_option("_transient_feed_<b>", &vec![b't'; 25_000], false)
        .await
        .unwrap();
    db
}

async fn request(app: Router, uri: &str, token: Option<&str>) -> (StatusCode, String) {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let response = app
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn admin_sees_full_report() {
    let app = create_app(seeded_db().await, &config(&[]));
    let (status, body) = request(app, "/admin/options-audit", Some(TOKEN)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Options size audit"));
    assert!(body.contains("<code>rewrite_rules</code>"));
    assert!(body.contains("58.6 KB"));
    assert!(body.contains("2 (67%)"), "2 of 3 options autoloaded: {body}");
    assert!(body.contains("_transient_feed_&lt;b&gt;"));
    assert!(!body.contains("_transient_feed_<b>"));
}

#[tokio::test]
async fn wrong_token_is_refused() {
    let app = create_app(seeded_db().await, &config(&[]));
    let (status, body) = request(app, "/admin/options-audit", Some("guess")).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(!body.contains("rewrite_rules"));
}

#[tokio::test]
async fn missing_token_is_refused() {
    let app = create_app(seeded_db().await, &config(&[]));
    let (status, _) = request(app, "/admin/options-audit", None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn store_failure_shows_could_not_complete() {
    let db = seeded_db().await;
    db.pool().close().await;
    let app = create_app(db, &config(&[]));
    let (status, body) = request(app, "/admin/options-audit", Some(TOKEN)).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body.contains("Could not complete the options audit."));
    assert!(!body.contains("Summary"));
}

#[tokio::test]
async fn threshold_overrides_reach_the_page() {
    let app = create_app(
        seeded_db().await,
        &config(&[
            ("OPTIONS_AUDIT_TOP_AUTOLOAD_LIMIT", "1"),
            ("OPTIONS_AUDIT_LARGE_TRANSIENT_THRESHOLD", "30000"),
        ]),
    );
    let (status, body) = request(app, "/admin/options-audit", Some(TOKEN)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Largest autoloaded options (top 1)"));
    assert!(!body.contains("<code>siteurl</code>"));
    assert!(body.contains("No transients above the threshold."));
}

#[tokio::test]
async fn metrics_endpoint_reports_audit_runs() {
    init_metrics();
    let app = create_app(seeded_db().await, &config(&[]));
    let (status, _) = request(app.clone(), "/admin/options-audit", Some(TOKEN)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = request(app, "/metrics", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("options_audit_runs_total"));
}
