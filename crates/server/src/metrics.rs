//! Application metrics for Prometheus monitoring.
//!
//! This module provides:
//! - Prometheus metrics recorder initialization
//! - Metric definitions for audit runs
//! - Helpers for recording them
//! - Rendering for the `/metrics` endpoint

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::Duration;

/// Global Prometheus handle for rendering metrics.
static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Initialize the Prometheus metrics recorder.
///
/// This should be called once at application startup, before any metrics are recorded.
/// Returns `true` if initialization succeeded, `false` if already initialized.
pub fn init_metrics() -> bool {
    if PROMETHEUS_HANDLE.get().is_some() {
        return false;
    }

    let recorder = PrometheusBuilder::new().build_recorder();
    let handle = recorder.handle();

    if metrics::set_global_recorder(recorder).is_err() {
        tracing::warn!("Failed to set global metrics recorder (already set)");
        return false;
    }

    if PROMETHEUS_HANDLE.set(handle).is_err() {
        tracing::warn!("Failed to store Prometheus handle (already set)");
    }

    describe_metrics();

    tracing::info!("Prometheus metrics initialized");
    true
}

fn describe_metrics() {
    describe_counter!(
        "options_audit_runs_total",
        "Number of options audit requests by outcome"
    );
    describe_histogram!(
        "options_audit_duration_seconds",
        "Duration of completed options audits in seconds"
    );
}

/// Render current metrics in Prometheus text format.
///
/// Returns `None` if metrics are not initialized.
pub fn render_metrics() -> Option<String> {
    PROMETHEUS_HANDLE.get().map(|h| h.render())
}

/// How an audit request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditOutcome {
    Ok,
    Denied,
    StoreError,
}

impl AuditOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            AuditOutcome::Ok => "ok",
            AuditOutcome::Denied => "denied",
            AuditOutcome::StoreError => "store_error",
        }
    }
}

/// Record one audit request. Duration is only recorded for completed audits.
pub fn record_audit(outcome: AuditOutcome, duration: Duration) {
    counter!("options_audit_runs_total", "outcome" => outcome.as_str()).increment(1);
    if outcome == AuditOutcome::Ok {
        histogram!("options_audit_duration_seconds").record(duration.as_secs_f64());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_labels() {
        assert_eq!(AuditOutcome::Ok.as_str(), "ok");
        assert_eq!(AuditOutcome::Denied.as_str(), "denied");
        assert_eq!(AuditOutcome::StoreError.as_str(), "store_error");
    }

    #[test]
    fn test_record_audit_without_recorder() {
        // Works with or without a global recorder installed.
        record_audit(AuditOutcome::Ok, Duration::from_millis(3));
        record_audit(AuditOutcome::Denied, Duration::ZERO);
    }

    #[test]
    fn test_init_then_render() {
        init_metrics();
        record_audit(AuditOutcome::StoreError, Duration::ZERO);
        let output = render_metrics().expect("metrics initialized");
        assert!(output.contains("options_audit_runs_total"));
        assert!(!init_metrics(), "second init is a no-op");
    }
}
