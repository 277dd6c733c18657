//! Prometheus metrics.
//!
//! The recorder is only installed when a metrics port is configured; without
//! it every counter below is a no-op.

use std::time::{Duration, Instant};

use anyhow::Context;
use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
    routing::get,
};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use ridepool_auth::TokenKind;
use ridepool_core::Role;

/// Installs the Prometheus recorder and spawns its upkeep task.
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            &[
                0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
            ],
        )
        .context("Failed to set histogram buckets")?
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;

    let upkeep_handle = handle.clone();
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_secs(5)).await;
            upkeep_handle.run_upkeep();
        }
    });

    Ok(handle)
}

pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().as_str().to_owned();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned());

    gauge!("http_requests_active").increment(1.0);
    let response = next.run(req).await;
    gauge!("http_requests_active").decrement(1.0);

    let status = response.status().as_u16().to_string();
    counter!("http_requests_total", "method" => method.clone(), "path" => path.clone(), "status" => status)
        .increment(1);
    histogram!("http_request_duration_seconds", "method" => method, "path" => path)
        .record(start.elapsed().as_secs_f64());

    response
}

/// Router for the metrics listener.
pub fn metrics_app(handle: PrometheusHandle) -> Router {
    Router::new().route("/metrics", get(move || async move { handle.render() }))
}

pub fn track_account_registered(role: Role) {
    counter!("accounts_registered_total", "role" => role.as_str()).increment(1);
}

pub fn track_login_success(role: Role) {
    counter!("logins_total", "role" => role.as_str(), "status" => "success").increment(1);
}

/// `reason` is a fixed label such as `unknown_email` or `wrong_password`.
pub fn track_login_failure(reason: &'static str) {
    counter!("logins_total", "role" => "unknown", "status" => "failure", "reason" => reason)
        .increment(1);
}

pub fn track_token_issued(kind: TokenKind) {
    counter!("tokens_issued_total", "kind" => kind.as_str()).increment(1);
}

pub fn track_refresh(outcome: &'static str) {
    counter!("token_refreshes_total", "outcome" => outcome).increment(1);
}

pub fn track_sessions_revoked(count: usize) {
    counter!("refresh_sessions_revoked_total").increment(count as u64);
}

pub fn track_account_status_change(status: &'static str) {
    counter!("account_status_changes_total", "status" => status).increment(1);
}
