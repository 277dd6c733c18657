//! Error normalizer.
//!
//! The last stage every failed response passes through. It writes the one log
//! record of the failure and settles the final body: `details` only outside
//! production, and the uniform shape even for responses the router produced
//! on its own (unknown routes, wrong methods, oversized bodies).

use std::any::Any;

use anyhow::anyhow;
use axum::{
    extract::{MatchedPath, Request, State},
    http::{
        Method,
        header::{CONTENT_LENGTH, CONTENT_TYPE},
    },
    middleware::Next,
    response::{IntoResponse, Response},
};
use ridepool_config::AppEnvironment;
use ridepool_core::{AppError, ErrorBody, ErrorReport};
use tracing::{error, warn};

fn log_report(report: &ErrorReport, method: &Method, path: &str, include_details: bool) {
    let status = report.status.as_u16();
    if report.kind.is_operational() {
        warn!(
            kind = %report.kind,
            status,
            method = %method,
            path = %path,
            message = %report.message,
            "Request failed"
        );
        return;
    }

    match (&report.cause, include_details) {
        (Some(cause), true) => error!(
            kind = %report.kind,
            status,
            method = %method,
            path = %path,
            cause = ?cause,
            "Unexpected failure"
        ),
        _ => error!(
            kind = %report.kind,
            status,
            method = %method,
            path = %path,
            "Unexpected failure"
        ),
    }
}

/// Finalizes every 4xx/5xx response.
pub async fn normalize_errors(
    State(environment): State<AppEnvironment>,
    req: Request,
    next: Next,
) -> Response {
    let method = req.method().clone();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    let response = next.run(req).await;
    let status = response.status();
    if !status.is_client_error() && !status.is_server_error() {
        return response;
    }

    let include_details = !environment.is_production();
    let (mut parts, _) = response.into_parts();

    let body = match parts.extensions.remove::<ErrorReport>() {
        Some(report) => {
            log_report(&report, &method, &path, include_details);
            ErrorBody::from_report(&report, include_details)
        }
        None => {
            let body = ErrorBody::for_status(status);
            if status.is_server_error() {
                error!(status = status.as_u16(), method = %method, path = %path, "Unexpected failure");
            } else {
                warn!(
                    status = status.as_u16(),
                    method = %method,
                    path = %path,
                    message = %body.message,
                    "Request failed"
                );
            }
            body
        }
    };

    let mut normalized = body.into_response();
    for (name, value) in parts.headers.iter() {
        if name != CONTENT_TYPE && name != CONTENT_LENGTH {
            normalized.headers_mut().append(name.clone(), value.clone());
        }
    }
    normalized
}

/// Panic handler for `CatchPanicLayer`.
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    AppError::internal(anyhow!("handler panicked: {}", detail)).into_response()
}

/// Router fallback for unknown routes.
pub async fn fallback() -> AppError {
    AppError::not_found("Route not found")
}
