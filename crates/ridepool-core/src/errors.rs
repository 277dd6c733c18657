//! Application error type and the uniform error body.
//!
//! Every failure raised while handling a request (token extraction, token
//! verification, authorization, validation, business logic, persistence) is
//! expressed as an [`AppError`]. Converting it into a response renders the
//! client-facing [`ErrorBody`] and attaches an [`ErrorReport`] extension that
//! the error normalizer middleware uses to log the failure and, outside
//! production, to enrich the body with `details`.
//!
//! # Error kinds
//!
//! | Kind | Status | Operational |
//! |------|--------|-------------|
//! | `MissingToken` | 401 | yes |
//! | `InvalidToken` | 401 | yes |
//! | `ExpiredToken` | 401 | yes |
//! | `InvalidCredentials` | 401 | yes |
//! | `Forbidden` | 403 | yes |
//! | `NotFound` | 404 | yes |
//! | `Conflict` | 409 | yes |
//! | `BadRequest` | 400 | yes |
//! | `PayloadTooLarge` | 413 | yes |
//! | `ValidationError` | 422 | yes |
//! | `UnexpectedError` | 500 | no |

use std::fmt;
use std::sync::Arc;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use utoipa::ToSchema;

/// Message returned to clients for every unexpected failure.
pub const GENERIC_ERROR_MESSAGE: &str = "Internal server error";

/// Classification of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
pub enum ErrorKind {
    MissingToken,
    InvalidToken,
    ExpiredToken,
    Forbidden,
    ValidationError,
    InvalidCredentials,
    NotFound,
    Conflict,
    BadRequest,
    PayloadTooLarge,
    UnexpectedError,
}

impl ErrorKind {
    pub fn status(self) -> StatusCode {
        match self {
            Self::MissingToken
            | Self::InvalidToken
            | Self::ExpiredToken
            | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::ValidationError => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Conflict => StatusCode::CONFLICT,
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::UnexpectedError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::MissingToken => "MissingToken",
            Self::InvalidToken => "InvalidToken",
            Self::ExpiredToken => "ExpiredToken",
            Self::Forbidden => "Forbidden",
            Self::ValidationError => "ValidationError",
            Self::InvalidCredentials => "InvalidCredentials",
            Self::NotFound => "NotFound",
            Self::Conflict => "Conflict",
            Self::BadRequest => "BadRequest",
            Self::PayloadTooLarge => "PayloadTooLarge",
            Self::UnexpectedError => "UnexpectedError",
        }
    }

    /// Operational failures are anticipated and surfaced verbatim to clients.
    pub fn is_operational(self) -> bool {
        !matches!(self, Self::UnexpectedError)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single constraint violation reported by the validation gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldViolation {
    /// Part of the request the field was read from (`body`, `query`, `params`)
    pub location: String,
    /// Field path, dotted for nested values (`address.city`, `stops[1].name`)
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(
        location: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            location: location.into(),
            field: field.into(),
            message: message.into(),
        }
    }
}

/// The failure type returned by every stage of the request pipeline.
#[derive(Debug)]
pub struct AppError {
    kind: ErrorKind,
    message: String,
    details: Option<Value>,
    source: Option<anyhow::Error>,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
            source: None,
        }
    }

    pub fn missing_token() -> Self {
        Self::new(ErrorKind::MissingToken, "Missing authorization token")
    }

    pub fn invalid_token() -> Self {
        Self::new(ErrorKind::InvalidToken, "Invalid token")
    }

    pub fn expired_token() -> Self {
        Self::new(ErrorKind::ExpiredToken, "Token expired")
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Forbidden, message)
    }

    /// Wraps every violation found on a request part into one error.
    ///
    /// The message lists each violation so that the full report survives even
    /// when `details` are stripped in production.
    pub fn validation(violations: Vec<FieldViolation>) -> Self {
        let message = if violations.is_empty() {
            "Validation failed".to_string()
        } else {
            violations
                .iter()
                .map(|v| v.message.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };

        Self::new(ErrorKind::ValidationError, message).with_details(json!(violations))
    }

    /// Identical for unknown accounts and wrong passwords.
    pub fn invalid_credentials() -> Self {
        Self::new(ErrorKind::InvalidCredentials, "Invalid email or password")
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::BadRequest, message)
    }

    pub fn payload_too_large() -> Self {
        Self::new(ErrorKind::PayloadTooLarge, "Request body exceeds the size limit")
    }

    /// An unexpected failure. The cause is kept for logging only; clients
    /// receive [`GENERIC_ERROR_MESSAGE`].
    pub fn internal<E>(err: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        Self {
            kind: ErrorKind::UnexpectedError,
            message: GENERIC_ERROR_MESSAGE.to_string(),
            details: None,
            source: Some(err.into()),
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn status(&self) -> StatusCode {
        self.kind.status()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    pub fn source(&self) -> Option<&anyhow::Error> {
        self.source.as_ref()
    }

    pub fn is_operational(&self) -> bool {
        self.kind.is_operational()
    }

    fn into_report(self) -> ErrorReport {
        ErrorReport {
            kind: self.kind,
            status: self.kind.status(),
            message: self.message,
            details: self.details,
            cause: self.source.map(Arc::new),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(source) => write!(f, "{}: {}: {:#}", self.kind, self.message, source),
            None => write!(f, "{}: {}", self.kind, self.message),
        }
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}

/// Everything the error normalizer needs to finalize a failed response.
///
/// Attached to the response extensions by [`AppError::into_response`].
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub kind: ErrorKind,
    pub status: StatusCode,
    pub message: String,
    pub details: Option<Value>,
    pub cause: Option<Arc<anyhow::Error>>,
}

impl ErrorReport {
    /// Debug details exposed outside production: the declared details, or the
    /// cause chain for unexpected failures.
    pub fn debug_details(&self) -> Option<Value> {
        match (&self.details, &self.cause) {
            (Some(details), _) => Some(details.clone()),
            (None, Some(cause)) => Some(json!({
                "cause": format!("{:#}", cause),
                "chain": cause.chain().map(|e| e.to_string()).collect::<Vec<_>>(),
            })),
            (None, None) => None,
        }
    }
}

/// Uniform JSON body of every failed request.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    #[schema(example = false)]
    pub success: bool,
    #[schema(example = 401)]
    pub status_code: u16,
    #[schema(example = "Unauthorized")]
    pub status_text: String,
    #[schema(example = "Invalid email or password")]
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<Value>,
}

impl ErrorBody {
    pub fn new(status: StatusCode, message: impl Into<String>, details: Option<Value>) -> Self {
        Self {
            success: false,
            status_code: status.as_u16(),
            status_text: status_text(status),
            message: message.into(),
            details,
        }
    }

    /// Body for a failed response that carries no report, such as the
    /// router's own 405 responses.
    pub fn for_status(status: StatusCode) -> Self {
        let message = if status.is_server_error() {
            GENERIC_ERROR_MESSAGE.to_string()
        } else {
            status_text(status)
        };
        Self::new(status, message, None)
    }

    pub fn from_report(report: &ErrorReport, include_details: bool) -> Self {
        let details = if include_details {
            report.debug_details()
        } else {
            None
        };
        Self::new(report.status, report.message.clone(), details)
    }
}

impl IntoResponse for ErrorBody {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

pub fn status_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("Unknown Status")
        .to_string()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let report = self.into_report();
        let mut response = ErrorBody::from_report(&report, false).into_response();
        response.extensions_mut().insert(report);
        response
    }
}
