//! Validation gate.
//!
//! `ValidatedJson`, `ValidatedQuery` and `ValidatedPath` deserialize one part
//! of the request into a schema type and run every declared rule on it before
//! the handler sees the value. Deserialization drops undeclared fields, so a
//! handler only ever receives the sanitized, typed payload.
//!
//! All violations are collected in one pass and reported together as a
//! single `ValidationError` (422).

use axum::{
    Json,
    extract::{
        FromRequest, FromRequestParts, Path, Query, Request,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{StatusCode, request::Parts},
};
use ridepool_core::{AppError, FieldViolation};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

const BODY: &str = "body";
const QUERY: &str = "query";
const PARAMS: &str = "params";

fn describe(path: &str, error: &ValidationError) -> String {
    match &error.message {
        Some(message) => format!("{} {}", path, message),
        None => format!("{} is invalid", path),
    }
}

fn collect(
    errors: &ValidationErrors,
    prefix: Option<&str>,
    location: &str,
    out: &mut Vec<FieldViolation>,
) {
    for (field, kind) in errors.errors() {
        let path = match prefix {
            Some(prefix) => format!("{}.{}", prefix, field),
            None => field.to_string(),
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                out.extend(
                    field_errors
                        .iter()
                        .map(|error| FieldViolation::new(location, &path, describe(&path, error))),
                );
            }
            ValidationErrorsKind::Struct(nested) => collect(nested, Some(&path), location, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    let item_path = format!("{}[{}]", path, index);
                    collect(nested, Some(&item_path), location, out);
                }
            }
        }
    }
}

/// Flattens validator output into one violation per failed rule, sorted by
/// field path.
pub fn violations(errors: &ValidationErrors, location: &str) -> Vec<FieldViolation> {
    let mut out = Vec::new();
    collect(errors, None, location, &mut out);
    out.sort_by(|a, b| a.field.cmp(&b.field));
    out
}

fn validate<T: Validate>(value: &T, location: &str) -> Result<(), AppError> {
    value
        .validate()
        .map_err(|errors| AppError::validation(violations(&errors, location)))
}

fn unparseable(location: &str, field: &str, message: impl Into<String>) -> AppError {
    AppError::validation(vec![FieldViolation::new(location, field, message)])
}

fn json_rejection(rejection: JsonRejection) -> AppError {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => unparseable(
            BODY,
            BODY,
            "Missing 'Content-Type: application/json' header",
        ),
        JsonRejection::JsonSyntaxError(_) => unparseable(BODY, BODY, "body must be valid JSON"),
        JsonRejection::JsonDataError(err) => {
            let text = err.body_text();
            if let Some(field) = text
                .split("missing field `")
                .nth(1)
                .and_then(|s| s.split('`').next())
            {
                return unparseable(BODY, field, format!("{} is required", field));
            }
            if text.contains("invalid type") || text.contains("unknown variant") {
                return unparseable(BODY, BODY, "Invalid field type in request");
            }
            unparseable(BODY, BODY, "Invalid request body")
        }
        // The body was never read in full, so nothing was validated.
        JsonRejection::BytesRejection(rejection) => {
            if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                AppError::payload_too_large()
            } else {
                AppError::bad_request(rejection.body_text())
            }
        }
        other => unparseable(BODY, BODY, other.body_text()),
    }
}

/// JSON body extractor that runs the schema's rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(json_rejection)?;

        validate(&value, BODY)?;
        Ok(ValidatedJson(value))
    }
}

/// Query string extractor that runs the schema's rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection: QueryRejection| {
                unparseable(QUERY, QUERY, rejection.body_text())
            })?;

        validate(&value, QUERY)?;
        Ok(ValidatedQuery(value))
    }
}

/// Path parameter extractor that runs the schema's rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedPath<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection: PathRejection| {
                unparseable(PARAMS, PARAMS, rejection.body_text())
            })?;

        validate(&value, PARAMS)?;
        Ok(ValidatedPath(value))
    }
}
