//! Authentication middleware and identity extractors.
//!
//! [`require_auth`] and [`optional_auth`] read `Authorization: Bearer <token>`,
//! verify it as an access token, and attach the resolved [`Identity`] to the
//! request extensions. Downstream stages read that identity through
//! [`AuthUser`] or [`MaybeAuthUser`] without parsing the token again.

use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, request::Parts},
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};
use ridepool_auth::{Identity, TokenKind};
use ridepool_core::{AppError, Role};
use tracing::debug;
use uuid::Uuid;

use crate::state::AppState;

/// Returns the bearer token, or `None` when the header is absent, uses
/// another scheme, or carries an empty token.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .typed_get::<Authorization<Bearer>>()
        .map(|auth| auth.token().trim().to_string())
        .filter(|token| !token.is_empty())
}

fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<Identity, AppError> {
    let token = bearer_token(headers).ok_or_else(AppError::missing_token)?;
    state.tokens.verify(&token, TokenKind::Access)
}

/// Rejects the request unless it carries a valid access token.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let identity = authenticate(&state, req.headers())?;
    req.extensions_mut().insert(identity);
    Ok(next.run(req).await)
}

/// Attaches an identity when a valid access token is present and otherwise
/// lets the request through anonymously.
pub async fn optional_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    match authenticate(&state, req.headers()) {
        Ok(identity) => {
            req.extensions_mut().insert(identity);
        }
        Err(err) => {
            debug!(kind = %err.kind(), "Continuing without identity");
        }
    }
    next.run(req).await
}

/// The identity attached by [`require_auth`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser(pub Identity);

impl AuthUser {
    pub fn account_id(&self) -> Uuid {
        self.0.subject_id
    }

    pub fn role(&self) -> Role {
        self.0.role
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .copied()
            .map(AuthUser)
            .ok_or_else(AppError::missing_token)
    }
}

/// The identity attached by [`optional_auth`], if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaybeAuthUser(pub Option<Identity>);

impl MaybeAuthUser {
    /// Anonymous callers resolve to [`Role::User`].
    pub fn role(&self) -> Role {
        self.0.map(|identity| identity.role).unwrap_or_default()
    }
}

impl<S> FromRequestParts<S> for MaybeAuthUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeAuthUser(parts.extensions.get::<Identity>().copied()))
    }
}
