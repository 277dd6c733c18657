use axum::Json;
use axum::extract::State;
use ridepool_auth::TokenPair;
use ridepool_core::{AppError, ErrorBody, Role};
use ridepool_models::auth::{
    LoginRequest, LogoutRequest, MessageResponse, ProfileResponse, RefreshRequest,
    RegisterRequest, RegisterResponse, SessionResponse, TokenPairResponse,
};
use tracing::instrument;

use super::service::AuthService;
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::state::AppState;
use crate::validator::ValidatedJson;

fn token_pair_response(pair: TokenPair) -> TokenPairResponse {
    TokenPairResponse {
        success: true,
        access_token: pair.access_token,
        refresh_token: pair.refresh_token,
        expires_in: pair.expires_in,
        token_type: "Bearer".to_string(),
    }
}

/// Register a rider account
#[utoipa::path(
    post,
    path = "/auth/user/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Account created, access token issued", body = RegisterResponse),
        (status = 409, description = "Email or pseudo already in use", body = ErrorBody),
        (status = 422, description = "Validation failed", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn register_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequest>,
) -> Result<Json<RegisterResponse>, AppError> {
    let (_, token) = AuthService::register(&state, Role::User, dto).await?;
    Ok(Json(RegisterResponse {
        success: true,
        token,
    }))
}

/// Log in with email and password
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenPairResponse),
        (status = 401, description = "Invalid email or password", body = ErrorBody),
        (status = 403, description = "Account suspended", body = ErrorBody),
        (status = 422, description = "Validation failed", body = ErrorBody)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<TokenPairResponse>, AppError> {
    let pair = AuthService::login(&state, dto).await?;
    Ok(Json(token_pair_response(pair)))
}

/// Exchange a refresh token for a new token pair
#[utoipa::path(
    post,
    path = "/auth/refresh",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "New token pair issued", body = TokenPairResponse),
        (status = 401, description = "Refresh token invalid, expired, or already used", body = ErrorBody),
        (status = 403, description = "Account suspended", body = ErrorBody),
        (status = 422, description = "Validation failed", body = ErrorBody)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn refresh(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RefreshRequest>,
) -> Result<Json<TokenPairResponse>, AppError> {
    let pair = AuthService::refresh(&state, &dto.refresh_token).await?;
    Ok(Json(token_pair_response(pair)))
}

/// Revoke the refresh sessions of an account
#[utoipa::path(
    post,
    path = "/auth/logout",
    request_body = LogoutRequest,
    responses(
        (status = 200, description = "Logged out", body = MessageResponse),
        (status = 401, description = "Missing, invalid, or expired token", body = ErrorBody),
        (status = 403, description = "Cannot log out another account", body = ErrorBody),
        (status = 422, description = "Validation failed", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip(state))]
pub async fn logout(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<LogoutRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    AuthService::logout(&state, auth_user.0, dto.account_id).await?;
    Ok(Json(MessageResponse::new("Logged out")))
}

/// Current account profile
#[utoipa::path(
    get,
    path = "/auth/me",
    responses(
        (status = 200, description = "Current account", body = ProfileResponse),
        (status = 401, description = "Missing, invalid, or expired token", body = ErrorBody),
        (status = 404, description = "Account no longer exists", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip(state))]
pub async fn me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<ProfileResponse>, AppError> {
    let account = AuthService::me(&state, auth_user.0).await?;
    Ok(Json(ProfileResponse {
        success: true,
        account: account.profile(),
    }))
}

/// Describe the caller, authenticated or not
#[utoipa::path(
    get,
    path = "/auth/session",
    responses(
        (status = 200, description = "Caller identity; anonymous callers resolve to the user role", body = SessionResponse)
    ),
    tag = "Authentication"
)]
pub async fn session(caller: MaybeAuthUser) -> Json<SessionResponse> {
    Json(SessionResponse {
        success: true,
        authenticated: caller.0.is_some(),
        account_id: caller.0.map(|identity| identity.subject_id),
        role: caller.role(),
    })
}
