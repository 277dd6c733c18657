//! Entry points of the business areas served by other services.
//!
//! Each handler only confirms that the caller got through the area's role
//! gate and echoes the resolved identity.

use axum::Json;
use ridepool_core::ErrorBody;

use super::model::AreaResponse;
use crate::middleware::auth::AuthUser;

fn enter(area: &str, auth_user: AuthUser) -> Json<AreaResponse> {
    Json(AreaResponse {
        success: true,
        area: area.to_string(),
        account_id: auth_user.account_id(),
        role: auth_user.role(),
    })
}

/// Bookings area (user, employee, admin)
#[utoipa::path(
    get,
    path = "/bookings",
    responses(
        (status = 200, description = "Access granted", body = AreaResponse),
        (status = 401, description = "Missing, invalid, or expired token", body = ErrorBody),
        (status = 403, description = "Role not allowed", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Areas"
)]
pub async fn bookings(auth_user: AuthUser) -> Json<AreaResponse> {
    enter("bookings", auth_user)
}

/// Vehicle area (user, admin)
#[utoipa::path(
    get,
    path = "/vehicle",
    responses(
        (status = 200, description = "Access granted", body = AreaResponse),
        (status = 401, description = "Missing, invalid, or expired token", body = ErrorBody),
        (status = 403, description = "Role not allowed", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Areas"
)]
pub async fn vehicle(auth_user: AuthUser) -> Json<AreaResponse> {
    enter("vehicle", auth_user)
}

/// Reviews area (employee, admin)
#[utoipa::path(
    get,
    path = "/reviews",
    responses(
        (status = 200, description = "Access granted", body = AreaResponse),
        (status = 401, description = "Missing, invalid, or expired token", body = ErrorBody),
        (status = 403, description = "Role not allowed", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Areas"
)]
pub async fn reviews(auth_user: AuthUser) -> Json<AreaResponse> {
    enter("reviews", auth_user)
}

/// Preferences area (user, admin)
#[utoipa::path(
    get,
    path = "/preferences",
    responses(
        (status = 200, description = "Access granted", body = AreaResponse),
        (status = 401, description = "Missing, invalid, or expired token", body = ErrorBody),
        (status = 403, description = "Role not allowed", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Areas"
)]
pub async fn preferences(auth_user: AuthUser) -> Json<AreaResponse> {
    enter("preferences", auth_user)
}
