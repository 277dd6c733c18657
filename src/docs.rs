use ridepool_core::{ErrorBody, ErrorKind, FieldViolation, PaginationMeta, Role};
use ridepool_models::accounts::{
    AccountFilterParams, AccountProfile, AccountResponse, AccountStatus,
    PaginatedAccountsResponse, UpdateAccountStatusRequest,
};
use ridepool_models::auth::{
    LoginRequest, LogoutRequest, MessageResponse, ProfileResponse, RefreshRequest,
    RegisterRequest, RegisterResponse, SessionResponse, TokenPairResponse,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::areas::model::AreaResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::refresh,
        crate::modules::auth::controller::logout,
        crate::modules::auth::controller::me,
        crate::modules::auth::controller::session,
        crate::modules::accounts::controller::list_accounts,
        crate::modules::accounts::controller::create_employee,
        crate::modules::accounts::controller::update_account_status,
        crate::modules::areas::controller::bookings,
        crate::modules::areas::controller::vehicle,
        crate::modules::areas::controller::reviews,
        crate::modules::areas::controller::preferences,
    ),
    components(
        schemas(
            Role,
            AccountStatus,
            AccountProfile,
            AccountResponse,
            AccountFilterParams,
            PaginatedAccountsResponse,
            UpdateAccountStatusRequest,
            PaginationMeta,
            RegisterRequest,
            RegisterResponse,
            LoginRequest,
            TokenPairResponse,
            RefreshRequest,
            LogoutRequest,
            MessageResponse,
            ProfileResponse,
            SessionResponse,
            AreaResponse,
            ErrorBody,
            ErrorKind,
            FieldViolation,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login, token refresh and logout"),
        (name = "Accounts", description = "Account administration (admin only)"),
        (name = "Areas", description = "Role-gated entry points of the business areas")
    ),
    info(
        title = "Ridepool API",
        version = "0.1.0",
        description = "Carpooling back end: accounts, JWT authentication and role-based access.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
