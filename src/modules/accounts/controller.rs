use axum::Json;
use axum::extract::State;
use ridepool_core::{AppError, ErrorBody};
use ridepool_models::accounts::{
    AccountFilterParams, AccountIdPath, AccountResponse, PaginatedAccountsResponse,
    UpdateAccountStatusRequest,
};
use ridepool_models::auth::RegisterRequest;
use tracing::instrument;

use super::service::AccountService;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedPath, ValidatedQuery};

/// List accounts
#[utoipa::path(
    get,
    path = "/admin/accounts",
    params(AccountFilterParams),
    responses(
        (status = 200, description = "One page of accounts, newest first", body = PaginatedAccountsResponse),
        (status = 401, description = "Missing, invalid, or expired token", body = ErrorBody),
        (status = 403, description = "Administrator role required", body = ErrorBody),
        (status = 422, description = "Invalid query parameters", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Accounts"
)]
#[instrument(skip(state))]
pub async fn list_accounts(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<AccountFilterParams>,
) -> Result<Json<PaginatedAccountsResponse>, AppError> {
    let (accounts, meta) = AccountService::list(&state, params.into()).await?;
    Ok(Json(PaginatedAccountsResponse {
        success: true,
        data: accounts.iter().map(|account| account.profile()).collect(),
        meta,
    }))
}

/// Create an employee account
#[utoipa::path(
    post,
    path = "/admin/employees",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Employee account created", body = AccountResponse),
        (status = 401, description = "Missing, invalid, or expired token", body = ErrorBody),
        (status = 403, description = "Administrator role required", body = ErrorBody),
        (status = 409, description = "Email or pseudo already in use", body = ErrorBody),
        (status = 422, description = "Validation failed", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Accounts"
)]
#[instrument(skip(state, dto))]
pub async fn create_employee(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequest>,
) -> Result<Json<AccountResponse>, AppError> {
    let account = AccountService::create_employee(&state, dto).await?;
    Ok(Json(AccountResponse {
        success: true,
        account: account.profile(),
    }))
}

/// Suspend or reactivate an account
#[utoipa::path(
    patch,
    path = "/admin/accounts/{id}/status",
    params(AccountIdPath),
    request_body = UpdateAccountStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = AccountResponse),
        (status = 401, description = "Missing, invalid, or expired token", body = ErrorBody),
        (status = 403, description = "Administrator role required, or self-suspension", body = ErrorBody),
        (status = 404, description = "Account not found", body = ErrorBody),
        (status = 422, description = "Validation failed", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Accounts"
)]
#[instrument(skip(state))]
pub async fn update_account_status(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedPath(path): ValidatedPath<AccountIdPath>,
    ValidatedJson(dto): ValidatedJson<UpdateAccountStatusRequest>,
) -> Result<Json<AccountResponse>, AppError> {
    let account = AccountService::set_status(&state, auth_user.0, path.id, dto.status).await?;
    Ok(Json(AccountResponse {
        success: true,
        account: account.profile(),
    }))
}
