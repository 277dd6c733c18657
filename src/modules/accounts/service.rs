use ridepool_auth::Identity;
use ridepool_core::{AppError, PaginationMeta, RegistrationChannel, Role};
use ridepool_db::StoreError;
use ridepool_models::auth::RegisterRequest;
use ridepool_models::{Account, AccountFilter, AccountStatus};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::metrics::{track_account_status_change, track_sessions_revoked};
use crate::modules::auth::service::AuthService;
use crate::state::AppState;

pub struct AccountService;

impl AccountService {
    #[instrument(skip(state))]
    pub async fn list(
        state: &AppState,
        filter: AccountFilter,
    ) -> Result<(Vec<Account>, PaginationMeta), AppError> {
        let (accounts, total) = state
            .accounts
            .list(&filter)
            .await
            .map_err(StoreError::into_app_error)?;
        Ok((
            accounts,
            PaginationMeta::new(total, filter.limit, filter.offset),
        ))
    }

    pub async fn create_employee(
        state: &AppState,
        dto: RegisterRequest,
    ) -> Result<Account, AppError> {
        AuthService::create_account(state, Role::Employee, RegistrationChannel::AdminConsole, dto)
            .await
    }

    /// Suspends or reactivates an account. Suspension also revokes the
    /// account's refresh sessions.
    #[instrument(skip(state))]
    pub async fn set_status(
        state: &AppState,
        actor: Identity,
        account_id: Uuid,
        status: AccountStatus,
    ) -> Result<Account, AppError> {
        if actor.subject_id == account_id && status == AccountStatus::Suspended {
            return Err(AppError::forbidden("Cannot suspend your own account"));
        }

        let account = state
            .accounts
            .set_status(account_id, status)
            .await
            .map_err(StoreError::into_app_error)?
            .ok_or_else(|| AppError::not_found("Account not found"))?;

        if status == AccountStatus::Suspended {
            let revoked = state.sessions.revoke_all(account_id).await;
            track_sessions_revoked(revoked);
        }

        track_account_status_change(status.as_str());
        info!(account_id = %account_id, status = %status, by = %actor.subject_id, "Account status changed");
        Ok(account)
    }
}
