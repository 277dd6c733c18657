use ridepool_auth::{Identity, TokenKind, TokenPair};
use ridepool_core::password::{burn_password_check, hash_password, verify_password};
use ridepool_core::{AppError, RegistrationChannel, Role};
use ridepool_db::StoreError;
use ridepool_models::{Account, NewAccount};
use ridepool_models::auth::{LoginRequest, RegisterRequest};
use serde_json::json;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::metrics::{
    track_account_registered, track_login_failure, track_login_success, track_refresh,
    track_sessions_revoked, track_token_issued,
};
use crate::state::AppState;

pub struct AuthService;

impl AuthService {
    /// Creates an account of `role` through `channel`.
    ///
    /// Each role has exactly one channel it may be created through; a request
    /// arriving through any other channel is refused before anything is
    /// stored.
    #[instrument(skip(state, dto), fields(email = %dto.email))]
    pub async fn create_account(
        state: &AppState,
        role: Role,
        channel: RegistrationChannel,
        dto: RegisterRequest,
    ) -> Result<Account, AppError> {
        if role.registration_channel() != channel {
            warn!(role = %role, ?channel, "Registration through a channel not open to this role");
            return Err(AppError::forbidden(format!(
                "{} accounts cannot be registered here",
                role
            )));
        }

        let email_taken = state
            .accounts
            .email_taken(&dto.email)
            .await
            .map_err(StoreError::into_app_error)?;
        let pseudo_taken = state
            .accounts
            .pseudo_taken(&dto.pseudo)
            .await
            .map_err(StoreError::into_app_error)?;

        let mut taken = Vec::new();
        if email_taken {
            taken.push("email");
        }
        if pseudo_taken {
            taken.push("pseudo");
        }
        if !taken.is_empty() {
            return Err(
                AppError::conflict(format!("{} already in use", taken.join(" and ")))
                    .with_details(json!({ "fields": taken })),
            );
        }

        let password_hash =
            hash_password(dto.password, state.password_config.bcrypt_cost).await?;

        // The insert re-checks uniqueness, which catches a concurrent
        // registration that passed the checks above.
        let account = state
            .accounts
            .insert(NewAccount {
                email: dto.email,
                pseudo: dto.pseudo,
                first_name: dto.first_name,
                last_name: dto.last_name,
                password_hash,
                role,
            })
            .await
            .map_err(StoreError::into_app_error)?;

        track_account_registered(role);
        info!(account_id = %account.id, role = %role, "Account registered");
        Ok(account)
    }

    /// Self-service registration. Returns the new account and an access token
    /// for immediate login.
    pub async fn register(
        state: &AppState,
        role: Role,
        dto: RegisterRequest,
    ) -> Result<(Account, String), AppError> {
        let account =
            Self::create_account(state, role, RegistrationChannel::SelfService, dto).await?;
        let token = state
            .tokens
            .issue(account.id, account.role, TokenKind::Access)?;
        track_token_issued(TokenKind::Access);
        Ok((account, token))
    }

    #[instrument(skip(state, dto), fields(email = %dto.email))]
    pub async fn login(state: &AppState, dto: LoginRequest) -> Result<TokenPair, AppError> {
        let account = state
            .accounts
            .find_by_email(&dto.email)
            .await
            .map_err(StoreError::into_app_error)?;

        let Some(account) = account else {
            // Same bcrypt work as a real check, so a miss is not faster.
            burn_password_check(dto.password, state.password_config.bcrypt_cost).await;
            track_login_failure("unknown_email");
            return Err(AppError::invalid_credentials());
        };

        if !verify_password(dto.password, account.password_hash.clone()).await? {
            track_login_failure("wrong_password");
            return Err(AppError::invalid_credentials());
        }

        if !account.is_active() {
            track_login_failure("suspended");
            return Err(AppError::forbidden("Account suspended"));
        }

        let pair = Self::start_session(state, &account).await?;
        track_login_success(account.role);
        info!(account_id = %account.id, role = %account.role, "Login succeeded");
        Ok(pair)
    }

    async fn start_session(state: &AppState, account: &Account) -> Result<TokenPair, AppError> {
        let pair = state.tokens.issue_pair(account.id, account.role)?;
        state
            .sessions
            .activate(account.id, pair.refresh_jti.clone(), pair.refresh_expires_at)
            .await;
        track_token_issued(TokenKind::Access);
        track_token_issued(TokenKind::Refresh);
        Ok(pair)
    }

    /// Revokes every refresh session of `account_id`.
    ///
    /// Callers may only log themselves out unless their role manages
    /// accounts. Access tokens already issued remain valid until they expire.
    #[instrument(skip(state))]
    pub async fn logout(
        state: &AppState,
        caller: Identity,
        account_id: Uuid,
    ) -> Result<(), AppError> {
        if caller.subject_id != account_id && !caller.role.manages_accounts() {
            return Err(AppError::forbidden("Cannot log out another account"));
        }

        let revoked = state.sessions.revoke_all(account_id).await;
        track_sessions_revoked(revoked);
        info!(account_id = %account_id, revoked, "Logged out");
        Ok(())
    }

    /// Redeems a refresh token for a new pair. Each refresh token is
    /// redeemable once.
    #[instrument(skip_all)]
    pub async fn refresh(state: &AppState, refresh_token: &str) -> Result<TokenPair, AppError> {
        let (identity, jti) = state.tokens.verify_refresh(refresh_token)?;

        let account = state
            .accounts
            .find_by_id(identity.subject_id)
            .await
            .map_err(StoreError::into_app_error)?
            .ok_or_else(AppError::invalid_token)?;

        if !account.is_active() {
            state.sessions.revoke_all(account.id).await;
            track_refresh("suspended");
            return Err(AppError::forbidden("Account suspended"));
        }

        // Role comes from the account, so role changes apply on refresh.
        let pair = state.tokens.issue_pair(account.id, account.role)?;
        let rotated = state
            .sessions
            .rotate(
                account.id,
                &jti,
                pair.refresh_jti.clone(),
                pair.refresh_expires_at,
            )
            .await;

        if !rotated {
            warn!(account_id = %account.id, "Refresh token reused or revoked");
            track_refresh("rejected");
            return Err(AppError::invalid_token());
        }

        track_refresh("rotated");
        track_token_issued(TokenKind::Access);
        track_token_issued(TokenKind::Refresh);
        Ok(pair)
    }

    pub async fn me(state: &AppState, caller: Identity) -> Result<Account, AppError> {
        state
            .accounts
            .find_by_id(caller.subject_id)
            .await
            .map_err(StoreError::into_app_error)?
            .ok_or_else(|| AppError::not_found("Account not found"))
    }
}
