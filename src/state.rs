use std::fmt;
use std::sync::Arc;

use anyhow::Context;
use ridepool_auth::{SessionRegistry, TokenCodec};
use ridepool_config::{AppEnvironment, CorsConfig, JwtConfig, PasswordConfig, StorageConfig};
use ridepool_db::{AccountStore, MemoryAccountStore, PgAccountStore, init_db_pool, run_migrations};
use tracing::{info, warn};

/// Shared handles injected into every handler and middleware.
///
/// Everything here is either immutable or internally synchronized, so cloning
/// the state per request is cheap.
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<dyn AccountStore>,
    pub tokens: Arc<TokenCodec>,
    pub sessions: SessionRegistry,
    pub environment: AppEnvironment,
    pub password_config: PasswordConfig,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(
        accounts: Arc<dyn AccountStore>,
        jwt_config: &JwtConfig,
        environment: AppEnvironment,
        password_config: PasswordConfig,
        cors_config: CorsConfig,
    ) -> Self {
        Self {
            accounts,
            tokens: Arc::new(TokenCodec::new(jwt_config)),
            sessions: SessionRegistry::new(),
            environment,
            password_config,
            cors_config,
        }
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("tokens", &self.tokens)
            .field("environment", &self.environment)
            .field("password_config", &self.password_config)
            .field("cors_config", &self.cors_config)
            .finish_non_exhaustive()
    }
}

/// Builds the state from the environment, connecting to the configured store.
pub async fn init_app_state() -> anyhow::Result<AppState> {
    let environment = AppEnvironment::from_env();
    let jwt_config = JwtConfig::from_env();
    jwt_config
        .validate(environment)
        .context("Invalid JWT configuration")?;

    let accounts: Arc<dyn AccountStore> = match StorageConfig::from_env()? {
        StorageConfig::Postgres {
            url,
            max_connections,
        } => {
            let pool = init_db_pool(&url, max_connections)
                .await
                .context("Failed to connect to database")?;
            run_migrations(&pool)
                .await
                .context("Failed to run migrations")?;
            Arc::new(PgAccountStore::new(pool))
        }
        StorageConfig::Memory => {
            if environment.is_production() {
                warn!("In-memory account store selected in production; accounts will not persist");
            }
            Arc::new(MemoryAccountStore::new())
        }
    };

    info!(environment = %environment, "Application state initialized");

    Ok(AppState::new(
        accounts,
        &jwt_config,
        environment,
        PasswordConfig::from_env(),
        CorsConfig::from_env(),
    ))
}
