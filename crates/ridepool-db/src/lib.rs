//! # Ridepool DB
//!
//! Connection pool, migrations and the account store used by the Ridepool
//! API.
//!
//! Handlers never touch SQL directly. They go through [`AccountStore`], which
//! has a PostgreSQL implementation for deployments and an in-memory one for
//! tests and local runs without a database.
//!
//! # Example
//!
//! ```ignore
//! use ridepool_db::{init_db_pool, run_migrations, PgAccountStore};
//!
//! let pool = init_db_pool("postgres://localhost/ridepool", 10).await?;
//! run_migrations(&pool).await?;
//! let store = PgAccountStore::new(pool);
//! ```

mod memory;
mod postgres;

use async_trait::async_trait;
use ridepool_core::AppError;
use ridepool_models::{Account, AccountFilter, AccountStatus, NewAccount};
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;
use uuid::Uuid;

pub use memory::MemoryAccountStore;
pub use postgres::PgAccountStore;
pub use sqlx::PgPool;

/// Errors raised by an [`AccountStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("email already registered")]
    DuplicateEmail,

    #[error("pseudo already taken")]
    DuplicatePseudo,

    #[error("corrupt account row: {0}")]
    Corrupt(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl StoreError {
    /// Uniqueness failures are client errors; anything else is unexpected.
    pub fn into_app_error(self) -> AppError {
        match self {
            StoreError::DuplicateEmail => AppError::conflict("Email already in use"),
            StoreError::DuplicatePseudo => AppError::conflict("Pseudo already in use"),
            other => AppError::internal(other),
        }
    }
}

/// Persistence boundary for accounts.
///
/// Emails are stored as given (callers normalise them to lowercase);
/// uniqueness of both email and pseudo is case-insensitive.
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError>;

    async fn email_taken(&self, email: &str) -> Result<bool, StoreError>;

    async fn pseudo_taken(&self, pseudo: &str) -> Result<bool, StoreError>;

    /// Inserts a new active account. Fails with [`StoreError::DuplicateEmail`]
    /// or [`StoreError::DuplicatePseudo`] when a concurrent insert won the race.
    async fn insert(&self, account: NewAccount) -> Result<Account, StoreError>;

    /// Returns one page of accounts, newest first, plus the total match count.
    async fn list(&self, filter: &AccountFilter) -> Result<(Vec<Account>, i64), StoreError>;

    /// Returns `None` when no account has this id.
    async fn set_status(
        &self,
        id: Uuid,
        status: AccountStatus,
    ) -> Result<Option<Account>, StoreError>;
}

/// Opens a PostgreSQL connection pool.
pub async fn init_db_pool(database_url: &str, max_connections: u32) -> Result<PgPool, StoreError> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;
    tracing::info!(max_connections, "Database pool ready");
    Ok(pool)
}

/// Applies the embedded migrations under `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::migrate!("../../migrations").run(pool).await?;
    Ok(())
}
