use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ridepool_core::Role;
use ridepool_models::{Account, AccountFilter, AccountStatus, NewAccount};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::{AccountStore, StoreError};

const ACCOUNT_COLUMNS: &str = "id, email, pseudo, first_name, last_name, password_hash, \
     role_id, status, created_at, updated_at";

#[derive(Debug, FromRow)]
struct AccountRow {
    id: Uuid,
    email: String,
    pseudo: String,
    first_name: String,
    last_name: String,
    password_hash: String,
    role_id: i16,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = StoreError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let role = Role::from_id(row.role_id)
            .ok_or_else(|| StoreError::Corrupt(format!("unknown role_id {}", row.role_id)))?;
        let status = row.status.parse::<AccountStatus>().map_err(StoreError::Corrupt)?;
        Ok(Account {
            id: row.id,
            email: row.email,
            pseudo: row.pseudo,
            first_name: row.first_name,
            last_name: row.last_name,
            password_hash: row.password_hash,
            role,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// [`AccountStore`] backed by the `accounts` table.
#[derive(Debug, Clone)]
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_unique_violation(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            match db_err.constraint() {
                Some("accounts_email_key") => return StoreError::DuplicateEmail,
                Some("accounts_pseudo_key") => return StoreError::DuplicatePseudo,
                _ => {}
            }
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, StoreError> {
        let sql = format!("SELECT {} FROM accounts WHERE id = $1", ACCOUNT_COLUMNS);
        sqlx::query_as::<_, AccountRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(Account::try_from)
            .transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        let sql = format!(
            "SELECT {} FROM accounts WHERE lower(email) = lower($1)",
            ACCOUNT_COLUMNS
        );
        sqlx::query_as::<_, AccountRow>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?
            .map(Account::try_from)
            .transpose()
    }

    async fn email_taken(&self, email: &str) -> Result<bool, StoreError> {
        let taken: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM accounts WHERE lower(email) = lower($1))",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;
        Ok(taken)
    }

    async fn pseudo_taken(&self, pseudo: &str) -> Result<bool, StoreError> {
        let taken: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM accounts WHERE lower(pseudo) = lower($1))",
        )
        .bind(pseudo)
        .fetch_one(&self.pool)
        .await?;
        Ok(taken)
    }

    async fn insert(&self, account: NewAccount) -> Result<Account, StoreError> {
        let sql = format!(
            "INSERT INTO accounts (id, email, pseudo, first_name, last_name, password_hash, role_id, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {}",
            ACCOUNT_COLUMNS
        );
        let row = sqlx::query_as::<_, AccountRow>(&sql)
            .bind(Uuid::new_v4())
            .bind(&account.email)
            .bind(&account.pseudo)
            .bind(&account.first_name)
            .bind(&account.last_name)
            .bind(&account.password_hash)
            .bind(account.role.id())
            .bind(AccountStatus::Active.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(map_unique_violation)?;
        Account::try_from(row)
    }

    async fn list(&self, filter: &AccountFilter) -> Result<(Vec<Account>, i64), StoreError> {
        let role_id = filter.role.map(Role::id);
        let status = filter.status.map(AccountStatus::as_str);

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM accounts \
             WHERE ($1::smallint IS NULL OR role_id = $1) \
             AND ($2::text IS NULL OR status = $2)",
        )
        .bind(role_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        let sql = format!(
            "SELECT {} FROM accounts \
             WHERE ($1::smallint IS NULL OR role_id = $1) \
             AND ($2::text IS NULL OR status = $2) \
             ORDER BY created_at DESC, id \
             LIMIT $3 OFFSET $4",
            ACCOUNT_COLUMNS
        );
        let rows = sqlx::query_as::<_, AccountRow>(&sql)
            .bind(role_id)
            .bind(status)
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(&self.pool)
            .await?;

        let accounts = rows
            .into_iter()
            .map(Account::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((accounts, total))
    }

    async fn set_status(
        &self,
        id: Uuid,
        status: AccountStatus,
    ) -> Result<Option<Account>, StoreError> {
        let sql = format!(
            "UPDATE accounts SET status = $2, updated_at = now() WHERE id = $1 RETURNING {}",
            ACCOUNT_COLUMNS
        );
        sqlx::query_as::<_, AccountRow>(&sql)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(&self.pool)
            .await?
            .map(Account::try_from)
            .transpose()
    }
}
