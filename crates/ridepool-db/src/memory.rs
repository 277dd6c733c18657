use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use ridepool_models::{Account, AccountFilter, AccountStatus, NewAccount};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{AccountStore, StoreError};

/// [`AccountStore`] kept in process memory.
///
/// Used by the test suite and by `STORAGE=memory` local runs. Contents are
/// lost on restart.
#[derive(Debug, Clone, Default)]
pub struct MemoryAccountStore {
    accounts: Arc<RwLock<HashMap<Uuid, Account>>>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }
}

fn same_text(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

fn matches_filter(account: &Account, filter: &AccountFilter) -> bool {
    filter.role.is_none_or(|role| account.role == role)
        && filter.status.is_none_or(|status| account.status == status)
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, StoreError> {
        Ok(self.accounts.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .find(|account| same_text(&account.email, email))
            .cloned())
    }

    async fn email_taken(&self, email: &str) -> Result<bool, StoreError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().any(|account| same_text(&account.email, email)))
    }

    async fn pseudo_taken(&self, pseudo: &str) -> Result<bool, StoreError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().any(|account| same_text(&account.pseudo, pseudo)))
    }

    async fn insert(&self, account: NewAccount) -> Result<Account, StoreError> {
        // Uniqueness check and insert happen under one write lock.
        let mut accounts = self.accounts.write().await;
        if accounts.values().any(|a| same_text(&a.email, &account.email)) {
            return Err(StoreError::DuplicateEmail);
        }
        if accounts.values().any(|a| same_text(&a.pseudo, &account.pseudo)) {
            return Err(StoreError::DuplicatePseudo);
        }

        let now = Utc::now();
        let created = Account {
            id: Uuid::new_v4(),
            email: account.email,
            pseudo: account.pseudo,
            first_name: account.first_name,
            last_name: account.last_name,
            password_hash: account.password_hash,
            role: account.role,
            status: AccountStatus::Active,
            created_at: now,
            updated_at: now,
        };
        accounts.insert(created.id, created.clone());
        Ok(created)
    }

    async fn list(&self, filter: &AccountFilter) -> Result<(Vec<Account>, i64), StoreError> {
        let accounts = self.accounts.read().await;
        let mut matching: Vec<&Account> = accounts
            .values()
            .filter(|account| matches_filter(account, filter))
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));

        let total = matching.len() as i64;
        let page = matching
            .into_iter()
            .skip(filter.offset.max(0) as usize)
            .take(filter.limit.max(0) as usize)
            .cloned()
            .collect();
        Ok((page, total))
    }

    async fn set_status(
        &self,
        id: Uuid,
        status: AccountStatus,
    ) -> Result<Option<Account>, StoreError> {
        let mut accounts = self.accounts.write().await;
        Ok(accounts.get_mut(&id).map(|account| {
            account.status = status;
            account.updated_at = Utc::now();
            account.clone()
        }))
    }
}
