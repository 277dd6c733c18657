//! Refresh session registry.
//!
//! Tracks which refresh tokens (by `jti`) are still redeemable for each
//! account. Redeeming rotates the `jti`, so a refresh token works once;
//! logging out revokes every session of the account. Access tokens are not
//! tracked and stay valid until their short expiry.
//!
//! The registry lives in process memory. Several API instances behind a load
//! balancer would each hold their own view.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// jti -> expiry (Unix seconds)
type Sessions = HashMap<String, i64>;

/// Handle to the shared registry. Cloning is cheap and shares state.
#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    inner: Arc<RwLock<HashMap<Uuid, Sessions>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a newly issued refresh token.
    pub async fn activate(&self, account_id: Uuid, jti: String, expires_at: i64) {
        let now = Utc::now().timestamp();
        let mut accounts = self.inner.write().await;
        let sessions = accounts.entry(account_id).or_default();
        sessions.retain(|_, exp| *exp > now);
        sessions.insert(jti, expires_at);
    }

    /// Replaces `presented` with `next` if `presented` is still active.
    ///
    /// Returns `false` when the presented token was already redeemed, revoked,
    /// or never issued; in that case nothing changes.
    pub async fn rotate(
        &self,
        account_id: Uuid,
        presented: &str,
        next: String,
        expires_at: i64,
    ) -> bool {
        let now = Utc::now().timestamp();
        let mut accounts = self.inner.write().await;
        let Some(sessions) = accounts.get_mut(&account_id) else {
            return false;
        };

        match sessions.remove(presented) {
            Some(exp) if exp > now => {
                sessions.insert(next, expires_at);
                true
            }
            _ => false,
        }
    }

    pub async fn is_active(&self, account_id: Uuid, jti: &str) -> bool {
        let now = Utc::now().timestamp();
        self.inner
            .read()
            .await
            .get(&account_id)
            .and_then(|sessions| sessions.get(jti))
            .is_some_and(|exp| *exp > now)
    }

    /// Revokes every refresh session of the account. Returns how many were
    /// active.
    pub async fn revoke_all(&self, account_id: Uuid) -> usize {
        self.inner
            .write()
            .await
            .remove(&account_id)
            .map(|sessions| sessions.len())
            .unwrap_or(0)
    }

    /// Drops expired sessions across all accounts. Returns how many went.
    pub async fn prune_expired(&self) -> usize {
        let now = Utc::now().timestamp();
        let mut accounts = self.inner.write().await;
        let mut pruned = 0;
        accounts.retain(|_, sessions| {
            let before = sessions.len();
            sessions.retain(|_, exp| *exp > now);
            pruned += before - sessions.len();
            !sessions.is_empty()
        });
        pruned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_one_hour() -> i64 {
        Utc::now().timestamp() + 3600
    }

    #[tokio::test]
    async fn test_activate_then_active() {
        let registry = SessionRegistry::new();
        let account = Uuid::new_v4();
        registry.activate(account, "a".into(), in_one_hour()).await;
        assert!(registry.is_active(account, "a").await);
        assert!(!registry.is_active(account, "b").await);
        assert!(!registry.is_active(Uuid::new_v4(), "a").await);
    }

    #[tokio::test]
    async fn test_rotate_is_single_use() {
        let registry = SessionRegistry::new();
        let account = Uuid::new_v4();
        registry.activate(account, "first".into(), in_one_hour()).await;

        assert!(
            registry
                .rotate(account, "first", "second".into(), in_one_hour())
                .await
        );
        assert!(!registry.is_active(account, "first").await);
        assert!(registry.is_active(account, "second").await);

        assert!(
            !registry
                .rotate(account, "first", "third".into(), in_one_hour())
                .await
        );
        assert!(!registry.is_active(account, "third").await);
    }

    #[tokio::test]
    async fn test_sessions_are_independent_per_device() {
        let registry = SessionRegistry::new();
        let account = Uuid::new_v4();
        registry.activate(account, "phone".into(), in_one_hour()).await;
        registry.activate(account, "laptop".into(), in_one_hour()).await;

        assert!(
            registry
                .rotate(account, "phone", "phone-2".into(), in_one_hour())
                .await
        );
        assert!(registry.is_active(account, "laptop").await);
    }

    #[tokio::test]
    async fn test_revoke_all() {
        let registry = SessionRegistry::new();
        let account = Uuid::new_v4();
        registry.activate(account, "a".into(), in_one_hour()).await;
        registry.activate(account, "b".into(), in_one_hour()).await;

        assert_eq!(registry.revoke_all(account).await, 2);
        assert!(!registry.is_active(account, "a").await);
        assert!(
            !registry
                .rotate(account, "b", "c".into(), in_one_hour())
                .await
        );
        assert_eq!(registry.revoke_all(account).await, 0);
    }

    #[tokio::test]
    async fn test_expired_sessions_cannot_rotate_and_are_pruned() {
        let registry = SessionRegistry::new();
        let account = Uuid::new_v4();
        let past = Utc::now().timestamp() - 1;
        registry.activate(account, "old".into(), past).await;

        assert!(!registry.is_active(account, "old").await);
        assert_eq!(registry.prune_expired().await, 1);
        assert!(
            !registry
                .rotate(account, "old", "new".into(), in_one_hour())
                .await
        );
    }
}
