//! Helpers for driving the router in tests without a database.

use std::sync::Arc;

use ridepool_config::{AppEnvironment, CorsConfig, JwtConfig, PasswordConfig};
use ridepool_core::Role;
use ridepool_core::password::hash_password;
use ridepool_db::{AccountStore, MemoryAccountStore};
use ridepool_models::{Account, NewAccount};

use crate::state::AppState;

/// Lowest cost bcrypt accepts; keeps hashing fast in tests.
pub const TEST_BCRYPT_COST: u32 = 4;

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        access_secret: "test-access-secret".to_string(),
        refresh_secret: "test-refresh-secret".to_string(),
        access_token_expiry: 900,
        refresh_token_expiry: 604_800,
    }
}

/// State over a fresh in-memory store. The store handle is returned as well
/// so tests can inspect it directly.
pub fn test_state(environment: AppEnvironment) -> (AppState, MemoryAccountStore) {
    let store = MemoryAccountStore::new();
    let state = AppState::new(
        Arc::new(store.clone()),
        &test_jwt_config(),
        environment,
        PasswordConfig {
            bcrypt_cost: TEST_BCRYPT_COST,
        },
        CorsConfig {
            allowed_origins: vec!["http://localhost:5173".to_string()],
        },
    );
    (state, store)
}

/// Inserts an account straight into the store, bypassing registration
/// channels. This is how admins come to exist.
pub async fn seed_account(
    store: &MemoryAccountStore,
    role: Role,
    email: &str,
    pseudo: &str,
    password: &str,
) -> Account {
    let password_hash = hash_password(password.to_string(), TEST_BCRYPT_COST)
        .await
        .expect("hash test password");
    store
        .insert(NewAccount {
            email: email.to_string(),
            pseudo: pseudo.to_string(),
            first_name: "Test".to_string(),
            last_name: role.as_str().to_string(),
            password_hash,
            role,
        })
        .await
        .expect("seed test account")
}
