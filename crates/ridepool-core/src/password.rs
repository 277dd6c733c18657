//! Password hashing with bcrypt.
//!
//! bcrypt is deliberately slow, so the async entry points move the work onto
//! tokio's blocking pool instead of stalling a runtime worker.

use bcrypt::{hash, verify};

use crate::errors::AppError;

pub fn hash_password_sync(password: &str, cost: u32) -> Result<String, AppError> {
    hash(password, cost)
        .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to hash password: {}", e)))
}

pub fn verify_password_sync(password: &str, hash: &str) -> Result<bool, AppError> {
    verify(password, hash)
        .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to verify password: {}", e)))
}

/// Hashes `password` (salted, one-way) on the blocking pool.
pub async fn hash_password(password: String, cost: u32) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || hash_password_sync(&password, cost)).await?
}

/// Checks `password` against a stored bcrypt hash on the blocking pool.
pub async fn verify_password(password: String, hash: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || verify_password_sync(&password, &hash)).await?
}

/// Spends the same bcrypt work as a verification at `cost` and discards it.
///
/// Used when the account does not exist so a miss takes as long as a wrong
/// password.
pub async fn burn_password_check(password: String, cost: u32) {
    let _ = tokio::task::spawn_blocking(move || hash(password, cost)).await;
}
