//! # Ridepool CLI
//!
//! Operator tasks that are deliberately not exposed over HTTP. Admin accounts
//! can only be created here.

use anyhow::{Context, bail};
use ridepool_core::Role;
use ridepool_core::password::hash_password;
use ridepool_db::AccountStore;
use ridepool_models::Account;
use ridepool_models::NewAccount;
use ridepool_models::auth::RegisterRequest;
use validator::Validate;

/// Details of the admin to create. Goes through the same rules as HTTP
/// registration.
#[derive(Debug, Clone)]
pub struct AdminInput {
    pub email: String,
    pub pseudo: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

impl AdminInput {
    fn into_request(self) -> RegisterRequest {
        RegisterRequest {
            email: self.email.trim().to_lowercase(),
            pseudo: self.pseudo.trim().to_string(),
            password: self.password,
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
        }
    }
}

fn describe_violations(errors: &validator::ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| match &error.message {
                Some(message) => format!("{} {}", field, message),
                None => format!("{} is invalid", field),
            })
        })
        .collect();
    messages.sort();
    messages.join(", ")
}

pub async fn create_admin(
    store: &dyn AccountStore,
    input: AdminInput,
    bcrypt_cost: u32,
) -> anyhow::Result<Account> {
    let request = input.into_request();
    if let Err(errors) = request.validate() {
        bail!("{}", describe_violations(&errors));
    }

    if store.email_taken(&request.email).await? {
        bail!("An account with email {} already exists", request.email);
    }
    if store.pseudo_taken(&request.pseudo).await? {
        bail!("Pseudo {} is already taken", request.pseudo);
    }

    let password_hash = hash_password(request.password, bcrypt_cost)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    store
        .insert(NewAccount {
            email: request.email,
            pseudo: request.pseudo,
            first_name: request.first_name,
            last_name: request.last_name,
            password_hash,
            role: Role::Admin,
        })
        .await
        .context("Failed to store admin account")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ridepool_db::MemoryAccountStore;

    fn input(email: &str, pseudo: &str, password: &str) -> AdminInput {
        AdminInput {
            email: email.to_string(),
            pseudo: pseudo.to_string(),
            first_name: "Root".to_string(),
            last_name: "Operator".to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_admin() {
        let store = MemoryAccountStore::new();
        let admin = create_admin(&store, input(" Ops@Example.com ", "ops", "changeme42"), 4)
            .await
            .unwrap();
        assert_eq!(admin.role, Role::Admin);
        assert_eq!(admin.email, "ops@example.com");
        assert!(admin.is_active());
    }

    #[tokio::test]
    async fn test_create_admin_rejects_weak_password() {
        let store = MemoryAccountStore::new();
        let err = create_admin(&store, input("ops@example.com", "ops", "short"), 4)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("password"));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_create_admin_rejects_duplicate_email() {
        let store = MemoryAccountStore::new();
        create_admin(&store, input("ops@example.com", "ops", "changeme42"), 4)
            .await
            .unwrap();
        let err = create_admin(&store, input("OPS@example.com", "ops2", "changeme42"), 4)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }
}
