use std::env;

use anyhow::{Result, ensure};

use crate::environment::AppEnvironment;

pub const DEV_ACCESS_SECRET: &str = "dev-access-secret-change-in-production";
pub const DEV_REFRESH_SECRET: &str = "dev-refresh-secret-change-in-production";

/// Signing configuration for the two token kinds.
///
/// Access and refresh tokens are signed with different secrets so that a
/// leaked access secret cannot mint refresh tokens and vice versa.
#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub access_secret: String,
    pub refresh_secret: String,
    /// Access token lifetime in seconds
    pub access_token_expiry: i64,
    /// Refresh token lifetime in seconds
    pub refresh_token_expiry: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self {
            access_secret: env::var("JWT_ACCESS_SECRET")
                .unwrap_or_else(|_| DEV_ACCESS_SECRET.to_string()),
            refresh_secret: env::var("JWT_REFRESH_SECRET")
                .unwrap_or_else(|_| DEV_REFRESH_SECRET.to_string()),
            access_token_expiry: env::var("JWT_ACCESS_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(900), // 15 minutes
            refresh_token_expiry: env::var("JWT_REFRESH_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(604800), // 7 days
        }
    }

    /// Refuses configurations that would weaken token separation.
    pub fn validate(&self, environment: AppEnvironment) -> Result<()> {
        ensure!(
            !self.access_secret.is_empty(),
            "JWT_ACCESS_SECRET must not be empty"
        );
        ensure!(
            !self.refresh_secret.is_empty(),
            "JWT_REFRESH_SECRET must not be empty"
        );
        ensure!(
            self.access_secret != self.refresh_secret,
            "JWT_ACCESS_SECRET and JWT_REFRESH_SECRET must differ"
        );
        ensure!(
            self.access_token_expiry > 0 && self.refresh_token_expiry > 0,
            "token expiries must be positive"
        );
        ensure!(
            self.refresh_token_expiry > self.access_token_expiry,
            "JWT_REFRESH_EXPIRY must be longer than JWT_ACCESS_EXPIRY"
        );

        if environment.is_production() {
            ensure!(
                self.access_secret != DEV_ACCESS_SECRET
                    && self.refresh_secret != DEV_REFRESH_SECRET,
                "development JWT secrets cannot be used in production"
            );
        }

        Ok(())
    }
}
