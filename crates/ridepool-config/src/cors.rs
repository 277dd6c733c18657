use std::env;

/// Web front ends served in development.
pub const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";

/// Browser origins allowed to call the API with credentials.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    /// Reads the comma-separated `ALLOWED_ORIGINS`.
    pub fn from_env() -> Self {
        let raw = env::var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGINS.to_string());
        Self::parse(&raw)
    }

    /// Splits an origin list, dropping blanks, duplicates and `*`.
    ///
    /// Credentialed CORS cannot use a wildcard origin, so `*` is never kept.
    pub fn parse(raw: &str) -> Self {
        let mut allowed_origins: Vec<String> = Vec::new();
        for origin in raw.split(',') {
            let origin = origin.trim().trim_end_matches('/');
            if origin.is_empty() || origin == "*" {
                continue;
            }
            if !allowed_origins.iter().any(|known| known == origin) {
                allowed_origins.push(origin.to_string());
            }
        }

        Self { allowed_origins }
    }
}
