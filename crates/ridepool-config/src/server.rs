use std::env;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Port of the Prometheus scrape endpoint; metrics are disabled when unset
    pub metrics_port: Option<u16>,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3000),
            metrics_port: env::var("METRICS_PORT").ok().and_then(|s| s.parse().ok()),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Where accounts are persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StorageConfig {
    Postgres { url: String, max_connections: u32 },
    /// Process-local store, lost on restart. For local development and tests.
    Memory,
}

impl StorageConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        if env::var("STORAGE").is_ok_and(|v| v.eq_ignore_ascii_case("memory")) {
            return Ok(Self::Memory);
        }

        let url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set (or STORAGE=memory)"))?;
        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10);

        Ok(Self::Postgres {
            url,
            max_connections,
        })
    }
}

/// Password hashing cost.
#[derive(Clone, Debug)]
pub struct PasswordConfig {
    pub bcrypt_cost: u32,
}

impl PasswordConfig {
    pub fn from_env() -> Self {
        Self {
            bcrypt_cost: env::var("BCRYPT_COST")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|cost| (4..=31).contains(cost))
                .unwrap_or(12),
        }
    }
}
