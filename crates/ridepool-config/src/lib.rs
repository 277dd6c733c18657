//! # Ridepool Config
//!
//! Configuration types for the Ridepool API, loaded from environment
//! variables (a `.env` file is honoured by the binaries through `dotenvy`).
//!
//! | Variable | Default |
//! |----------|---------|
//! | `APP_ENV` | `development` |
//! | `HOST` / `PORT` | `0.0.0.0` / `3000` |
//! | `METRICS_PORT` | unset (metrics off) |
//! | `STORAGE` | `postgres` (set `memory` for an in-process store) |
//! | `DATABASE_URL` | required for postgres |
//! | `JWT_ACCESS_SECRET` / `JWT_REFRESH_SECRET` | development values |
//! | `JWT_ACCESS_EXPIRY` / `JWT_REFRESH_EXPIRY` | `900` / `604800` seconds |
//! | `BCRYPT_COST` | `12` |
//! | `ALLOWED_ORIGINS` | `http://localhost:3000,http://localhost:5173` |

pub mod cors;
pub mod environment;
pub mod jwt;
pub mod server;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use environment::AppEnvironment;
pub use jwt::JwtConfig;
pub use server::{PasswordConfig, ServerConfig, StorageConfig};
