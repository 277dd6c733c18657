//! # Ridepool API
//!
//! REST back end of a carpooling service, built with Axum and PostgreSQL.
//! This crate holds the HTTP surface: accounts, JWT authentication, role-based
//! access, request validation and uniform error responses.
//!
//! ## Architecture
//!
//! ```text
//! crates/
//! ├── ridepool-core/     # AppError, roles, password hashing, pagination
//! ├── ridepool-config/   # Environment-driven configuration
//! ├── ridepool-auth/     # Token codec and refresh session registry
//! ├── ridepool-models/   # Account entity and request/response DTOs
//! ├── ridepool-db/       # AccountStore (Postgres and in-memory)
//! └── ridepool-cli/      # create-admin, migrate
//! src/
//! ├── middleware/        # Authentication, role gate, error normalizer
//! ├── modules/
//! │   ├── auth/          # register, login, refresh, logout, me
//! │   ├── accounts/      # Account administration
//! │   └── areas/         # Role-gated business area entry points
//! └── validator.rs       # Validated extractors
//! ```
//!
//! ## Request pipeline
//!
//! Request logging, then the error normalizer, then the panic catcher, then
//! authentication (required or optional), the role gate, the validation
//! extractors, and finally the handler. Any stage may fail with an
//! [`AppError`](ridepool_core::AppError); the failure skips the remaining
//! stages and is rendered once as
//! `{success: false, statusCode, statusText, message, details?}`.
//!
//! ## Roles
//!
//! | Role | Created by |
//! |------|------------|
//! | user | self-registration (`POST /auth/user/register`) |
//! | employee | an admin (`POST /admin/employees`) |
//! | admin | the CLI only (`ridepool-cli create-admin`) |
//!
//! ## Tokens
//!
//! - **Access token**: 15 minutes by default, sent as `Authorization: Bearer`
//! - **Refresh token**: 7 days by default, redeemable once at `POST /auth/refresh`
//!
//! Access and refresh tokens are signed with different secrets.
//!
//! ## API Documentation
//!
//! - Swagger UI: `http://localhost:3000/swagger-ui`
//! - Scalar: `http://localhost:3000/scalar`

pub mod docs;
pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
#[cfg(feature = "test-utils")]
pub mod testing;
pub mod validator;

// Re-export workspace crates for convenience
pub use ridepool_auth;
pub use ridepool_config;
pub use ridepool_core;
pub use ridepool_db;
pub use ridepool_models;
