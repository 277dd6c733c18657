//! Middleware and extractors for the request pipeline.
//!
//! - [`auth`]: bearer token authentication and identity extractors
//! - [`role`]: role allow-lists
//! - [`errors`]: the error normalizer, panic handler and fallback
//!
//! # Pipeline
//!
//! 1. Request logging
//! 2. Error normalizer (wraps everything below)
//! 3. Panic catcher
//! 4. `require_auth` / `optional_auth` attaches the [`Identity`](ridepool_auth::Identity)
//! 5. `role_gate` checks the identity's role
//! 6. Validation extractors, then the handler

pub mod auth;
pub mod errors;
pub mod role;
