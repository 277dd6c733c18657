//! # Ridepool Auth
//!
//! Identity tokens for the Ridepool API.
//!
//! - [`claims`]: token claims, [`TokenKind`], and the resolved [`Identity`]
//! - [`jwt`]: the [`TokenCodec`] that issues and verifies tokens
//! - [`sessions`]: the [`SessionRegistry`] backing refresh rotation and logout
//!
//! # Token kinds
//!
//! - **Access token**: short-lived (default 15 minutes), sent as
//!   `Authorization: Bearer <token>` on API calls
//! - **Refresh token**: long-lived (default 7 days), redeemable once for a new
//!   pair
//!
//! # Example
//!
//! ```ignore
//! use ridepool_auth::{SessionRegistry, TokenCodec};
//!
//! let codec = TokenCodec::new(&jwt_config);
//! let sessions = SessionRegistry::new();
//!
//! let pair = codec.issue_pair(account.id, account.role)?;
//! sessions.activate(account.id, pair.refresh_jti.clone(), pair.refresh_expires_at).await;
//! ```

pub mod claims;
pub mod jwt;
pub mod sessions;

// Re-export commonly used types at crate root
pub use claims::{Claims, Identity, TokenKind};
pub use jwt::{TokenCodec, TokenPair};
pub use sessions::SessionRegistry;
