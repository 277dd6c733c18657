//! # Ridepool Core
//!
//! Core types, errors, and utilities for the Ridepool API.
//!
//! - [`errors`]: the failure taxonomy, [`AppError`], and the uniform error body
//! - [`roles`]: the account [`Role`] tag and its dispatch table
//! - [`password`]: bcrypt hashing off the async runtime
//! - [`pagination`]: list metadata
//! - [`serde`]: sanitizing deserializers
//!
//! # Example
//!
//! ```ignore
//! use ridepool_core::{AppError, Role};
//!
//! fn ensure_admin(role: Role) -> Result<(), AppError> {
//!     if role != Role::Admin {
//!         return Err(AppError::forbidden("Administrator privileges required"));
//!     }
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod pagination;
pub mod password;
pub mod roles;
pub mod serde;

// Re-export commonly used types at crate root
pub use errors::{AppError, ErrorBody, ErrorKind, ErrorReport, FieldViolation};
pub use pagination::PaginationMeta;
pub use password::{hash_password, verify_password};
pub use roles::{RegistrationChannel, Role};
