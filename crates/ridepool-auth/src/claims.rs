//! JWT claim structures and the identity they resolve to.

use std::fmt;

use ridepool_core::Role;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The two kinds of identity token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Short-lived, presented on every API call
    Access,
    /// Long-lived, used solely to obtain a new token pair
    Refresh,
}

impl TokenKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Claims embedded in both token kinds.
///
/// - `sub`: account id
/// - `role`: account role at issue time
/// - `kind`: token kind, checked on verification in addition to the key
/// - `iat` / `exp`: issued-at and expiry (Unix seconds)
/// - `jti`: unique id, present on refresh tokens only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: Role,
    pub kind: TokenKind,
    pub iat: i64,
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}

/// The resolved identity of an authenticated request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identity {
    pub subject_id: Uuid,
    pub role: Role,
}

impl Identity {
    pub fn new(subject_id: Uuid, role: Role) -> Self {
        Self { subject_id, role }
    }
}
