//! Token codec: issues and verifies signed, expiring identity tokens.
//!
//! Access and refresh tokens are HS256 JWTs signed with different secrets.
//! Verification distinguishes two failures so callers can decide between
//! prompting a refresh and forcing re-authentication:
//!
//! - [`ErrorKind::InvalidToken`]: malformed, bad signature, wrong kind
//! - [`ErrorKind::ExpiredToken`]: valid signature, past expiry
//!
//! # Example
//!
//! ```ignore
//! use ridepool_auth::{TokenCodec, TokenKind};
//! use ridepool_config::JwtConfig;
//!
//! let codec = TokenCodec::new(&JwtConfig::from_env());
//! let token = codec.issue(account_id, Role::User, TokenKind::Access)?;
//! let identity = codec.verify(&token, TokenKind::Access)?;
//! ```
//!
//! [`ErrorKind::InvalidToken`]: ridepool_core::ErrorKind::InvalidToken
//! [`ErrorKind::ExpiredToken`]: ridepool_core::ErrorKind::ExpiredToken

use std::fmt;

use chrono::Utc;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind as JwtErrorKind,
};
use ridepool_config::JwtConfig;
use ridepool_core::{AppError, Role};
use uuid::Uuid;

use crate::claims::{Claims, Identity, TokenKind};

struct SigningKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: i64,
}

impl SigningKeys {
    fn new(secret: &str, ttl: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }
}

/// A freshly issued access/refresh pair.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// `jti` of the refresh token, tracked for rotation and revocation
    pub refresh_jti: String,
    /// Expiry of the refresh token (Unix seconds)
    pub refresh_expires_at: i64,
    /// Access token lifetime in seconds
    pub expires_in: i64,
}

/// Signs and verifies identity tokens.
///
/// Keys are derived once at construction; the codec is immutable and meant to
/// be shared behind an `Arc`.
pub struct TokenCodec {
    access: SigningKeys,
    refresh: SigningKeys,
    validation: Validation,
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec")
            .field("access_ttl", &self.access.ttl)
            .field("refresh_ttl", &self.refresh.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenCodec {
    pub fn new(config: &JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            access: SigningKeys::new(&config.access_secret, config.access_token_expiry),
            refresh: SigningKeys::new(&config.refresh_secret, config.refresh_token_expiry),
            validation,
        }
    }

    fn keys(&self, kind: TokenKind) -> &SigningKeys {
        match kind {
            TokenKind::Access => &self.access,
            TokenKind::Refresh => &self.refresh,
        }
    }

    /// Lifetime in seconds of tokens of `kind`.
    pub fn ttl(&self, kind: TokenKind) -> i64 {
        self.keys(kind).ttl
    }

    /// Issues a token of `kind` for the account, valid from now.
    pub fn issue(&self, subject_id: Uuid, role: Role, kind: TokenKind) -> Result<String, AppError> {
        self.issue_at(subject_id, role, kind, Utc::now().timestamp())
    }

    /// Issues a token of `kind` as if at `issued_at` (Unix seconds).
    pub fn issue_at(
        &self,
        subject_id: Uuid,
        role: Role,
        kind: TokenKind,
        issued_at: i64,
    ) -> Result<String, AppError> {
        let jti = match kind {
            TokenKind::Access => None,
            TokenKind::Refresh => Some(Uuid::new_v4().to_string()),
        };
        self.sign(self.claims(subject_id, role, kind, issued_at, jti))
    }

    /// Issues both kinds at once, as done at login and on refresh.
    pub fn issue_pair(&self, subject_id: Uuid, role: Role) -> Result<TokenPair, AppError> {
        let now = Utc::now().timestamp();
        let refresh_jti = Uuid::new_v4().to_string();

        let access_token = self.sign(self.claims(subject_id, role, TokenKind::Access, now, None))?;
        let refresh_claims = self.claims(
            subject_id,
            role,
            TokenKind::Refresh,
            now,
            Some(refresh_jti.clone()),
        );
        let refresh_expires_at = refresh_claims.exp;
        let refresh_token = self.sign(refresh_claims)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            refresh_jti,
            refresh_expires_at,
            expires_in: self.access.ttl,
        })
    }

    fn claims(
        &self,
        subject_id: Uuid,
        role: Role,
        kind: TokenKind,
        issued_at: i64,
        jti: Option<String>,
    ) -> Claims {
        Claims {
            sub: subject_id.to_string(),
            role,
            kind,
            iat: issued_at,
            exp: issued_at + self.ttl(kind),
            jti,
        }
    }

    fn sign(&self, claims: Claims) -> Result<String, AppError> {
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.keys(claims.kind).encoding,
        )
        .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to sign {} token: {}", claims.kind, e)))
    }

    /// Checks signature, expiry and kind, returning the raw claims.
    pub fn decode(&self, token: &str, kind: TokenKind) -> Result<Claims, AppError> {
        let claims = decode::<Claims>(token, &self.keys(kind).decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                JwtErrorKind::ExpiredSignature => AppError::expired_token(),
                _ => AppError::invalid_token(),
            })?;

        if claims.kind != kind {
            return Err(AppError::invalid_token());
        }

        Ok(claims)
    }

    /// Verifies a token of `kind` and resolves the identity it carries.
    pub fn verify(&self, token: &str, kind: TokenKind) -> Result<Identity, AppError> {
        let claims = self.decode(token, kind)?;
        identity_of(&claims)
    }

    /// Verifies a refresh token, returning its identity and `jti`.
    pub fn verify_refresh(&self, token: &str) -> Result<(Identity, String), AppError> {
        let claims = self.decode(token, TokenKind::Refresh)?;
        let identity = identity_of(&claims)?;
        let jti = claims.jti.ok_or_else(AppError::invalid_token)?;
        Ok((identity, jti))
    }
}

fn identity_of(claims: &Claims) -> Result<Identity, AppError> {
    let subject_id = Uuid::parse_str(&claims.sub).map_err(|_| AppError::invalid_token())?;
    Ok(Identity::new(subject_id, claims.role))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ridepool_core::ErrorKind;

    fn test_config() -> JwtConfig {
        JwtConfig {
            access_secret: "test-access-secret-at-least-32-characters".to_string(),
            refresh_secret: "test-refresh-secret-at-least-32-characters".to_string(),
            access_token_expiry: 900,
            refresh_token_expiry: 604800,
        }
    }

    fn codec() -> TokenCodec {
        TokenCodec::new(&test_config())
    }

    #[test]
    fn test_round_trip_every_role_and_kind() {
        let codec = codec();
        for role in Role::ALL {
            for kind in [TokenKind::Access, TokenKind::Refresh] {
                let subject_id = Uuid::new_v4();
                let token = codec.issue(subject_id, role, kind).unwrap();
                let identity = codec.verify(&token, kind).unwrap();
                assert_eq!(identity, Identity::new(subject_id, role));
            }
        }
    }

    #[test]
    fn test_access_token_rejected_as_refresh() {
        let codec = codec();
        let token = codec
            .issue(Uuid::new_v4(), Role::User, TokenKind::Access)
            .unwrap();
        let err = codec.verify(&token, TokenKind::Refresh).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidToken);
    }

    #[test]
    fn test_refresh_token_rejected_as_access() {
        let codec = codec();
        let token = codec
            .issue(Uuid::new_v4(), Role::Admin, TokenKind::Refresh)
            .unwrap();
        let err = codec.verify(&token, TokenKind::Access).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidToken);
    }

    #[test]
    fn test_kind_claim_checked_even_with_shared_secret() {
        let mut config = test_config();
        config.refresh_secret = config.access_secret.clone();
        let codec = TokenCodec::new(&config);
        let token = codec
            .issue(Uuid::new_v4(), Role::User, TokenKind::Access)
            .unwrap();
        let err = codec.verify(&token, TokenKind::Refresh).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidToken);
    }

    #[test]
    fn test_expired_token_reports_expired() {
        let codec = codec();
        let two_hours_ago = Utc::now().timestamp() - 7200;
        let token = codec
            .issue_at(Uuid::new_v4(), Role::User, TokenKind::Access, two_hours_ago)
            .unwrap();
        let err = codec.verify(&token, TokenKind::Access).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ExpiredToken);
    }

    #[test]
    fn test_expired_refresh_token_reports_expired() {
        let codec = codec();
        let long_ago = Utc::now().timestamp() - 604800 - 60;
        let token = codec
            .issue_at(Uuid::new_v4(), Role::User, TokenKind::Refresh, long_ago)
            .unwrap();
        let err = codec.verify_refresh(&token).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ExpiredToken);
    }

    #[test]
    fn test_expired_with_wrong_secret_is_invalid() {
        let codec = codec();
        let mut other = test_config();
        other.access_secret = "another-access-secret-at-least-32-chars".to_string();
        let other = TokenCodec::new(&other);
        let token = other
            .issue_at(
                Uuid::new_v4(),
                Role::User,
                TokenKind::Access,
                Utc::now().timestamp() - 7200,
            )
            .unwrap();
        let err = codec.verify(&token, TokenKind::Access).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidToken);
    }

    #[test]
    fn test_malformed_token_is_invalid() {
        let codec = codec();
        for token in ["", "not-a-token", "a.b.c"] {
            let err = codec.verify(token, TokenKind::Access).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidToken);
        }
    }

    #[test]
    fn test_tampered_signature_is_invalid() {
        let codec = codec();
        let token = codec
            .issue(Uuid::new_v4(), Role::User, TokenKind::Access)
            .unwrap();
        let (head, signature) = token.rsplit_once('.').unwrap();
        let flipped = if signature.starts_with('A') { 'B' } else { 'A' };
        let tampered = format!("{}.{}{}", head, flipped, &signature[1..]);
        let err = codec.verify(&tampered, TokenKind::Access).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidToken);
    }

    #[test]
    fn test_expiry_derived_from_kind() {
        let codec = codec();
        let subject_id = Uuid::new_v4();
        let access = codec
            .decode(
                &codec.issue(subject_id, Role::User, TokenKind::Access).unwrap(),
                TokenKind::Access,
            )
            .unwrap();
        let refresh = codec
            .decode(
                &codec.issue(subject_id, Role::User, TokenKind::Refresh).unwrap(),
                TokenKind::Refresh,
            )
            .unwrap();
        assert_eq!(access.exp - access.iat, 900);
        assert_eq!(refresh.exp - refresh.iat, 604800);
        assert!(access.jti.is_none());
        assert!(refresh.jti.is_some());
    }

    #[test]
    fn test_issue_pair() {
        let codec = codec();
        let subject_id = Uuid::new_v4();
        let pair = codec.issue_pair(subject_id, Role::Employee).unwrap();

        let identity = codec.verify(&pair.access_token, TokenKind::Access).unwrap();
        assert_eq!(identity, Identity::new(subject_id, Role::Employee));

        let (identity, jti) = codec.verify_refresh(&pair.refresh_token).unwrap();
        assert_eq!(identity.subject_id, subject_id);
        assert_eq!(jti, pair.refresh_jti);
        assert_eq!(pair.expires_in, 900);
    }

    #[test]
    fn test_pairs_have_unique_refresh_ids() {
        let codec = codec();
        let subject_id = Uuid::new_v4();
        let first = codec.issue_pair(subject_id, Role::User).unwrap();
        let second = codec.issue_pair(subject_id, Role::User).unwrap();
        assert_ne!(first.refresh_jti, second.refresh_jti);
        assert_ne!(first.refresh_token, second.refresh_token);
    }
}
