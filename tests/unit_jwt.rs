use chrono::Utc;
use ridepool_auth::{TokenCodec, TokenKind};
use ridepool_config::JwtConfig;
use ridepool_core::{ErrorKind, Role};
use uuid::Uuid;

fn get_test_jwt_config() -> JwtConfig {
    JwtConfig {
        access_secret: "test_access_secret_for_testing".to_string(),
        refresh_secret: "test_refresh_secret_for_testing".to_string(),
        access_token_expiry: 900,
        refresh_token_expiry: 604_800,
    }
}

#[test]
fn test_access_token_round_trip_all_roles() {
    let codec = TokenCodec::new(&get_test_jwt_config());

    for role in Role::ALL {
        let account_id = Uuid::new_v4();
        let token = codec.issue(account_id, role, TokenKind::Access).unwrap();
        assert!(!token.is_empty());

        let identity = codec.verify(&token, TokenKind::Access).unwrap();
        assert_eq!(identity.subject_id, account_id);
        assert_eq!(identity.role, role);
    }
}

#[test]
fn test_token_kinds_are_not_interchangeable() {
    let codec = TokenCodec::new(&get_test_jwt_config());
    let account_id = Uuid::new_v4();

    let access = codec.issue(account_id, Role::User, TokenKind::Access).unwrap();
    let refresh = codec.issue(account_id, Role::User, TokenKind::Refresh).unwrap();

    let err = codec.verify(&access, TokenKind::Refresh).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidToken);

    let err = codec.verify(&refresh, TokenKind::Access).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidToken);
}

#[test]
fn test_kind_is_checked_even_with_shared_secret() {
    let mut config = get_test_jwt_config();
    config.refresh_secret = config.access_secret.clone();
    let codec = TokenCodec::new(&config);

    let refresh = codec
        .issue(Uuid::new_v4(), Role::Admin, TokenKind::Refresh)
        .unwrap();
    let err = codec.verify(&refresh, TokenKind::Access).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidToken);
}

#[test]
fn test_expired_token_is_reported_as_expired() {
    let codec = TokenCodec::new(&get_test_jwt_config());
    let issued_at = Utc::now().timestamp() - 3_600;

    let token = codec
        .issue_at(Uuid::new_v4(), Role::User, TokenKind::Access, issued_at)
        .unwrap();
    let err = codec.verify(&token, TokenKind::Access).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ExpiredToken);
    assert_eq!(err.message(), "Token expired");
}

#[test]
fn test_garbage_and_foreign_tokens_are_invalid() {
    let codec = TokenCodec::new(&get_test_jwt_config());
    let mut other_config = get_test_jwt_config();
    other_config.access_secret = "some_other_secret".to_string();
    let other = TokenCodec::new(&other_config);

    let foreign = other
        .issue(Uuid::new_v4(), Role::Admin, TokenKind::Access)
        .unwrap();

    for token in ["", "invalid.token.here", foreign.as_str()] {
        let err = codec.verify(token, TokenKind::Access).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidToken, "{:?}", token);
    }
}

#[test]
fn test_pair_carries_refresh_jti() {
    let codec = TokenCodec::new(&get_test_jwt_config());
    let account_id = Uuid::new_v4();

    let pair = codec.issue_pair(account_id, Role::Employee).unwrap();
    assert_eq!(pair.expires_in, 900);

    let (identity, jti) = codec.verify_refresh(&pair.refresh_token).unwrap();
    assert_eq!(identity.subject_id, account_id);
    assert_eq!(jti, pair.refresh_jti);

    let second = codec.issue_pair(account_id, Role::Employee).unwrap();
    assert_ne!(second.refresh_jti, pair.refresh_jti);
}
