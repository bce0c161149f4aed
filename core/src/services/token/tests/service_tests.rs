//! Unit tests for session token issuance and validation

use chrono::{Duration, TimeZone, Utc};
use std::sync::Arc;

use crate::domain::entities::token::Claims;
use crate::domain::entities::user::{User, UserRole};
use crate::errors::TokenError;
use crate::services::otp::ManualClock;
use crate::services::token::{TokenService, TokenServiceConfig};

fn test_config() -> TokenServiceConfig {
    TokenServiceConfig {
        jwt_secret: "test-secret".to_string(),
        issuer: "sportsbridge".to_string(),
        access_token_expiry: Duration::days(7),
    }
}

fn test_user() -> User {
    let mut user = User::new("Asha Rao", UserRole::Coach, "+919876543210", "hash", None);
    user.verify();
    user
}

#[test]
fn test_issue_and_validate() {
    let service = TokenService::new(test_config());
    let user = test_user();

    let token = service.issue_token(&user).unwrap();
    assert_eq!(token.split('.').count(), 3);

    let claims = service.validate_token(&token).unwrap();
    assert_eq!(claims.user_id().unwrap(), user.id);
    assert_eq!(claims.phone, "+919876543210");
    assert_eq!(claims.role, UserRole::Coach);
    assert_eq!(claims.iss, "sportsbridge");
    assert_eq!(claims.exp - claims.iat, 7 * 24 * 60 * 60);
}

#[test]
fn test_expired_token_rejected() {
    let clock = Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap()));
    let service = TokenService::with_clock(test_config(), clock);

    let token = service.issue_token(&test_user()).unwrap();
    assert_eq!(service.validate_token(&token), Err(TokenError::TokenExpired));
}

#[test]
fn test_wrong_secret_rejected() {
    let token = TokenService::new(test_config()).issue_token(&test_user()).unwrap();

    let other = TokenService::new(TokenServiceConfig {
        jwt_secret: "another-secret".to_string(),
        ..test_config()
    });
    assert_eq!(other.validate_token(&token), Err(TokenError::InvalidTokenFormat));
}

#[test]
fn test_foreign_issuer_rejected() {
    let service = TokenService::new(test_config());
    let mut claims = Claims::new(&test_user(), "someone-else", Utc::now(), Duration::hours(1));
    let token = service.encode_jwt(&claims).unwrap();
    assert_eq!(service.validate_token(&token), Err(TokenError::InvalidTokenFormat));

    claims.iss = "sportsbridge".to_string();
    let token = service.encode_jwt(&claims).unwrap();
    assert!(service.validate_token(&token).is_ok());
}

#[test]
fn test_garbage_rejected() {
    let service = TokenService::new(test_config());
    assert_eq!(service.validate_token("not-a-jwt"), Err(TokenError::InvalidTokenFormat));
    assert_eq!(service.validate_token(""), Err(TokenError::InvalidTokenFormat));
}

#[test]
fn test_huge_expiry_saturates() {
    let service = TokenService::new(TokenServiceConfig {
        access_token_expiry: Duration::seconds(i64::MAX / 1_000),
        ..test_config()
    });

    let token = service.issue_token(&test_user()).unwrap();
    assert!(service.validate_token(&token).is_ok());
}
