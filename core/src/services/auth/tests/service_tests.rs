//! Unit tests for the phone authentication service

use chrono::Duration;

use crate::domain::entities::user::{User, UserRole};
use crate::errors::{AuthError, DomainError, OtpError, QuotaScope, TokenError};
use crate::services::auth::{AadhaarHasher, LoginRequest, SignupRequest, VerificationFlow};

use super::mocks::{harness, harness_with, test_passwords, MockUserRepository, PEPPER};

const PHONE: &str = "+919876543210";
const AADHAAR: &str = "123456789012";
const IP: &str = "10.0.0.1";

fn signup_request() -> SignupRequest {
    SignupRequest {
        full_name: Some("Asha Rao".to_string()),
        role: Some("coach".to_string()),
        phone: PHONE.to_string(),
        aadhaar: AADHAAR.to_string(),
        email: Some("asha@example.com".to_string()),
    }
}

fn login_request() -> LoginRequest {
    LoginRequest {
        phone: PHONE.to_string(),
        aadhaar: AADHAAR.to_string(),
    }
}

fn existing_user(verified: bool) -> User {
    let mut user = User::new(
        "Existing",
        UserRole::Athlete,
        PHONE,
        AadhaarHasher::new(PEPPER).hash(AADHAAR),
        None,
    );
    if verified {
        user.verify();
    }
    user
}

#[tokio::test]
async fn test_signup_then_verify_creates_verified_user() {
    let h = harness();

    let tx_id = h.service.start_signup(signup_request(), IP).await.unwrap();
    assert!(!tx_id.is_empty());
    assert_eq!(h.users.user_count(), 0);

    let code = h.sms.wait_for_code(PHONE).await.unwrap();
    let outcome = h.service.verify(PHONE, &code).await.unwrap();

    assert_eq!(outcome.flow, VerificationFlow::Signup);
    assert!(outcome.user.verified);
    assert_eq!(outcome.user.full_name, "Asha Rao");
    assert_eq!(outcome.user.role, UserRole::Coach);
    assert_eq!(outcome.user.phone, PHONE);
    assert_eq!(outcome.user.email.as_deref(), Some("asha@example.com"));
    assert_eq!(outcome.user.aadhaar_hash, AadhaarHasher::new(PEPPER).hash(AADHAAR));
    assert_eq!(h.users.user_count(), 1);

    let claims = h.tokens.validate_token(&outcome.token).unwrap();
    assert_eq!(claims.user_id().unwrap(), outcome.user.id);
    assert_eq!(claims.phone, PHONE);
    assert_eq!(claims.role, UserRole::Coach);
}

#[tokio::test]
async fn test_signup_defaults() {
    let h = harness();
    let request = SignupRequest {
        full_name: Some("   ".to_string()),
        role: Some("referee".to_string()),
        email: Some("".to_string()),
        ..signup_request()
    };

    h.service.start_signup(request, IP).await.unwrap();
    let code = h.sms.wait_for_code(PHONE).await.unwrap();
    let user = h.service.verify(PHONE, &code).await.unwrap().user;

    assert_eq!(user.full_name, "User");
    assert_eq!(user.role, UserRole::User);
    assert_eq!(user.email, None);
}

#[tokio::test]
async fn test_signup_rejects_bad_formats() {
    let h = harness();

    let err = h
        .service
        .start_signup(
            SignupRequest {
                aadhaar: "12345678901".to_string(),
                ..signup_request()
            },
            IP,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::InvalidAadhaarFormat)));

    let err = h
        .service
        .start_signup(
            SignupRequest {
                phone: "98765-43210".to_string(),
                ..signup_request()
            },
            IP,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::InvalidPhoneFormat)));

    // Both invalid: Aadhaar is reported first
    let err = h
        .service
        .start_signup(
            SignupRequest {
                phone: "abc".to_string(),
                aadhaar: "abc".to_string(),
                ..signup_request()
            },
            IP,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::InvalidAadhaarFormat)));

    assert!(h.sms.get_sent_code(PHONE).is_none());
}

#[tokio::test]
async fn test_signup_conflicts() {
    let h = harness_with(MockUserRepository::with_existing_user(existing_user(true)));

    // Same Aadhaar, different phone
    let err = h
        .service
        .start_signup(
            SignupRequest {
                phone: "+919999999999".to_string(),
                ..signup_request()
            },
            IP,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::AadhaarRegisteredToOtherPhone)));

    // Same phone, different Aadhaar
    let err = h
        .service
        .start_signup(
            SignupRequest {
                aadhaar: "999999999999".to_string(),
                ..signup_request()
            },
            IP,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::PhoneRegisteredToOtherAadhaar)));
}

#[tokio::test]
async fn test_resignup_updates_existing_user() {
    let existing = existing_user(false);
    let existing_id = existing.id;
    let h = harness_with(MockUserRepository::with_existing_user(existing));

    h.service.start_signup(signup_request(), IP).await.unwrap();
    let code = h.sms.wait_for_code(PHONE).await.unwrap();
    let user = h.service.verify(PHONE, &code).await.unwrap().user;

    assert_eq!(user.id, existing_id);
    assert!(user.verified);
    assert_eq!(user.full_name, "Asha Rao");
    assert_eq!(user.role, UserRole::Coach);
    assert_eq!(h.users.user_count(), 1);
}

#[tokio::test]
async fn test_signup_conflict_rechecked_on_verify() {
    let h = harness();

    h.service.start_signup(signup_request(), IP).await.unwrap();
    let code = h.sms.wait_for_code(PHONE).await.unwrap();

    // Another account claims the Aadhaar while the code is pending
    let mut other = User::new(
        "Other",
        UserRole::User,
        "+918888888888",
        AadhaarHasher::new(PEPPER).hash(AADHAAR),
        None,
    );
    other.verify();
    h.users.users.lock().unwrap().insert(other.id, other);

    let err = h.service.verify(PHONE, &code).await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::AadhaarRegisteredToOtherPhone)));
    assert_eq!(h.users.saves(), 0);
}

#[tokio::test]
async fn test_login_unknown_account() {
    let h = harness();
    let err = h.service.start_login(login_request(), IP).await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::AccountNotFound)));
}

#[tokio::test]
async fn test_login_wrong_aadhaar() {
    let h = harness_with(MockUserRepository::with_existing_user(existing_user(true)));
    let request = LoginRequest {
        aadhaar: "000000000000".to_string(),
        ..login_request()
    };
    let err = h.service.start_login(request, IP).await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::AccountNotFound)));
}

#[tokio::test]
async fn test_login_unverified_account() {
    let h = harness_with(MockUserRepository::with_existing_user(existing_user(false)));
    let err = h.service.start_login(login_request(), IP).await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::AccountNotVerified)));
    assert!(h.sms.get_sent_code(PHONE).is_none());
}

#[tokio::test]
async fn test_signup_then_login_returns_same_user() {
    let h = harness();

    h.service.start_signup(signup_request(), IP).await.unwrap();
    let code = h.sms.wait_for_code(PHONE).await.unwrap();
    let signed_up = h.service.verify(PHONE, &code).await.unwrap().user;

    h.sms.clear();
    h.service.start_login(login_request(), IP).await.unwrap();
    let code = h.sms.wait_for_code(PHONE).await.unwrap();
    let outcome = h.service.verify(PHONE, &code).await.unwrap();

    assert_eq!(outcome.flow, VerificationFlow::Login);
    assert_eq!(outcome.user.id, signed_up.id);
    // Login does not write
    assert_eq!(h.users.saves(), 1);
}

#[tokio::test]
async fn test_login_user_removed_while_pending() {
    let existing = existing_user(true);
    let existing_id = existing.id;
    let h = harness_with(MockUserRepository::with_existing_user(existing));

    h.service.start_login(login_request(), IP).await.unwrap();
    h.users.users.lock().unwrap().remove(&existing_id);

    let code = h.sms.wait_for_code(PHONE).await.unwrap();
    let err = h.service.verify(PHONE, &code).await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::UserNotFound)));
}

#[tokio::test]
async fn test_otp_errors_propagate() {
    let h = harness();

    let err = h.service.verify(PHONE, "123456").await.unwrap_err();
    assert!(matches!(err, DomainError::Otp(OtpError::NotFound)));

    h.service.start_signup(signup_request(), IP).await.unwrap();
    let code = h.sms.wait_for_code(PHONE).await.unwrap();
    let wrong = if code == "000000" { "111111" } else { "000000" };

    let err = h.service.verify(PHONE, wrong).await.unwrap_err();
    assert!(matches!(err, DomainError::Otp(OtpError::Invalid)));

    h.clock.advance(Duration::minutes(11));
    let err = h.service.verify(PHONE, &code).await.unwrap_err();
    assert!(matches!(err, DomainError::Otp(OtpError::Expired)));
}

#[tokio::test]
async fn test_signup_rate_limited() {
    let h = harness();

    for _ in 0..5 {
        h.service.start_signup(signup_request(), IP).await.unwrap();
    }
    let err = h.service.start_signup(signup_request(), IP).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Otp(OtpError::RateLimited {
            scope: QuotaScope::Phone
        })
    ));
}

#[tokio::test]
async fn test_verify_without_type_is_signup() {
    let h = harness();
    let payload = [
        ("fullName", "No Type"),
        ("phone", PHONE),
        ("aadhaar", AADHAAR),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    h.service
        .otp_service()
        .issue(PHONE, IP, payload)
        .await
        .unwrap();
    let code = h.sms.wait_for_code(PHONE).await.unwrap();

    let outcome = h.service.verify(PHONE, &code).await.unwrap();
    assert_eq!(outcome.flow, VerificationFlow::Signup);
    assert_eq!(outcome.user.full_name, "No Type");
}

#[tokio::test]
async fn test_malformed_login_payload() {
    let h = harness();
    let payload = [("type", "login"), ("userId", "not-a-uuid")]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    h.service
        .otp_service()
        .issue(PHONE, IP, payload)
        .await
        .unwrap();
    let code = h.sms.wait_for_code(PHONE).await.unwrap();

    let err = h.service.verify(PHONE, &code).await.unwrap_err();
    match err {
        DomainError::Auth(AuthError::MalformedPayload { field }) => assert_eq!(field, "userId"),
        other => panic!("Expected malformed payload error, got {:?}", other),
    }
}

fn user_with_password(phone: &str, verified: bool, password: Option<&str>) -> User {
    let mut user = User::new(
        "Pass Word",
        UserRole::Sponsor,
        phone,
        AadhaarHasher::new(PEPPER).hash(AADHAAR),
        None,
    );
    if verified {
        user.verify();
    }
    if let Some(password) = password {
        user.set_password_hash(test_passwords().hash(password).unwrap());
    }
    user
}

#[tokio::test]
async fn test_login_verify_issues_token_for_existing_user() {
    let existing = existing_user(true);
    let existing_id = existing.id;
    let h = harness_with(MockUserRepository::with_existing_user(existing));

    h.service.start_login(login_request(), IP).await.unwrap();
    let code = h.sms.wait_for_code(PHONE).await.unwrap();
    let outcome = h.service.verify(PHONE, &code).await.unwrap();

    let user = h.service.authenticate(&outcome.token).await.unwrap();
    assert_eq!(user.id, existing_id);
}

#[tokio::test]
async fn test_password_login_success() {
    let user = user_with_password(PHONE, true, Some("hunter22"));
    let user_id = user.id;
    let h = harness_with(MockUserRepository::with_existing_user(user));

    let session = h.service.password_login(PHONE, "hunter22").await.unwrap();
    assert_eq!(session.user.id, user_id);
    let claims = h.tokens.validate_token(&session.token).unwrap();
    assert_eq!(claims.user_id().unwrap(), user_id);
    assert_eq!(claims.role, UserRole::Sponsor);
}

#[tokio::test]
async fn test_password_login_country_code_fallbacks() {
    // Stored with +91, submitted bare
    let h = harness_with(MockUserRepository::with_existing_user(user_with_password(
        "+919876543210",
        true,
        Some("hunter22"),
    )));
    assert!(h.service.password_login("9876543210", "hunter22").await.is_ok());
    assert!(h.service.password_login(" +919876543210 ", "hunter22").await.is_ok());

    // Stored bare, submitted with +91
    let h = harness_with(MockUserRepository::with_existing_user(user_with_password(
        "9876543210",
        true,
        Some("hunter22"),
    )));
    assert!(h.service.password_login("+919876543210", "hunter22").await.is_ok());

    // Other country codes get no fallback
    let err = h.service.password_login("+449876543210", "hunter22").await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::AccountNotFound)));
}

#[tokio::test]
async fn test_password_login_rejections() {
    let h = harness_with(MockUserRepository::with_existing_user(user_with_password(
        PHONE,
        true,
        Some("hunter22"),
    )));

    let err = h.service.password_login("", "hunter22").await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::MissingCredentials)));

    let err = h.service.password_login(PHONE, "").await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::MissingCredentials)));

    let err = h.service.password_login("98765-43210", "hunter22").await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::InvalidPhoneFormat)));

    let err = h.service.password_login("+919999999999", "hunter22").await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::AccountNotFound)));

    let err = h.service.password_login(PHONE, "hunter23").await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::InvalidCredentials)));
}

#[tokio::test]
async fn test_password_login_unverified_or_without_password() {
    let h = harness_with(MockUserRepository::with_existing_user(user_with_password(
        PHONE,
        false,
        Some("hunter22"),
    )));
    let err = h.service.password_login(PHONE, "hunter22").await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::AccountNotVerified)));

    let h = harness_with(MockUserRepository::with_existing_user(user_with_password(
        PHONE, true, None,
    )));
    let err = h.service.password_login(PHONE, "hunter22").await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::InvalidCredentials)));
}

#[tokio::test]
async fn test_set_password_then_password_login() {
    let h = harness();

    h.service.start_signup(signup_request(), IP).await.unwrap();
    let code = h.sms.wait_for_code(PHONE).await.unwrap();
    let outcome = h.service.verify(PHONE, &code).await.unwrap();

    let user = h.service.authenticate(&outcome.token).await.unwrap();
    let err = h.service.set_password(user.clone(), "short").await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Auth(AuthError::PasswordTooShort { min_length: 6 })
    ));

    let user = h.service.set_password(user, "long enough").await.unwrap();
    assert!(user.has_password());
    assert_eq!(h.users.saves(), 2);

    let session = h.service.password_login(PHONE, "long enough").await.unwrap();
    assert_eq!(session.user.id, outcome.user.id);
}

#[tokio::test]
async fn test_authenticate_rejects_bad_tokens() {
    let h = harness();

    let err = h.service.authenticate("garbage").await.unwrap_err();
    assert!(matches!(err, DomainError::Token(TokenError::InvalidTokenFormat)));

    // Well-signed token for a user the repository does not know
    let stranger = user_with_password(PHONE, true, None);
    let token = h.tokens.issue_token(&stranger).unwrap();
    let err = h.service.authenticate(&token).await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::Unauthorized)));
}
