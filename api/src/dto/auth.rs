//! Authentication DTOs
//!
//! Field names are camelCase on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use sb_core::domain::entities::user::{User, UserRole};
use sb_core::services::auth::{self, VerificationFlow};

/// Body of `POST /api/auth/signup`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[validate(length(max = 100, message = "Full name must be at most 100 characters"))]
    pub full_name: Option<String>,

    /// One of athlete, coach, sponsor or user; anything else becomes user
    #[validate(length(max = 32))]
    pub role: Option<String>,

    #[validate(length(min = 1, max = 32, message = "Phone number is required"))]
    pub phone: String,

    #[validate(length(min = 1, max = 32, message = "Aadhaar number is required"))]
    pub aadhaar: String,

    #[validate(length(max = 254))]
    pub email: Option<String>,
}

impl From<SignupRequest> for auth::SignupRequest {
    fn from(request: SignupRequest) -> Self {
        Self {
            full_name: request.full_name,
            role: request.role,
            phone: request.phone,
            aadhaar: request.aadhaar,
            email: request.email,
        }
    }
}

/// Body of `POST /api/auth/login`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 32, message = "Phone number is required"))]
    pub phone: String,

    #[validate(length(min = 1, max = 32, message = "Aadhaar number is required"))]
    pub aadhaar: String,
}

impl From<LoginRequest> for auth::LoginRequest {
    fn from(request: LoginRequest) -> Self {
        Self {
            phone: request.phone,
            aadhaar: request.aadhaar,
        }
    }
}

/// Body of `POST /api/auth/verify`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyRequest {
    #[validate(length(min = 1, max = 32, message = "Phone number is required"))]
    pub phone: String,

    /// Also accepted as `otp`
    #[serde(alias = "otp")]
    #[validate(length(min = 1, max = 16, message = "Code is required"))]
    pub code: String,
}

/// Body of `POST /api/auth/password-login`
///
/// Missing fields default to empty and are rejected by the service.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PasswordLoginRequest {
    #[serde(default)]
    #[validate(length(max = 32))]
    pub phone: String,

    #[serde(default)]
    #[validate(length(max = 128))]
    pub password: String,
}

/// Body of `POST /api/auth/set-password`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SetPasswordRequest {
    #[serde(default)]
    #[validate(length(max = 128))]
    pub password: String,
}

/// Query of `GET /api/auth/dev/peek-otp`
#[derive(Debug, Clone, Deserialize)]
pub struct PeekQuery {
    pub phone: String,
}

/// Returned by signup and login once a code has been issued
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpSentResponse {
    /// Always `OTP_SENT`
    pub status: String,
    pub tx_id: String,
}

impl OtpSentResponse {
    pub fn new(tx_id: impl Into<String>) -> Self {
        Self {
            status: "OTP_SENT".to_string(),
            tx_id: tx_id.into(),
        }
    }
}

/// Public view of a user; the Aadhaar hash never leaves the service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub full_name: String,
    pub role: UserRole,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name.clone(),
            role: user.role,
            phone: user.phone.clone(),
            email: user.email.clone(),
            verified: user.verified,
            created_at: user.created_at,
        }
    }
}

/// Returned by a successful verification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifiedResponse {
    /// Always `VERIFIED`
    pub status: String,
    pub flow: VerificationFlow,
    /// Session token for the `Authorization: Bearer` header
    pub token: String,
    pub user: UserResponse,
}

impl VerifiedResponse {
    pub fn new(flow: VerificationFlow, user: &User, token: impl Into<String>) -> Self {
        Self {
            status: "VERIFIED".to_string(),
            flow,
            token: token.into(),
            user: UserResponse::from(user),
        }
    }
}

/// Returned by a successful password login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Returned once a password has been stored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordSetResponse {
    /// Always `PASSWORD_SET`
    pub status: String,
}

impl Default for PasswordSetResponse {
    fn default() -> Self {
        Self {
            status: "PASSWORD_SET".to_string(),
        }
    }
}

/// Pending code for a phone, if any
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeekResponse {
    pub otp: Option<String>,
}
