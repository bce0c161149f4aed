//! Domain-specific error types for one-time codes and phone authentication
//!
//! Error messages here are developer-facing; user-facing wording and HTTP
//! status codes are decided in the presentation layer.

use std::fmt;
use thiserror::Error;

/// Which issuance quota rejected a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotaScope {
    /// Too many codes issued to one phone number
    Phone,
    /// Too many codes requested from one client IP
    Ip,
}

impl QuotaScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuotaScope::Phone => "phone",
            QuotaScope::Ip => "ip",
        }
    }
}

impl fmt::Display for QuotaScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One-time code errors
///
/// All variants are expected, user-recoverable outcomes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OtpError {
    #[error("Too many OTP requests for this {scope}. Try later.")]
    RateLimited { scope: QuotaScope },

    #[error("OTP not found. Re-initiate the flow.")]
    NotFound,

    #[error("OTP expired.")]
    Expired,

    #[error("Invalid OTP.")]
    Invalid,
}

/// Phone authentication errors raised around the one-time code flow
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid phone format")]
    InvalidPhoneFormat,

    #[error("Invalid Aadhaar format")]
    InvalidAadhaarFormat,

    #[error("Aadhaar already registered with a different phone")]
    AadhaarRegisteredToOtherPhone,

    #[error("Phone already registered with a different Aadhaar")]
    PhoneRegisteredToOtherAadhaar,

    #[error("Account not found for this Aadhaar + phone")]
    AccountNotFound,

    #[error("Account not verified")]
    AccountNotVerified,

    #[error("User not found")]
    UserNotFound,

    #[error("Malformed verification payload: {field}")]
    MalformedPayload { field: String },

    #[error("Missing phone or password")]
    MissingCredentials,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password must be at least {min_length} characters")]
    PasswordTooShort { min_length: usize },

    #[error("Unauthorized")]
    Unauthorized,
}

/// Session token errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Invalid claims")]
    InvalidClaims,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}
