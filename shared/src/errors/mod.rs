//! Shared error response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Standard error response structure used across all API endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for client identification
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Additional error details (field errors, etc.)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, serde_json::Value>>,

    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
            timestamp: Utc::now(),
        }
    }

    /// Add a detail field to the error response
    pub fn add_detail(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        let details = self.details.get_or_insert_with(HashMap::new);
        if let Ok(json_value) = serde_json::to_value(value) {
            details.insert(key.into(), json_value);
        }
        self
    }
}

/// Error codes returned in [`ErrorResponse::error`]
pub mod error_codes {
    pub const NOT_FOUND: &str = "not_found";
    pub const INTERNAL_ERROR: &str = "internal_error";
    pub const VALIDATION_ERROR: &str = "validation_error";
    pub const RATE_LIMITED: &str = "rate_limited";
    pub const OTP_NOT_FOUND: &str = "otp_not_found";
    pub const OTP_EXPIRED: &str = "otp_expired";
    pub const OTP_INVALID: &str = "otp_invalid";
    pub const PHONE_INVALID: &str = "invalid_phone_format";
    pub const AADHAAR_INVALID: &str = "invalid_aadhaar_format";
    pub const IDENTITY_CONFLICT: &str = "identity_conflict";
    pub const ACCOUNT_NOT_FOUND: &str = "account_not_found";
    pub const ACCOUNT_NOT_VERIFIED: &str = "account_not_verified";
    pub const USER_NOT_FOUND: &str = "user_not_found";
    pub const INVALID_CREDENTIALS: &str = "invalid_credentials";
    pub const UNAUTHORIZED: &str = "unauthorized";
    pub const TOKEN_EXPIRED: &str = "token_expired";
}
