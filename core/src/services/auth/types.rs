//! Request and result types for the phone authentication flow

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::entities::user::User;

/// Data submitted to start a signup
#[derive(Debug, Clone, Default)]
pub struct SignupRequest {
    /// Display name; blank falls back to the default name
    pub full_name: Option<String>,
    /// Role name, matched case-insensitively; unknown falls back to `USER`
    pub role: Option<String>,
    pub phone: String,
    /// 12-digit Aadhaar number
    pub aadhaar: String,
    pub email: Option<String>,
}

/// Data submitted to start a login
#[derive(Debug, Clone, Default)]
pub struct LoginRequest {
    pub phone: String,
    pub aadhaar: String,
}

/// Which flow a verified code completed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationFlow {
    Signup,
    Login,
}

impl VerificationFlow {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationFlow::Signup => "signup",
            VerificationFlow::Login => "login",
        }
    }
}

impl fmt::Display for VerificationFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a successful verification
#[derive(Debug, Clone)]
pub struct VerificationOutcome {
    pub flow: VerificationFlow,
    /// The created, updated or logged-in user
    pub user: User,
    /// Session token for `user`
    pub token: String,
}

/// Result of a successful password login
#[derive(Debug, Clone)]
pub struct AuthenticatedSession {
    pub user: User,
    pub token: String,
}
