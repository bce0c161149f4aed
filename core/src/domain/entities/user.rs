//! User entity representing a registered SportsBridge member.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Name given to accounts that signed up without one
pub const DEFAULT_FULL_NAME: &str = "User";

/// Role a member plays on the network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    Athlete,
    Coach,
    Sponsor,
    User,
}

impl UserRole {
    /// Parses a submitted role, falling back to [`UserRole::User`]
    pub fn parse_or_default(value: Option<&str>) -> Self {
        value
            .and_then(|v| v.parse().ok())
            .unwrap_or(UserRole::User)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Athlete => "ATHLETE",
            UserRole::Coach => "COACH",
            UserRole::Sponsor => "SPONSOR",
            UserRole::User => "USER",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ATHLETE" => Ok(UserRole::Athlete),
            "COACH" => Ok(UserRole::Coach),
            "SPONSOR" => Ok(UserRole::Sponsor),
            "USER" => Ok(UserRole::User),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

/// Registered member, identified by phone and a hashed Aadhaar number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Display name
    pub full_name: String,

    /// Role on the network
    pub role: UserRole,

    /// Phone number as submitted at signup
    pub phone: String,

    /// Hex SHA-256 of the peppered Aadhaar number
    pub aadhaar_hash: String,

    /// Optional contact email
    pub email: Option<String>,

    /// Whether the phone number has been confirmed with a one-time code
    pub verified: bool,

    /// bcrypt hash of the login password, if one was set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new, unverified user
    pub fn new(
        full_name: impl Into<String>,
        role: UserRole,
        phone: impl Into<String>,
        aadhaar_hash: impl Into<String>,
        email: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            full_name: normalize_full_name(&full_name.into()),
            role,
            phone: phone.into(),
            aadhaar_hash: aadhaar_hash.into(),
            email,
            verified: false,
            password_hash: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrites profile fields from a completed signup and marks the user verified
    pub fn apply_signup(
        &mut self,
        full_name: &str,
        role: UserRole,
        email: Option<String>,
        aadhaar_hash: impl Into<String>,
    ) {
        self.full_name = normalize_full_name(full_name);
        self.role = role;
        self.email = email;
        self.aadhaar_hash = aadhaar_hash.into();
        self.verify();
    }

    /// Marks the user as verified
    pub fn verify(&mut self) {
        self.verified = true;
        self.updated_at = Utc::now();
    }

    /// Replaces the stored password hash
    pub fn set_password_hash(&mut self, password_hash: impl Into<String>) {
        self.password_hash = Some(password_hash.into());
        self.updated_at = Utc::now();
    }

    pub fn has_password(&self) -> bool {
        self.password_hash.is_some()
    }
}

/// Trims a submitted name, substituting the default for blank input
pub fn normalize_full_name(full_name: &str) -> String {
    let trimmed = full_name.trim();
    if trimmed.is_empty() {
        DEFAULT_FULL_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}
