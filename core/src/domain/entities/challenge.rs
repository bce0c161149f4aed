//! One-time code challenge entity for phone-based authentication.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;

/// Length of the one-time code
pub const CODE_LENGTH: usize = 6;

/// Number of distinct codes (000000..=999999)
pub const CODE_SPACE: u32 = 1_000_000;

/// Default lifetime of a challenge (10 minutes)
pub const DEFAULT_TTL_MINUTES: i64 = 10;

/// Caller context carried from issuance through to successful verification
pub type OtpPayload = HashMap<String, String>;

/// A pending one-time code bound to a phone number
///
/// At most one challenge exists per phone; issuing a new one replaces the old
/// one together with its payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    /// The zero-padded 6-digit code
    pub code: String,

    /// Timestamp when the challenge was issued
    pub created_at: DateTime<Utc>,

    /// Timestamp after which the challenge can no longer be verified
    pub expires_at: DateTime<Utc>,

    /// Caller-supplied context returned on successful verification
    pub payload: OtpPayload,
}

impl Challenge {
    /// Creates a challenge issued at `now` that lives for `ttl`
    ///
    /// A lifetime reaching past the representable range never expires.
    pub fn new(code: String, payload: OtpPayload, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            code,
            created_at: now,
            expires_at: now.checked_add_signed(ttl).unwrap_or(DateTime::<Utc>::MAX_UTC),
            payload,
        }
    }

    /// Formats a number drawn from `0..CODE_SPACE` as a zero-padded code
    pub fn format_code(value: u32) -> String {
        format!("{:0width$}", value % CODE_SPACE, width = CODE_LENGTH)
    }

    /// A challenge is expired strictly after its expiry instant
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Exact string comparison against the submitted code
    pub fn matches(&self, submitted: &str) -> bool {
        self.code == submitted
    }

    /// Consumes the challenge, yielding its payload
    pub fn into_payload(self) -> OtpPayload {
        self.payload
    }
}
