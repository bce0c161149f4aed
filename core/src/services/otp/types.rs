//! Types for one-time code issuance results

use chrono::{DateTime, Utc};

/// Result of issuing a challenge
#[derive(Debug, Clone)]
pub struct IssuedChallenge {
    /// Opaque id handed back to the caller; nothing is looked up by it
    pub transaction_id: String,
    /// The code to deliver to the phone
    pub code: String,
    /// When the challenge stops being verifiable
    pub expires_at: DateTime<Utc>,
}
