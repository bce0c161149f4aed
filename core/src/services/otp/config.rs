//! Configuration for the one-time code session store

use chrono::Duration;
use sb_shared::config::OtpConfig;

use crate::domain::entities::challenge::DEFAULT_TTL_MINUTES;

/// Lifetime and quota settings for [`OtpSessionStore`](super::OtpSessionStore)
#[derive(Debug, Clone)]
pub struct OtpStoreConfig {
    /// How long an issued code stays valid
    pub code_ttl: Duration,
    /// Length of the shared quota window
    pub window: Duration,
    /// Maximum issuances per phone number within one window
    pub max_per_phone: u32,
    /// Maximum issuances per client IP within one window
    pub max_per_ip: u32,
}

impl Default for OtpStoreConfig {
    fn default() -> Self {
        Self {
            code_ttl: Duration::minutes(DEFAULT_TTL_MINUTES),
            window: Duration::minutes(10),
            max_per_phone: 5,
            max_per_ip: 20,
        }
    }
}

impl From<&OtpConfig> for OtpStoreConfig {
    fn from(config: &OtpConfig) -> Self {
        Self {
            code_ttl: Duration::seconds(saturating_secs(config.code_ttl_seconds)),
            window: Duration::seconds(saturating_secs(config.window_seconds)),
            max_per_phone: config.max_per_phone,
            max_per_ip: config.max_per_ip,
        }
    }
}

// chrono durations are bounded by i64::MAX milliseconds
fn saturating_secs(seconds: u64) -> i64 {
    i64::try_from(seconds).unwrap_or(i64::MAX).min(i64::MAX / 1_000)
}
