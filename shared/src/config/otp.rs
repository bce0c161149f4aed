//! One-time code configuration module
//!
//! Issuance quotas are enforced over a fixed window shared by every phone and
//! every client IP: when the window elapses all counters are cleared at once.

use serde::{Deserialize, Serialize};

use super::env_parse;

/// One-time code lifetime, issuance quotas and sweeping
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Seconds a code stays valid after issuance
    #[serde(default = "default_code_ttl")]
    pub code_ttl_seconds: u64,

    /// Length of the shared quota window in seconds
    #[serde(default = "default_window")]
    pub window_seconds: u64,

    /// Max codes issued per phone number within one window
    #[serde(default = "default_max_per_phone")]
    pub max_per_phone: u32,

    /// Max codes issued per client IP within one window
    #[serde(default = "default_max_per_ip")]
    pub max_per_ip: u32,

    /// Periodically drop expired challenges nobody came back for
    #[serde(default = "default_sweep_enabled")]
    pub sweep_enabled: bool,

    /// Seconds between sweeps
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_seconds: u64,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            code_ttl_seconds: default_code_ttl(),
            window_seconds: default_window(),
            max_per_phone: default_max_per_phone(),
            max_per_ip: default_max_per_ip(),
            sweep_enabled: default_sweep_enabled(),
            sweep_interval_seconds: default_sweep_interval(),
        }
    }
}

impl OtpConfig {
    /// Development configuration (same limits, more frequent sweeping)
    pub fn development() -> Self {
        Self {
            sweep_interval_seconds: 60,
            ..Default::default()
        }
    }

    /// Production configuration
    pub fn production() -> Self {
        Self::default()
    }

    /// Apply `OTP_*` environment variable overrides
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(ttl) = env_parse("OTP_TTL_SECONDS") {
            self.code_ttl_seconds = ttl;
        }
        if let Some(window) = env_parse("OTP_WINDOW_SECONDS") {
            self.window_seconds = window;
        }
        if let Some(max) = env_parse("OTP_MAX_PER_PHONE") {
            self.max_per_phone = max;
        }
        if let Some(max) = env_parse("OTP_MAX_PER_IP") {
            self.max_per_ip = max;
        }
        if let Some(enabled) = env_parse("OTP_SWEEP_ENABLED") {
            self.sweep_enabled = enabled;
        }
        if let Some(interval) = env_parse("OTP_SWEEP_INTERVAL_SECONDS") {
            self.sweep_interval_seconds = interval;
        }
        self
    }

    /// Code lifetime in minutes, rounded up, for user-facing messages
    pub fn code_ttl_minutes(&self) -> u64 {
        self.code_ttl_seconds.div_ceil(60)
    }
}

fn default_code_ttl() -> u64 {
    600 // 10 minutes
}

fn default_window() -> u64 {
    600 // 10 minutes
}

fn default_max_per_phone() -> u32 {
    5
}

fn default_max_per_ip() -> u32 {
    20
}

fn default_sweep_enabled() -> bool {
    true
}

fn default_sweep_interval() -> u64 {
    300
}
