//! SMS delivery configuration

use serde::{Deserialize, Serialize};

/// SMS service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmsConfig {
    /// SMS service provider ("console", "http")
    pub provider: String,

    /// Gateway endpoint for the HTTP provider
    #[serde(default)]
    pub gateway_url: Option<String>,

    /// API key sent as a bearer token to the gateway
    #[serde(default)]
    pub api_key: String,

    /// Sender id shown to the recipient
    pub sender_id: String,

    /// Gateway request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            provider: String::from("console"),
            gateway_url: None,
            api_key: String::new(),
            sender_id: String::from("SPRTBR"),
            timeout_seconds: default_timeout(),
        }
    }
}

impl SmsConfig {
    /// Load SMS configuration from `SMS_*` environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            provider: std::env::var("SMS_PROVIDER").unwrap_or(defaults.provider),
            gateway_url: std::env::var("SMS_GATEWAY_URL").ok(),
            api_key: std::env::var("SMS_API_KEY").unwrap_or_default(),
            sender_id: std::env::var("SMS_SENDER_ID").unwrap_or(defaults.sender_id),
            timeout_seconds: super::env_parse("SMS_TIMEOUT_SECONDS")
                .unwrap_or(defaults.timeout_seconds),
        }
    }
}

fn default_timeout() -> u64 {
    10
}
