//! Configuration for the token service

use chrono::Duration;
use sb_shared::config::JwtConfig;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// Issuer written into and required from every token
    pub issuer: String,
    /// Session token lifetime
    pub access_token_expiry: Duration,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self::from(&JwtConfig::default())
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(config: &JwtConfig) -> Self {
        let seconds = i64::try_from(config.access_token_expiry)
            .unwrap_or(i64::MAX)
            .min(i64::MAX / 1_000);
        Self {
            jwt_secret: config.secret.clone(),
            issuer: config.issuer.clone(),
            access_token_expiry: Duration::seconds(seconds),
        }
    }
}
