//! Session token and password configuration

use serde::{Deserialize, Serialize};

use super::env_parse;

const DEV_JWT_SECRET: &str = "CHANGE_ME_DEV_JWT_SECRET";

/// JWT session token configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// HMAC secret used to sign session tokens
    pub secret: String,

    /// Session token lifetime in seconds
    #[serde(default = "default_token_expiry")]
    pub access_token_expiry: u64,

    /// JWT issuer claim
    #[serde(default = "default_issuer")]
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEV_JWT_SECRET),
            access_token_expiry: default_token_expiry(),
            issuer: default_issuer(),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Load from `JWT_SECRET`, `JWT_TTL_SECONDS` and `JWT_ISSUER`
    pub fn from_env() -> Self {
        let mut config = match std::env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => Self::new(secret),
            _ => Self::default(),
        };
        if let Some(ttl) = env_parse("JWT_TTL_SECONDS") {
            config.access_token_expiry = ttl;
        }
        if let Ok(issuer) = std::env::var("JWT_ISSUER") {
            if !issuer.trim().is_empty() {
                config.issuer = issuer.trim().to_string();
            }
        }
        config
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEV_JWT_SECRET
    }
}

/// Password login settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PasswordConfig {
    /// bcrypt work factor
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,

    /// Minimum password length in characters
    #[serde(default = "default_min_length")]
    pub min_length: usize,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: default_bcrypt_cost(),
            min_length: default_min_length(),
        }
    }
}

impl PasswordConfig {
    /// Apply the `BCRYPT_COST` override
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(cost) = env_parse("BCRYPT_COST") {
            self.bcrypt_cost = cost;
        }
        self
    }
}

fn default_token_expiry() -> u64 {
    604_800 // 7 days
}

fn default_issuer() -> String {
    String::from("sportsbridge")
}

fn default_bcrypt_cost() -> u32 {
    10
}

fn default_min_length() -> usize {
    6
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_defaults() {
        let config = JwtConfig::default();
        assert!(config.is_using_default_secret());
        assert_eq!(config.access_token_expiry, 7 * 24 * 60 * 60);
        assert_eq!(config.issuer, "sportsbridge");
        assert!(!JwtConfig::new("prod-secret").is_using_default_secret());
    }

    #[test]
    fn test_password_deserialize_partial() {
        let config: PasswordConfig = serde_json::from_str(r#"{"bcrypt_cost": 4}"#).unwrap();
        assert_eq!(config.bcrypt_cost, 4);
        assert_eq!(config.min_length, 6);
    }
}
