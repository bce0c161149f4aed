//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical business areas:
//! - `auth` - Session token signing and password settings
//! - `environment` - Environment detection and logging configuration
//! - `identity` - Identity document hashing settings
//! - `otp` - One-time code lifetime and issuance quotas
//! - `server` - HTTP server configuration
//! - `sms` - SMS delivery provider settings

pub mod auth;
pub mod environment;
pub mod identity;
pub mod otp;
pub mod server;
pub mod sms;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use auth::{JwtConfig, PasswordConfig};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use identity::IdentityConfig;
pub use otp::OtpConfig;
pub use server::ServerConfig;
pub use sms::SmsConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// One-time code configuration
    pub otp: OtpConfig,

    /// SMS delivery configuration
    pub sms: SmsConfig,

    /// Identity hashing configuration
    pub identity: IdentityConfig,

    /// Session token configuration
    #[serde(default)]
    pub jwt: JwtConfig,

    /// Password login configuration
    #[serde(default)]
    pub password: PasswordConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            otp: OtpConfig::default(),
            sms: SmsConfig::default(),
            identity: IdentityConfig::default(),
            jwt: JwtConfig::default(),
            password: PasswordConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Create configuration for development environment
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig::new("127.0.0.1", 8080),
            otp: OtpConfig::development(),
            sms: SmsConfig::default(),
            identity: IdentityConfig::default(),
            jwt: JwtConfig::default(),
            password: PasswordConfig::default(),
            logging: LoggingConfig::for_environment(Environment::Development),
        }
    }

    /// Create configuration for production environment
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig::new("0.0.0.0", 8080),
            otp: OtpConfig::production(),
            sms: SmsConfig::default(),
            identity: IdentityConfig::default(),
            jwt: JwtConfig::default(),
            password: PasswordConfig::default(),
            logging: LoggingConfig::for_environment(Environment::Production),
        }
    }

    /// Load configuration from environment
    ///
    /// Starts from the preset for the detected environment and applies any
    /// explicit variable overrides on top of it.
    pub fn from_env() -> Self {
        let env = Environment::from_env();
        let mut config = match env {
            Environment::Development => Self::development(),
            Environment::Production => Self::production(),
            Environment::Staging => {
                let mut config = Self::development();
                config.environment = Environment::Staging;
                config.logging = LoggingConfig::for_environment(Environment::Staging);
                config
            }
        };

        config.server = config.server.with_env_overrides();
        config.otp = config.otp.with_env_overrides();
        config.sms = SmsConfig::from_env();
        config.identity = IdentityConfig::from_env();
        config.jwt = JwtConfig::from_env();
        config.password = config.password.with_env_overrides();
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            config.logging.level = level;
        }
        config
    }
}

/// Read an environment variable and parse it, ignoring unset or malformed values
pub(crate) fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|value| value.trim().parse().ok())
}
