//! Shared utilities and common types for the SportsBridge server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Error response structures
//! - Utility functions (phone and Aadhaar validation, masking)
//! - Health check response types

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, Environment, IdentityConfig, LoggingConfig, OtpConfig, ServerConfig, SmsConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use types::{HealthResponse, HealthStatus, ServiceHealth};
pub use utils::{phone, validation};
