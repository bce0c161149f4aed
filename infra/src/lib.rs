//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the SportsBridge server.
//! It provides concrete implementations of the ports declared in `sb_core`.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **SMS**: a console provider for development and an HTTP gateway provider,
//!   plus the adapter onto the core SMS port
//! - **Repositories**: an in-memory user repository

// Re-export core types for convenience
pub use sb_core::errors::*;

/// SMS service module - SMS providers
pub mod sms;

/// Repository implementations
pub mod repositories;

pub use repositories::InMemoryUserRepository;
pub use sms::{create_sms_service, ConsoleSmsService, HttpSmsService, SmsService, SmsServiceAdapter};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// SMS service error
    #[error("SMS service error: {0}")]
    Sms(String),
}
