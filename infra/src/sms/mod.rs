//! SMS Service Module
//!
//! SMS delivery for one-time codes. Providers implement [`SmsService`];
//! [`SmsServiceAdapter`] exposes any of them through the core
//! `SmsServiceTrait` port.
//!
//! ## Providers
//!
//! - **Console**: logs messages instead of sending them (development)
//! - **HTTP**: posts messages to a JSON gateway with a bearer key

use std::sync::Arc;

use sb_shared::config::SmsConfig;

pub mod adapter;
pub mod console_sms;
pub mod http_sms;
pub mod sms_service;

// Re-export commonly used types
pub use adapter::SmsServiceAdapter;
pub use console_sms::ConsoleSmsService;
pub use http_sms::{HttpSmsConfig, HttpSmsService};
pub use sms_service::{verification_message, SmsService};

#[cfg(test)]
mod tests;

/// Create an SMS service based on configuration
///
/// `console` (also `mock` and `log`) selects the console provider and
/// `http` the gateway provider. An unknown provider, or an HTTP provider that
/// cannot be built, falls back to the console provider with an error log.
pub fn create_sms_service(config: &SmsConfig) -> Arc<dyn SmsService> {
    match config.provider.trim().to_lowercase().as_str() {
        "console" | "mock" | "log" => Arc::new(ConsoleSmsService::new()),
        "http" => match HttpSmsConfig::try_from(config).and_then(HttpSmsService::new) {
            Ok(service) => Arc::new(service),
            Err(e) => {
                tracing::error!("Failed to initialize HTTP SMS service: {}", e);
                tracing::warn!("Falling back to console SMS service");
                Arc::new(ConsoleSmsService::new())
            }
        },
        _ => {
            tracing::warn!(
                "Unknown SMS provider '{}', using console implementation",
                config.provider
            );
            Arc::new(ConsoleSmsService::new())
        }
    }
}
