//! Traits for SMS delivery integration

use async_trait::async_trait;

/// Trait for SMS service integration
#[async_trait]
pub trait SmsServiceTrait: Send + Sync {
    /// Send a verification code via SMS, returning the provider message id
    async fn send_verification_code(&self, phone: &str, code: &str) -> Result<String, String>;
}
