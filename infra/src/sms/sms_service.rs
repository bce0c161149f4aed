//! SMS service trait shared by all providers

use async_trait::async_trait;

use crate::InfrastructureError;

/// Build the verification text sent to the user
pub fn verification_message(code: &str, ttl_minutes: u64) -> String {
    let unit = if ttl_minutes == 1 { "minute" } else { "minutes" };
    format!(
        "Your SportsBridge verification code is: {}. This code will expire in {} {}.",
        code, ttl_minutes, unit
    )
}

/// Common interface for SMS providers
#[async_trait]
pub trait SmsService: Send + Sync {
    /// Send a raw message, returning the provider message id
    async fn send_sms(&self, phone_number: &str, message: &str) -> Result<String, InfrastructureError>;

    /// Send a verification code using the standard message template
    async fn send_verification_code(
        &self,
        phone_number: &str,
        code: &str,
        ttl_minutes: u64,
    ) -> Result<String, InfrastructureError> {
        self.send_sms(phone_number, &verification_message(code, ttl_minutes))
            .await
    }

    /// Human-readable provider name
    fn provider_name(&self) -> &str;

    /// Whether the provider currently accepts messages
    async fn is_available(&self) -> bool {
        true
    }
}
