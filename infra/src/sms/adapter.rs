//! Adapter from infrastructure SMS providers onto the core SMS port

use async_trait::async_trait;
use std::sync::Arc;

use sb_core::services::otp::SmsServiceTrait;
use sb_shared::config::OtpConfig;

use crate::sms::sms_service::SmsService;

/// Implements the core `SmsServiceTrait` for any [`SmsService`]
///
/// The code lifetime quoted in the message text defaults to the standard
/// OTP lifetime; set it with [`with_code_ttl_minutes`](Self::with_code_ttl_minutes)
/// when the store is configured differently.
pub struct SmsServiceAdapter<S: SmsService + ?Sized = dyn SmsService> {
    inner: Arc<S>,
    code_ttl_minutes: u64,
}

impl<S: SmsService + ?Sized> SmsServiceAdapter<S> {
    pub fn new(inner: Arc<S>) -> Self {
        Self {
            inner,
            code_ttl_minutes: OtpConfig::default().code_ttl_minutes(),
        }
    }

    pub fn with_code_ttl_minutes(mut self, minutes: u64) -> Self {
        self.code_ttl_minutes = minutes;
        self
    }

    pub fn code_ttl_minutes(&self) -> u64 {
        self.code_ttl_minutes
    }

    pub fn provider_name(&self) -> &str {
        self.inner.provider_name()
    }

    pub async fn is_available(&self) -> bool {
        self.inner.is_available().await
    }
}

#[async_trait]
impl<S: SmsService + ?Sized> SmsServiceTrait for SmsServiceAdapter<S> {
    async fn send_verification_code(&self, phone: &str, code: &str) -> Result<String, String> {
        self.inner
            .send_verification_code(phone, code, self.code_ttl_minutes)
            .await
            .map_err(|e| e.to_string())
    }
}
