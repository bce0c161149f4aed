//! Console SMS provider for development
//!
//! Messages are written to the log instead of being delivered.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use sb_shared::phone::{is_valid_phone, mask_phone_number};

use crate::sms::sms_service::SmsService;
use crate::InfrastructureError;

/// SMS provider that logs instead of sending
#[derive(Debug, Default)]
pub struct ConsoleSmsService {
    message_count: AtomicUsize,
    simulate_failure: AtomicBool,
}

impl ConsoleSmsService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent send fail until switched off again
    pub fn set_simulate_failure(&self, fail: bool) {
        self.simulate_failure.store(fail, Ordering::SeqCst);
    }

    pub fn get_message_count(&self) -> usize {
        self.message_count.load(Ordering::SeqCst)
    }

    pub fn reset_counter(&self) {
        self.message_count.store(0, Ordering::SeqCst);
    }
}

#[async_trait]
impl SmsService for ConsoleSmsService {
    async fn send_sms(&self, phone_number: &str, message: &str) -> Result<String, InfrastructureError> {
        if !is_valid_phone(phone_number) {
            return Err(InfrastructureError::Sms(format!(
                "Invalid phone number: {}",
                mask_phone_number(phone_number)
            )));
        }
        if self.simulate_failure.load(Ordering::SeqCst) {
            return Err(InfrastructureError::Sms("Simulated SMS failure".to_string()));
        }

        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;
        let message_id = format!("console_{}", uuid::Uuid::new_v4());

        tracing::info!(
            phone = %mask_phone_number(phone_number),
            message_id = %message_id,
            count = count,
            "[console sms] message accepted"
        );
        tracing::debug!(phone = %mask_phone_number(phone_number), "[console sms] {}", message);

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "Console"
    }

    async fn is_available(&self) -> bool {
        !self.simulate_failure.load(Ordering::SeqCst)
    }
}
