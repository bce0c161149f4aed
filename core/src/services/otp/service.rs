//! One-time code service: session store plus SMS delivery

use std::sync::Arc;

use sb_shared::phone::mask_phone_number;

use crate::domain::entities::challenge::OtpPayload;
use crate::errors::OtpError;

use super::store::OtpSessionStore;
use super::traits::SmsServiceTrait;
use super::types::IssuedChallenge;

/// Issues codes through the session store and delivers them by SMS
pub struct OtpService<S: SmsServiceTrait> {
    /// Shared session store
    store: Arc<OtpSessionStore>,
    /// SMS service for sending messages
    sms_service: Arc<S>,
}

impl<S: SmsServiceTrait + 'static> OtpService<S> {
    /// Create a new OTP service
    ///
    /// # Arguments
    ///
    /// * `store` - Session store, usually shared with the sweeper
    /// * `sms_service` - SMS service implementation
    pub fn new(store: Arc<OtpSessionStore>, sms_service: Arc<S>) -> Self {
        Self { store, sms_service }
    }

    pub fn store(&self) -> &Arc<OtpSessionStore> {
        &self.store
    }

    /// Issue a code for `phone` and send it
    ///
    /// Delivery runs on a spawned task so the caller never waits on the SMS
    /// provider. A failed send is logged and the code stays valid.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - Opaque transaction id
    /// * `Err(OtpError::RateLimited)` - Quota exhausted for the phone or IP
    pub async fn issue(
        &self,
        phone: &str,
        client_ip: &str,
        payload: OtpPayload,
    ) -> Result<String, OtpError> {
        let IssuedChallenge {
            transaction_id,
            code,
            ..
        } = self.store.issue(phone, client_ip, payload)?;

        let sms_service = Arc::clone(&self.sms_service);
        let phone = phone.to_string();
        let tx_id = transaction_id.clone();
        tokio::spawn(async move {
            match sms_service.send_verification_code(&phone, &code).await {
                Ok(message_id) => {
                    tracing::info!(
                        phone = %mask_phone_number(&phone),
                        transaction_id = %tx_id,
                        message_id = %message_id,
                        event = "otp_sms_sent",
                        "One-time code sent via SMS"
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        phone = %mask_phone_number(&phone),
                        transaction_id = %tx_id,
                        error = %e,
                        event = "otp_sms_failed",
                        "SMS delivery failed, code remains valid"
                    );
                }
            }
        });

        Ok(transaction_id)
    }

    /// Verify a submitted code; see [`OtpSessionStore::verify`]
    pub fn verify(&self, phone: &str, code: &str) -> Result<OtpPayload, OtpError> {
        self.store.verify(phone, code)
    }

    /// Pending code for `phone`; see [`OtpSessionStore::peek`]
    pub fn peek(&self, phone: &str) -> Option<String> {
        let code = self.store.peek(phone);
        tracing::debug!(
            phone = %mask_phone_number(phone),
            found = code.is_some(),
            event = "otp_peeked",
            "Diagnostic peek at pending code"
        );
        code
    }
}
