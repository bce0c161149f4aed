//! In-memory session store for phone one-time codes

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use sb_shared::phone::mask_phone_number;
use uuid::Uuid;

use crate::domain::entities::challenge::{Challenge, OtpPayload};
use crate::errors::OtpError;

use super::config::OtpStoreConfig;
use super::sources::{Clock, CodeGenerator, RandomCodeGenerator, SystemClock};
use super::types::IssuedChallenge;
use super::window::IssuanceWindow;

/// Session store holding at most one pending challenge per phone number
///
/// The store never blocks on I/O and never awaits. Challenges expire lazily:
/// an expired entry is removed the next time `verify` or `peek` touches it,
/// or when [`sweep_expired`](Self::sweep_expired) runs.
///
/// Lock order is window then challenges; only `issue` takes both.
pub struct OtpSessionStore {
    config: OtpStoreConfig,
    clock: Arc<dyn Clock>,
    codes: Arc<dyn CodeGenerator>,
    challenges: Mutex<HashMap<String, Challenge>>,
    window: Mutex<IssuanceWindow>,
}

impl OtpSessionStore {
    /// Create a store backed by the wall clock and the OS random source
    pub fn new(config: OtpStoreConfig) -> Self {
        Self::with_sources(config, Arc::new(SystemClock), Arc::new(RandomCodeGenerator))
    }

    /// Create a store with explicit time and code sources
    pub fn with_sources(
        config: OtpStoreConfig,
        clock: Arc<dyn Clock>,
        codes: Arc<dyn CodeGenerator>,
    ) -> Self {
        let window = IssuanceWindow::new(clock.now());
        Self {
            config,
            clock,
            codes,
            challenges: Mutex::new(HashMap::new()),
            window: Mutex::new(window),
        }
    }

    pub fn config(&self) -> &OtpStoreConfig {
        &self.config
    }

    /// Issue a fresh challenge for `phone`, replacing any pending one
    ///
    /// # Errors
    ///
    /// * `OtpError::RateLimited` - the phone or the client IP has used up its
    ///   quota for the current window; no counter is incremented
    pub fn issue(
        &self,
        phone: &str,
        client_ip: &str,
        payload: OtpPayload,
    ) -> Result<IssuedChallenge, OtpError> {
        let now = self.clock.now();
        let mut window = lock(&self.window);

        if window.rotate_if_elapsed(now, self.config.window) {
            tracing::debug!(
                window_start = %window.started_at(),
                event = "otp_window_reset",
                "Issuance window elapsed, counters cleared"
            );
        }

        if let Err(e) = window.check(
            phone,
            client_ip,
            self.config.max_per_phone,
            self.config.max_per_ip,
        ) {
            tracing::warn!(
                phone = %mask_phone_number(phone),
                client_ip = client_ip,
                error = %e,
                event = "otp_rate_limited",
                "One-time code request rejected by quota"
            );
            return Err(e);
        }

        let code = Challenge::format_code(self.codes.next_code());
        let challenge = Challenge::new(code.clone(), payload, now, self.config.code_ttl);
        let expires_at = challenge.expires_at;

        let replaced = lock(&self.challenges)
            .insert(phone.to_string(), challenge)
            .is_some();
        window.record(phone, client_ip);

        let transaction_id = Uuid::new_v4().to_string();
        tracing::info!(
            phone = %mask_phone_number(phone),
            transaction_id = %transaction_id,
            replaced_pending = replaced,
            expires_at = %expires_at,
            event = "otp_issued",
            "Issued one-time code"
        );

        Ok(IssuedChallenge {
            transaction_id,
            code,
            expires_at,
        })
    }

    /// Consume the pending challenge for `phone` if `submitted` matches
    ///
    /// # Errors
    ///
    /// * `OtpError::NotFound` - nothing pending for this phone
    /// * `OtpError::Expired` - the challenge aged out; it is removed
    /// * `OtpError::Invalid` - wrong code; the challenge stays pending
    pub fn verify(&self, phone: &str, submitted: &str) -> Result<OtpPayload, OtpError> {
        let now = self.clock.now();
        let mut challenges = lock(&self.challenges);

        let (expired, matches) = match challenges.get(phone) {
            Some(challenge) => (challenge.is_expired_at(now), challenge.matches(submitted)),
            None => {
                tracing::info!(
                    phone = %mask_phone_number(phone),
                    event = "otp_not_found",
                    "Verification attempted without a pending code"
                );
                return Err(OtpError::NotFound);
            }
        };

        if expired {
            challenges.remove(phone);
            tracing::info!(
                phone = %mask_phone_number(phone),
                event = "otp_expired",
                "Verification attempted with an expired code"
            );
            return Err(OtpError::Expired);
        }

        if !matches {
            tracing::warn!(
                phone = %mask_phone_number(phone),
                event = "otp_invalid",
                "Verification attempted with a wrong code"
            );
            return Err(OtpError::Invalid);
        }

        let payload = challenges
            .remove(phone)
            .map(Challenge::into_payload)
            .unwrap_or_default();

        tracing::info!(
            phone = %mask_phone_number(phone),
            event = "otp_verified",
            "One-time code verified"
        );
        Ok(payload)
    }

    /// Return the pending code for `phone` without consuming it
    ///
    /// Diagnostic only. An expired challenge found here is removed.
    pub fn peek(&self, phone: &str) -> Option<String> {
        let now = self.clock.now();
        let mut challenges = lock(&self.challenges);

        let expired = challenges.get(phone)?.is_expired_at(now);
        if expired {
            challenges.remove(phone);
            return None;
        }
        challenges.get(phone).map(|challenge| challenge.code.clone())
    }

    /// Remove every expired challenge, returning how many were dropped
    ///
    /// Counters and live challenges are left alone.
    pub fn sweep_expired(&self) -> usize {
        let now = self.clock.now();
        let mut challenges = lock(&self.challenges);
        let before = challenges.len();
        challenges.retain(|_, challenge| !challenge.is_expired_at(now));
        before - challenges.len()
    }

    /// Number of stored challenges, expired ones included until they are touched
    pub fn pending_count(&self) -> usize {
        lock(&self.challenges).len()
    }
}

// The guarded data is plain maps, so a panic elsewhere cannot leave it half-written.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
