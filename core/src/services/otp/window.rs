//! Fixed-window issuance counters
//!
//! One window start is shared by every key. When the window elapses both
//! counter maps are cleared at once, so quotas reset on a global tick rather
//! than per phone or per IP.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;

use crate::errors::{OtpError, QuotaScope};

#[derive(Debug)]
pub(crate) struct IssuanceWindow {
    started_at: DateTime<Utc>,
    per_phone: HashMap<String, u32>,
    per_ip: HashMap<String, u32>,
}

impl IssuanceWindow {
    pub(crate) fn new(now: DateTime<Utc>) -> Self {
        Self {
            started_at: now,
            per_phone: HashMap::new(),
            per_ip: HashMap::new(),
        }
    }

    /// Clears every counter once `length` has elapsed since the window start.
    /// Returns whether a reset happened.
    pub(crate) fn rotate_if_elapsed(&mut self, now: DateTime<Utc>, length: Duration) -> bool {
        if now - self.started_at < length {
            return false;
        }
        self.per_phone.clear();
        self.per_ip.clear();
        self.started_at = now;
        true
    }

    /// Phone quota is checked before the IP quota; the first one exhausted wins.
    pub(crate) fn check(
        &self,
        phone: &str,
        client_ip: &str,
        max_per_phone: u32,
        max_per_ip: u32,
    ) -> Result<(), OtpError> {
        if self.phone_count(phone) >= max_per_phone {
            return Err(OtpError::RateLimited {
                scope: QuotaScope::Phone,
            });
        }
        if self.ip_count(client_ip) >= max_per_ip {
            return Err(OtpError::RateLimited {
                scope: QuotaScope::Ip,
            });
        }
        Ok(())
    }

    pub(crate) fn record(&mut self, phone: &str, client_ip: &str) {
        *self.per_phone.entry(phone.to_string()).or_insert(0) += 1;
        *self.per_ip.entry(client_ip.to_string()).or_insert(0) += 1;
    }

    pub(crate) fn phone_count(&self, phone: &str) -> u32 {
        self.per_phone.get(phone).copied().unwrap_or(0)
    }

    pub(crate) fn ip_count(&self, client_ip: &str) -> u32 {
        self.per_ip.get(client_ip).copied().unwrap_or(0)
    }

    pub(crate) fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}
