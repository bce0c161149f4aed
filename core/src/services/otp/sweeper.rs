//! Periodic removal of expired challenges
//!
//! Expiry is still enforced lazily by the store; the sweeper only bounds
//! memory held by challenges nobody comes back for.

use std::sync::Arc;
use std::time::Duration;

use sb_shared::config::OtpConfig;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::store::OtpSessionStore;

/// Configuration for the challenge sweeper
#[derive(Debug, Clone)]
pub struct SweeperConfig {
    /// How often to sweep
    pub interval: Duration,
    /// Whether the background task runs at all
    pub enabled: bool,
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(300),
            enabled: true,
        }
    }
}

impl From<&OtpConfig> for SweeperConfig {
    fn from(config: &OtpConfig) -> Self {
        Self {
            // A zero period would make tokio::time::interval panic
            interval: Duration::from_secs(config.sweep_interval_seconds.max(1)),
            enabled: config.sweep_enabled,
        }
    }
}

/// Background sweeper for an [`OtpSessionStore`]
pub struct ChallengeSweeper {
    store: Arc<OtpSessionStore>,
    config: SweeperConfig,
}

impl ChallengeSweeper {
    pub fn new(store: Arc<OtpSessionStore>, config: SweeperConfig) -> Self {
        Self { store, config }
    }

    /// Run a single sweep, returning the number of challenges removed
    pub fn run_once(&self) -> usize {
        let removed = self.store.sweep_expired();
        if removed > 0 {
            info!(
                removed = removed,
                remaining = self.store.pending_count(),
                event = "otp_sweep",
                "Removed expired one-time codes"
            );
        } else {
            debug!(event = "otp_sweep", "No expired one-time codes to remove");
        }
        removed
    }

    /// Start the sweeper as a background task
    ///
    /// Returns `None` when the sweeper is disabled. Must be called from within
    /// a tokio runtime.
    pub fn start_background_task(self: Arc<Self>) -> Option<JoinHandle<()>> {
        if !self.config.enabled {
            warn!("Challenge sweeper is disabled");
            return None;
        }

        let period = self.config.interval;
        Some(tokio::spawn(async move {
            info!(
                "Challenge sweeper started - will run every {} seconds",
                period.as_secs()
            );

            let mut interval_timer = tokio::time::interval(period);
            // The first tick completes immediately
            interval_timer.tick().await;

            loop {
                interval_timer.tick().await;
                self.run_once();
            }
        }))
    }
}
