//! One-time code module for phone-based authentication
//!
//! This module provides the one-time code workflow:
//! - An in-memory session store keyed by phone number
//! - Fixed-window issuance quotas per phone and per client IP
//! - Single-use verification with lazy expiry
//! - SMS delivery that never fails issuance
//! - An optional background sweep of expired challenges

mod config;
mod service;
mod sources;
mod store;
mod sweeper;
mod traits;
mod types;
mod window;

#[cfg(test)]
mod tests;

pub use config::OtpStoreConfig;
pub use service::OtpService;
pub use sources::{
    Clock, CodeGenerator, ManualClock, RandomCodeGenerator, SequenceCodeGenerator, SystemClock,
};
pub use store::OtpSessionStore;
pub use sweeper::{ChallengeSweeper, SweeperConfig};
pub use traits::SmsServiceTrait;
pub use types::IssuedChallenge;
