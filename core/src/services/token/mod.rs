//! Token service module for session JWTs
//!
//! Successful phone verification and password login both end in a signed
//! HS256 session token naming the user, their phone and their role.

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::TokenServiceConfig;
pub use service::TokenService;
