//! Phone authentication module
//!
//! Signup and login are both two-step flows over the one-time code service:
//! the start step validates identity data and issues a code carrying the
//! flow context, and `verify` completes whichever flow the code was issued for.
//! Both end in a session token. A signed-in user may also set a password and
//! later sign in with phone and password instead of a code.

mod identity;
mod password;
mod service;
mod types;

#[cfg(test)]
mod tests;

pub use identity::AadhaarHasher;
pub use password::PasswordHasher;
pub use service::PhoneAuthService;
pub use types::{
    AuthenticatedSession, LoginRequest, SignupRequest, VerificationFlow, VerificationOutcome,
};
