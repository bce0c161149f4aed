//! Domain entities representing core business objects.

pub mod challenge;
pub mod token;
pub mod user;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use challenge::{Challenge, OtpPayload, CODE_LENGTH, DEFAULT_TTL_MINUTES};
pub use token::Claims;
pub use user::{User, UserRole};
