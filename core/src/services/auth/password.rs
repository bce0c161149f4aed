//! Password hashing for password login

use sb_shared::config::PasswordConfig;

use crate::errors::{AuthError, DomainError, DomainResult};

/// bcrypt hashing plus the minimum-length rule
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    cost: u32,
    min_length: usize,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::from(&PasswordConfig::default())
    }
}

impl PasswordHasher {
    pub fn new(cost: u32, min_length: usize) -> Self {
        Self { cost, min_length }
    }

    pub fn min_length(&self) -> usize {
        self.min_length
    }

    /// Checks the length rule and returns the bcrypt hash of `password`
    pub fn hash(&self, password: &str) -> DomainResult<String> {
        if password.chars().count() < self.min_length {
            return Err(AuthError::PasswordTooShort {
                min_length: self.min_length,
            }
            .into());
        }
        bcrypt::hash(password, self.cost).map_err(|e| DomainError::Internal {
            message: format!("Password hashing failed: {}", e),
        })
    }

    /// A malformed stored hash never matches
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        bcrypt::verify(password, hash).unwrap_or(false)
    }
}

impl From<&PasswordConfig> for PasswordHasher {
    fn from(config: &PasswordConfig) -> Self {
        Self::new(config.bcrypt_cost, config.min_length)
    }
}
