//! Aadhaar number hashing

use sha2::{Digest, Sha256};

use sb_shared::config::IdentityConfig;

/// Hashes Aadhaar numbers with a server-side pepper
///
/// Only the hash is ever stored on a user; the raw number lives no longer
/// than the pending signup challenge that carries it.
#[derive(Clone)]
pub struct AadhaarHasher {
    pepper: String,
}

impl AadhaarHasher {
    pub fn new(pepper: impl Into<String>) -> Self {
        Self {
            pepper: pepper.into(),
        }
    }

    /// Lowercase hex SHA-256 of `pepper || aadhaar`
    pub fn hash(&self, aadhaar: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.pepper.as_bytes());
        hasher.update(aadhaar.as_bytes());
        hex::encode(hasher.finalize())
    }
}

impl From<&IdentityConfig> for AadhaarHasher {
    fn from(config: &IdentityConfig) -> Self {
        Self::new(config.aadhaar_pepper.clone())
    }
}

impl std::fmt::Debug for AadhaarHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AadhaarHasher")
            .field("pepper", &"[REDACTED]")
            .finish()
    }
}
