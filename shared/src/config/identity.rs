//! Identity document configuration

use serde::{Deserialize, Serialize};

const DEV_PEPPER: &str = "DEV_PEPPER";

/// Settings for hashing national identity numbers before lookup or storage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// Secret prefix mixed into every Aadhaar hash
    pub aadhaar_pepper: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            aadhaar_pepper: String::from(DEV_PEPPER),
        }
    }
}

impl IdentityConfig {
    /// Load from `AADHAAR_PEPPER`, falling back to the development pepper
    pub fn from_env() -> Self {
        match std::env::var("AADHAAR_PEPPER") {
            Ok(pepper) if !pepper.is_empty() => Self {
                aadhaar_pepper: pepper,
            },
            _ => Self::default(),
        }
    }

    /// Whether the development pepper is still in use
    pub fn uses_dev_pepper(&self) -> bool {
        self.aadhaar_pepper == DEV_PEPPER
    }
}
