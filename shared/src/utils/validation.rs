//! Identity document validation

use once_cell::sync::Lazy;
use regex::Regex;

static AADHAAR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{12}$").expect("Aadhaar regex is valid")
});

/// Check that an Aadhaar number is exactly twelve ASCII digits
pub fn is_valid_aadhaar(aadhaar: &str) -> bool {
    AADHAAR_REGEX.is_match(aadhaar)
}
