//! Phone number utilities

use once_cell::sync::Lazy;
use regex::Regex;

// Optional leading '+', then 10 to 15 digits
static ACCEPTED_PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+?[0-9]{10,15}$").expect("phone regex is valid")
});

// Drops separators and spaces, keeping digits and '+'
fn strip_formatting(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// Check if a phone number is accepted for signup and login
///
/// The number is checked exactly as submitted: an optional leading `+`
/// followed by 10 to 15 digits, no spaces or separators.
pub fn is_valid_phone(phone: &str) -> bool {
    ACCEPTED_PHONE_REGEX.is_match(phone)
}

/// Mask a phone number for display and logs (e.g., +91****3210)
pub fn mask_phone_number(phone: &str) -> String {
    let normalized = strip_formatting(phone);
    if normalized.len() >= 7 {
        format!(
            "{}****{}",
            &normalized[0..3],
            &normalized[normalized.len() - 4..]
        )
    } else {
        "****".to_string()
    }
}
