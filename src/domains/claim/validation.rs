//! Input checks run before any OTP request leaves the widget

use regex::Regex;
use std::sync::OnceLock;

static PHONE_REGEX: OnceLock<Regex> = OnceLock::new();
static OTP_REGEX: OnceLock<Regex> = OnceLock::new();

/// Ten or more ASCII digits, nothing else.
pub fn is_valid_phone(phone: &str) -> bool {
    let regex = PHONE_REGEX.get_or_init(|| {
        Regex::new(r"^[0-9]{10,}$").expect("static phone regex")
    });

    regex.is_match(phone)
}

/// Exactly six ASCII digits.
pub fn is_valid_otp(code: &str) -> bool {
    let regex = OTP_REGEX.get_or_init(|| {
        Regex::new(r"^[0-9]{6}$").expect("static otp regex")
    });

    regex.is_match(code)
}
