//! Common validation utilities.

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// Accepts digits plus the punctuation staff commonly type into the
    /// phone field. Length bounds are enforced separately.
    static ref PHONE_CHARS: Regex = Regex::new(r"^\+?[0-9() .\-]+$").expect("valid regex");
}

/// Minimum digits for a dialable phone number.
const MIN_PHONE_DIGITS: usize = 10;

/// Validates a customer phone number: allowed characters and at least
/// ten digits.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let digit_count = phone.chars().filter(|c| c.is_ascii_digit()).count();

    if PHONE_CHARS.is_match(phone) && digit_count >= MIN_PHONE_DIGITS {
        Ok(())
    } else {
        let mut err = ValidationError::new("phone_format");
        err.message = Some("Valid phone number required (at least 10 digits)".into());
        Err(err)
    }
}

/// Validates that a string is non-blank after trimming.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Value must not be blank".into());
        Err(err)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_phone_accepts_common_formats() {
        assert!(validate_phone("+1 (555) 123-4567").is_ok());
        assert!(validate_phone("5551234567").is_ok());
        assert!(validate_phone("555.123.4567").is_ok());
    }

    #[test]
    fn test_validate_phone_rejects_too_few_digits() {
        assert!(validate_phone("555-1234").is_err());
    }

    #[test]
    fn test_validate_phone_rejects_letters() {
        assert!(validate_phone("call me maybe").is_err());
    }

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("x").is_ok());
        assert!(validate_not_blank("   ").is_err());
        assert!(validate_not_blank("").is_err());
    }
}
