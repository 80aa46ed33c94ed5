//! Phone number normalization for SMS sender matching.
//!
//! Inbound webhook payloads carry the sender in provider format
//! (`+15551234567`); customer records are free-form staff input. Matching
//! happens on the last ten digits, which covers US numbers with or
//! without the country code.

/// Number of trailing digits used as the match key.
pub const MATCH_KEY_LEN: usize = 10;

/// Strips every non-digit character from a phone number.
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Returns the last ten digits of a phone number, used as the lookup key.
///
/// Shorter numbers are returned whole; the caller decides whether a short
/// key is acceptable.
pub fn match_key(raw: &str) -> String {
    let digits = digits_only(raw);
    let skip = digits.len().saturating_sub(MATCH_KEY_LEN);
    digits[skip..].to_string()
}
