//! Live input masks for the phone and CUIT fields.
//!
//! Both masks are applied on every keystroke and are idempotent: masking an
//! already masked value returns it unchanged.

fn digits(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Formats free text as `DD-REST`, or `DDDD-` plus at most 8 subscriber digits
/// once more than 10 digits were typed.
pub fn apply_phone_mask(value: &str) -> String {
    let digits = digits(value);
    match digits.len() {
        0..=2 => digits,
        3..=10 => format!("{}-{}", &digits[..2], &digits[2..]),
        len => format!("{}-{}", &digits[..4], &digits[4..len.min(12)]),
    }
}

/// Formats free text as `DD-REST`, or `DD-DDDDDDDD-D` once more than 10 digits
/// were typed. Digits past the eleventh are dropped.
pub fn apply_cuit_mask(value: &str) -> String {
    let digits = digits(value);
    match digits.len() {
        0..=2 => digits,
        3..=10 => format!("{}-{}", &digits[..2], &digits[2..]),
        _ => format!("{}-{}-{}", &digits[..2], &digits[2..10], &digits[10..11]),
    }
}
