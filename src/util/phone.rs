//! Brazilian phone number helpers.
//!
//! The mask grows with the input so it can be applied on every keystroke:
//! `(11`, `(11) 9999`, `(11) 9999-8888`, `(11) 99999-8888`.

/// Longest number accepted: two-digit area code plus a nine-digit mobile.
pub const MAX_PHONE_DIGITS: usize = 11;

/// Keep only ASCII digits.
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// True when the string has at least one digit and every digit is the same.
pub fn is_repeated_digit(digits: &str) -> bool {
    let mut chars = digits.chars();
    match chars.next() {
        Some(first) => chars.all(|c| c == first),
        None => false,
    }
}

/// Apply the progressive display mask to whatever digits `raw` contains.
pub fn format_phone(raw: &str) -> String {
    let digits: String = digits_only(raw).chars().take(MAX_PHONE_DIGITS).collect();
    let len = digits.len();

    match len {
        0 => String::new(),
        1..=2 => format!("({}", digits),
        3..=6 => format!("({}) {}", &digits[..2], &digits[2..]),
        7..=10 => format!("({}) {}-{}", &digits[..2], &digits[2..6], &digits[6..]),
        _ => format!("({}) {}-{}", &digits[..2], &digits[2..7], &digits[7..]),
    }
}
