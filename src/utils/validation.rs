use regex::Regex;
use std::sync::LazyLock;

/// Minimum number of characters accepted in the phone field before an OTP is requested
pub const MIN_PHONE_LENGTH: usize = 10;

/// Longest phone input the login field accepts (E.164 allows 15 digits plus `+`)
pub const MAX_PHONE_LENGTH: usize = 16;

/// Minimum OTP length accepted for verification
pub const MIN_OTP_LENGTH: usize = 4;

/// Number of OTP characters the server issues
pub const OTP_LENGTH: usize = 6;

/// Maximum number of words in a listing description
pub const MAX_DESCRIPTION_WORDS: usize = 100;

/// Maximum reported size of a single listing photo (20 MiB)
pub const MAX_PHOTO_BYTES: u64 = 20 * 1024 * 1024;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Normalize a phone number to international form.
///
/// Input that already starts with `+` is returned unchanged; anything else
/// gets `country_code` prepended. This is a prefix heuristic, not a real
/// phone-number parser.
///
/// # Example
/// ```
/// use bidmart::utils::validation::normalize_phone;
///
/// assert_eq!(normalize_phone("9876543210", "+91"), "+919876543210");
/// assert_eq!(normalize_phone("+14155550100", "+91"), "+14155550100");
/// ```
pub fn normalize_phone(input: &str, country_code: &str) -> String {
    if input.starts_with('+') {
        input.to_string()
    } else {
        format!("{}{}", country_code, input)
    }
}

/// Check the raw phone input is long enough to request an OTP
pub fn is_valid_phone(input: &str) -> bool {
    !input.is_empty() && input.chars().count() >= MIN_PHONE_LENGTH
}

/// Characters the phone field accepts (a phone keypad)
pub fn is_phone_char(c: char) -> bool {
    c.is_ascii_digit() || c == '+'
}

/// Check an email address has the shape `local@domain.tld`
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Check an OTP code is long enough to submit
pub fn is_valid_otp(code: &str) -> bool {
    code.chars().count() >= MIN_OTP_LENGTH
}

/// Count whitespace-separated words
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Check a description fits within the word limit
pub fn within_word_limit(text: &str) -> bool {
    count_words(text) <= MAX_DESCRIPTION_WORDS
}

/// Check a photo's reported size is within the cap.
///
/// Unknown sizes are accepted: only the size the source reports is checked.
pub fn photo_size_ok(size: Option<u64>) -> bool {
    size.is_none_or(|bytes| bytes <= MAX_PHOTO_BYTES)
}

/// Characters a numeric amount field accepts
pub fn is_amount_char(c: char, current: &str) -> bool {
    c.is_ascii_digit() || (c == '.' && !current.contains('.'))
}
