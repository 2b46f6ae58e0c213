//! Phone number canonicalization.
//!
//! The canonical form is the join key for customer lookup: two raw
//! spellings of the same number must normalize identically.

/// Country calling code prepended to local numbers.
const COUNTRY_CODE: &str = "972";

/// Canonicalize a raw phone string to digits-only form with country code.
///
/// Accepts bare local numbers with or without the leading trunk `0`,
/// already-prefixed international numbers, and any punctuation between
/// digits. Pure and total: every input produces an output (this
/// reshapes digits, it does not validate number correctness), and
/// normalizing an already-canonical number returns it unchanged.
pub fn normalize_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    // "00" is the international dial prefix, not part of the number.
    let digits = digits.strip_prefix("00").unwrap_or(&digits);
    if digits.starts_with(COUNTRY_CODE) {
        return digits.to_owned();
    }
    let local = digits.strip_prefix('0').unwrap_or(digits);
    format!("{COUNTRY_CODE}{local}")
}
