//! Digit Alphabet
//!
//! Maps characters to digit values for positional numerals in bases 2 to 36.
//! Letters are case-insensitive: `a`/`A` is 10, `z`/`Z` is 35.

/// Smallest supported radix
pub const MIN_BASE: u32 = 2;

/// Largest supported radix (`0-9` followed by `a-z`)
pub const MAX_BASE: u32 = 36;

/// Canonical digit symbols, indexed by value
pub const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Value of a single digit character, or `None` if it is not in the alphabet.
///
/// The result is independent of any base; callers compare it against the
/// radix they are decoding in.
pub fn digit_value(c: char) -> Option<u32> {
    match c {
        '0'..='9' => Some(c as u32 - '0' as u32),
        'a'..='z' => Some(c as u32 - 'a' as u32 + 10),
        'A'..='Z' => Some(c as u32 - 'A' as u32 + 10),
        _ => None,
    }
}

/// Canonical (lowercase) symbol for a digit value
pub fn digit_char(value: u32) -> Option<char> {
    DIGITS.get(value as usize).map(|&b| b as char)
}

/// Check whether `base` is a supported radix
pub fn is_valid_base(base: u32) -> bool {
    (MIN_BASE..=MAX_BASE).contains(&base)
}
