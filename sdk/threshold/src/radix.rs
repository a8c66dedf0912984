//! Base Decoder
//!
//! Converts digit strings in bases 2 to 36 into exact arbitrary-precision
//! integers. Accumulation is `acc = acc * base + digit`, most significant digit
//! first, with no fixed-width intermediate.

use num_bigint::BigUint;
use num_traits::Zero;
use thiserror::Error;

use crate::alphabet::{digit_value, is_valid_base};

/// Decoding errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("invalid base {0}: must be between 2 and 36")]
    InvalidBase(u32),

    #[error("invalid digit {digit:?} at position {position} for base {base}")]
    InvalidDigit {
        digit: char,
        position: usize,
        base: u32,
    },

    #[error("empty digit string")]
    EmptyInput,
}

/// Decode `digits` written in `base` into an exact integer
///
/// # Arguments
/// * `digits` - Non-empty digit string, letters case-insensitive
/// * `base` - Radix in `2..=36`
///
/// # Returns
/// The value the digit string represents
pub fn decode(digits: &str, base: u32) -> Result<BigUint, DecodeError> {
    if !is_valid_base(base) {
        return Err(DecodeError::InvalidBase(base));
    }
    if digits.is_empty() {
        return Err(DecodeError::EmptyInput);
    }

    let radix = BigUint::from(base);
    let mut acc = BigUint::zero();

    for (position, digit) in digits.chars().enumerate() {
        let value = digit_value(digit)
            .filter(|&v| v < base)
            .ok_or(DecodeError::InvalidDigit {
                digit,
                position,
                base,
            })?;
        acc = acc * &radix + value;
    }

    Ok(acc)
}

/// Encode `value` in `base` using the canonical lowercase alphabet.
///
/// `decode(&encode(v, b)?, b)` yields `v` again.
pub fn encode(value: &BigUint, base: u32) -> Result<String, DecodeError> {
    if !is_valid_base(base) {
        return Err(DecodeError::InvalidBase(base));
    }
    Ok(value.to_str_radix(base))
}
