//! Fixed-alphabet base-36 codec.
//!
//! Values are written most-significant digit first using the 36 characters
//! `0-9A-Z` (upper case only). Encoding produces the shortest representation:
//! no leading zero digits, and zero itself is the single digit `"0"`.
//!
//! Decoding is wrapping: text longer than any `u32` encoding silently wraps
//! modulo 2^32 instead of failing.

use crate::error::CodeError;

/// The digit alphabet, indexed by digit value.
pub const ALPHABET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Number of digits in the alphabet.
pub const RADIX: u32 = 36;

/// Longest encoding of a `u32` (`u32::MAX` == `"1Z141Z3"`).
pub const MAX_DIGITS: usize = 7;

/// Encode a value as base-36 text.
pub fn encode(value: u32) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = [0u8; MAX_DIGITS];
    let mut pos = MAX_DIGITS;
    let mut rest = value;
    while rest > 0 {
        pos -= 1;
        digits[pos] = ALPHABET[(rest % RADIX) as usize];
        rest /= RADIX;
    }
    digits[pos..].iter().map(|&b| b as char).collect()
}

/// Map a single digit character to its value.
pub fn digit_value(digit: char) -> Option<u32> {
    match digit {
        '0'..='9' => Some(digit as u32 - '0' as u32),
        'A'..='Z' => Some(digit as u32 - 'A' as u32 + 10),
        _ => None,
    }
}

/// Decode base-36 text into its value (mod 2^32).
pub fn decode(text: &str) -> Result<u32, CodeError> {
    if text.is_empty() {
        return Err(CodeError::Empty);
    }
    text.chars().enumerate().try_fold(0u32, |acc, (position, digit)| {
        let v = digit_value(digit).ok_or(CodeError::InvalidDigit { digit, position })?;
        Ok(acc.wrapping_mul(RADIX).wrapping_add(v))
    })
}
