//! Error types for the code engine.

use thiserror::Error;

/// Errors that can occur while decoding code text back into its value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodeError {
    #[error("Empty code: no digits to decode")]
    Empty,

    #[error("Invalid base-36 digit {digit:?} at position {position}")]
    InvalidDigit { digit: char, position: usize },
}
