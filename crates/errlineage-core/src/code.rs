//! The `Code` value type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::base36;
use crate::error::CodeError;

/// A short printable error code.
///
/// Codes produced by the default code space are base-36 text of a `u32`
/// (see [`base36`]). Custom code spaces may put any text in a `Code`, so the
/// type itself does not enforce the alphabet; use [`Code::value`] or
/// [`str::parse`] when a validated base-36 value is needed.
///
/// The empty code is the failure sentinel: no `u32` encodes to it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Code(String);

impl Code {
    /// Wrap arbitrary code text without validation.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Encode a value as a base-36 code.
    pub fn from_value(value: u32) -> Self {
        Self(base36::encode(value))
    }

    /// The failure sentinel (empty code).
    pub fn sentinel() -> Self {
        Self(String::new())
    }

    /// Returns `true` if this is the empty failure sentinel.
    pub fn is_sentinel(&self) -> bool {
        self.0.is_empty()
    }

    /// Decode this code as a base-36 value.
    pub fn value(&self) -> Result<u32, CodeError> {
        base36::decode(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Code {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<u32> for Code {
    fn from(value: u32) -> Self {
        Self::from_value(value)
    }
}

/// Parses strictly: the text must be valid base-36 and is kept verbatim.
impl FromStr for Code {
    type Err = CodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        base36::decode(s)?;
        Ok(Self(s.to_string()))
    }
}

impl PartialEq<str> for Code {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Code {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
