//! Code spaces — how labels become codes and how codes combine.
//!
//! A [`CodeSpace`] is injected when a root error is created and every error
//! derived from that root keeps using it. [`Fnv36`] is the default: FNV-1a of
//! the label bytes, base-36 encoded, with derived codes formed by wrapping
//! `u32` addition of the decoded parent and child codes.

use std::fmt;

use crate::base36;
use crate::code::Code;
use crate::error::CodeError;
use crate::hash::fnv1a_32;

/// A hash/combine pair that maps labels to codes.
///
/// Implementations must be pure: the same inputs always give the same code.
pub trait CodeSpace: Send + Sync + fmt::Debug {
    /// Derive the code of a label.
    fn generate(&self, label: &str) -> Code;

    /// Combine a parent code with a child's label code.
    fn combine(&self, parent: &Code, child: &Code) -> Code;
}

/// The default code space: FNV-1a hash, base-36 text, additive combination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Fnv36;

impl CodeSpace for Fnv36 {
    fn generate(&self, label: &str) -> Code {
        generate_code(label)
    }

    fn combine(&self, parent: &Code, child: &Code) -> Code {
        combine_codes(parent, child)
    }
}

/// A code space built from two plain functions.
#[derive(Clone, Copy)]
pub struct FnCodeSpace {
    generate: fn(&str) -> Code,
    combine: fn(&Code, &Code) -> Code,
}

impl FnCodeSpace {
    pub fn new(generate: fn(&str) -> Code, combine: fn(&Code, &Code) -> Code) -> Self {
        Self { generate, combine }
    }
}

impl fmt::Debug for FnCodeSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnCodeSpace").finish_non_exhaustive()
    }
}

impl CodeSpace for FnCodeSpace {
    fn generate(&self, label: &str) -> Code {
        (self.generate)(label)
    }

    fn combine(&self, parent: &Code, child: &Code) -> Code {
        (self.combine)(parent, child)
    }
}

/// Hash a label into its base-36 code. Any label, including `""`, is valid.
pub fn generate_code(label: &str) -> Code {
    Code::from_value(fnv1a_32(label.as_bytes()))
}

/// Add two base-36 codes modulo 2^32.
///
/// Fails when either code is not valid base-36 text.
pub fn try_combine_codes(a: &Code, b: &Code) -> Result<Code, CodeError> {
    let sum = base36::decode(a.as_str())?.wrapping_add(base36::decode(b.as_str())?);
    Ok(Code::from_value(sum))
}

/// Add two base-36 codes modulo 2^32, returning the empty sentinel code when
/// either input does not decode.
pub fn combine_codes(a: &Code, b: &Code) -> Code {
    match try_combine_codes(a, b) {
        Ok(code) => code,
        Err(e) => {
            tracing::warn!(%a, %b, error = %e, "code combination failed, using sentinel code");
            Code::sentinel()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn generate_pinned_labels() {
        assert_eq!(generate_code("general error"), "1MWWTMD");
        assert_eq!(generate_code("descendant of general error"), "1EGN0JD");
        assert_eq!(generate_code(""), "ZTNTFP");
    }

    #[test]
    fn combine_pinned_codes() {
        let root = generate_code("general error");
        let child = generate_code("descendant of general error");
        assert_eq!(combine_codes(&root, &child), "12CFS6M");
    }

    #[test]
    fn combine_wraps_around() {
        let max = Code::from_value(u32::MAX);
        let one = Code::from_value(1);
        assert_eq!(combine_codes(&max, &one), "0");
    }

    #[test]
    fn combine_invalid_gives_sentinel() {
        let bad = Code::new("not-a-code");
        let good = Code::from_value(7);
        assert!(combine_codes(&bad, &good).is_sentinel());
        assert!(matches!(
            try_combine_codes(&good, &bad),
            Err(CodeError::InvalidDigit { digit: 'n', position: 0 })
        ));
        assert_eq!(try_combine_codes(&good, &Code::sentinel()), Err(CodeError::Empty));
    }

    #[test]
    fn fn_code_space_delegates() {
        fn upper(label: &str) -> Code {
            Code::new(label.to_uppercase())
        }
        fn join(a: &Code, b: &Code) -> Code {
            Code::new(format!("{a}-{b}"))
        }
        let space = FnCodeSpace::new(upper, join);
        let root = space.generate("io");
        assert_eq!(root, "IO");
        assert_eq!(space.combine(&root, &space.generate("read")), "IO-READ");
    }

    proptest! {
        #[test]
        fn generate_is_deterministic(label in ".*") {
            prop_assert_eq!(generate_code(&label), generate_code(&label));
        }

        #[test]
        fn combine_is_commutative(a in any::<u32>(), b in any::<u32>()) {
            let (a, b) = (Code::from_value(a), Code::from_value(b));
            prop_assert_eq!(combine_codes(&a, &b), combine_codes(&b, &a));
        }
    }
}
