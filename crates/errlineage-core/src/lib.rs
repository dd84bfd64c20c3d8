//! errlineage-core — the code engine behind ErrLineage error codes.
//!
//! This crate defines:
//! - [`Code`] — a short printable error code (base-36 text)
//! - [`base36`] — the fixed-alphabet codec between `u32` values and code text
//! - [`fnv1a_32`] — the label hash used by the default code space
//! - [`CodeSpace`] — the hash/combine pair a family of errors derives codes with
//! - [`CodeError`] — failures when decoding code text
//!
//! Everything here is pure: no I/O, no global state, no allocation beyond the
//! returned strings.

pub mod base36;
pub mod code;
pub mod error;
pub mod hash;
pub mod space;

pub use code::Code;
pub use error::CodeError;
pub use hash::fnv1a_32;
pub use space::{combine_codes, generate_code, try_combine_codes, CodeSpace, FnCodeSpace, Fnv36};
