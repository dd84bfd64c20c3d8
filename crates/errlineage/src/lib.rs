//! errlineage — hierarchical, identity-stable error codes.
//!
//! A root error is created from a label; subtypes derived from it combine the
//! root's code with their own label's code, so every position in the tree has
//! a short printable code without any central registry. Ancestry is tested
//! with [`ErrorNode::is`], which also understands foreign errors absorbed
//! with [`Seed::external_err_mess`].
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use errlineage::{ErrorNode, SharedError};
//!
//! let general = ErrorNode::root("general error");
//! let descendant = general
//!     .produce()
//!     .sub_type("descendant of general error")
//!     .make();
//! assert_eq!(general.error_code().as_str(), "1MWWTMD");
//! assert_eq!(descendant.error_code().as_str(), "12CFS6M");
//!
//! let io: SharedError = Arc::new(std::io::Error::other("connection reset"));
//! let failed = descendant
//!     .produce()
//!     .external_err_mess(Some(Arc::clone(&io)))
//!     .make();
//! assert!(failed.is(&general));
//! assert!(failed.is(&descendant));
//! assert!(failed.is(&*io));
//! println!("{failed}"); // [12CFS6M: 1MWWTMD.1EGN0JD: connection reset] connection reset
//! ```

pub mod ancestry;
pub mod node;
pub mod report;
pub mod seed;
pub mod trace;

pub use ancestry::{chain_contains, same_error};
pub use node::{as_error_node, is_error_node, ErrorNode};
pub use report::ErrorReport;
pub use seed::Seed;
pub use trace::{SharedError, Trace};

pub use errlineage_core::{Code, CodeError, CodeSpace, FnCodeSpace, Fnv36};
