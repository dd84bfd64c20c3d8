//! Serializable snapshot of a node for API responses and structured logs.

use errlineage_core::Code;
use serde::{Deserialize, Serialize};

use crate::node::ErrorNode;

/// The printable parts of an [`ErrorNode`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    /// The node's code.
    pub code: Code,
    /// Derivation trace (root label → subtype labels).
    pub code_note: String,
    /// Display message: the message if set, otherwise the code note.
    pub message: String,
}

impl From<&ErrorNode> for ErrorReport {
    fn from(node: &ErrorNode) -> Self {
        Self {
            code: node.error_code().clone(),
            code_note: node.code_note().to_string(),
            message: node.display_message().to_string(),
        }
    }
}

impl ErrorNode {
    pub fn report(&self) -> ErrorReport {
        ErrorReport::from(self)
    }
}
