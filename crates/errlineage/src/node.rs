//! `ErrorNode` — one immutable error in a derivation chain.

use std::error::Error;
use std::fmt;
use std::sync::{Arc, OnceLock};

use errlineage_core::{Code, CodeSpace, Fnv36};

use crate::trace::{SharedError, Trace};

/// An error with a hierarchical code.
///
/// Nodes are created with [`ErrorNode::root`] and specialized through the
/// builder returned by [`ErrorNode::produce`]. A node never changes after
/// construction; cloning is cheap and clones share identity.
///
/// ```rust
/// use errlineage::ErrorNode;
///
/// let storage = ErrorNode::root("storage");
/// let not_found = storage.produce().sub_type("not found").make();
///
/// assert!(not_found.is(&storage));
/// assert!(!storage.is(&not_found));
/// ```
#[derive(Clone)]
pub struct ErrorNode {
    pub(crate) inner: Arc<Node>,
}

pub(crate) struct Node {
    pub(crate) space: Arc<dyn CodeSpace>,
    pub(crate) code: Code,
    /// Empty means "not set".
    pub(crate) message: String,
    pub(crate) wrapped: Arc<Trace>,
    pub(crate) cause: Cause,
    rendered: OnceLock<String>,
}

/// What a node treats as its originating error.
#[derive(Clone)]
pub(crate) enum Cause {
    /// The root link of the node's chain.
    Trace(Arc<Trace>),
    /// A foreign error absorbed with `external_err_mess`.
    External(SharedError),
}

impl Cause {
    pub(crate) fn as_error(&self) -> &(dyn Error + 'static) {
        match self {
            Self::Trace(trace) => &**trace as &(dyn Error + 'static),
            Self::External(err) => &**err as &(dyn Error + 'static),
        }
    }
}

impl Node {
    pub(crate) fn new(
        space: Arc<dyn CodeSpace>,
        code: Code,
        message: String,
        wrapped: Arc<Trace>,
        cause: Cause,
    ) -> Self {
        Self {
            space,
            code,
            message,
            wrapped,
            cause,
            rendered: OnceLock::new(),
        }
    }
}

impl ErrorNode {
    /// Create a root error in the default [`Fnv36`] code space.
    pub fn root(label: &str) -> Self {
        Self::root_in(label, Arc::new(Fnv36))
    }

    /// Create a root error in a custom code space. Every node derived from
    /// it generates and combines codes with `space`.
    pub fn root_in(label: &str, space: Arc<dyn CodeSpace>) -> Self {
        let code = space.generate(label);
        let wrapped = Trace::root(&code, label);
        tracing::trace!(%code, label, "created root error");
        Self::from_node(Node::new(
            space,
            code,
            String::new(),
            Arc::clone(&wrapped),
            Cause::Trace(wrapped),
        ))
    }

    pub(crate) fn from_node(node: Node) -> Self {
        Self {
            inner: Arc::new(node),
        }
    }

    /// The code identifying this node's position in the derivation tree.
    pub fn error_code(&self) -> &Code {
        &self.inner.code
    }

    /// Derivation trace, e.g. `1MWWTMD:general error ~> 1EGN0JD:descendant`.
    pub fn code_note(&self) -> &str {
        self.inner.wrapped.code_note()
    }

    /// The message set on this node, if any.
    pub fn message(&self) -> Option<&str> {
        Some(self.inner.message.as_str()).filter(|m| !m.is_empty())
    }

    /// The message if set, otherwise the code note.
    pub fn display_message(&self) -> &str {
        self.message().unwrap_or_else(|| self.code_note())
    }

    /// `[<code>: <chain text>] <display message>`, computed once per node.
    pub fn render(&self) -> &str {
        self.inner.rendered.get_or_init(|| {
            format!(
                "[{}: {}] {}",
                self.inner.code,
                self.inner.wrapped,
                self.display_message()
            )
        })
    }

    /// Append this node's code to a user-facing response template.
    pub fn fmt_response(&self, template: &str) -> String {
        format!("{template}\nCODE: {}", self.inner.code)
    }

    /// The structural link: one unwrap step, same as `source()`.
    pub fn wrapped(&self) -> &(dyn Error + 'static) {
        &*self.inner.wrapped
    }

    pub fn trace(&self) -> &Trace {
        &self.inner.wrapped
    }

    /// The semantic cause: the root link, or the foreign error attached with
    /// `external_err_mess`.
    pub fn cause(&self) -> &(dyn Error + 'static) {
        self.inner.cause.as_error()
    }

    pub fn code_space(&self) -> &dyn CodeSpace {
        &*self.inner.space
    }
}

impl fmt::Display for ErrorNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.render())
    }
}

impl fmt::Debug for ErrorNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorNode")
            .field("code", &self.inner.code)
            .field("code_note", &self.code_note())
            .field("message", &self.inner.message)
            .field("trace", &self.inner.wrapped.text())
            .finish_non_exhaustive()
    }
}

impl Error for ErrorNode {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(self.wrapped())
    }
}

/// Downcast a generic error to an [`ErrorNode`].
pub fn as_error_node<'a>(err: &'a (dyn Error + 'static)) -> Option<&'a ErrorNode> {
    err.downcast_ref::<ErrorNode>()
}

/// Returns `true` if `err` is an [`ErrorNode`].
pub fn is_error_node(err: &(dyn Error + 'static)) -> bool {
    as_error_node(err).is_some()
}
