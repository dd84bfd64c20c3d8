//! `Seed` — the builder that derives new nodes from an existing one.
//!
//! Every step allocates a fresh node; the node a seed was produced from is
//! never touched, so codes stay stable identities however often they are
//! specialized.

use std::fmt;
use std::sync::Arc;

use crate::node::{Cause, ErrorNode, Node};
use crate::trace::{SharedError, Trace};

/// Builder returned by [`ErrorNode::produce`].
#[must_use = "a seed does nothing until `make` is called"]
#[derive(Clone)]
pub struct Seed {
    node: ErrorNode,
}

impl ErrorNode {
    /// Start deriving from this node.
    pub fn produce(&self) -> Seed {
        Seed { node: self.clone() }
    }
}

impl Seed {
    /// Derive a subtype: the code becomes `combine(parent, generate(label))`
    /// and `" ~> <child code>:<label>"` is appended to the code note.
    /// Message and cause are inherited.
    pub fn sub_type(self, label: &str) -> Self {
        let src = &self.node.inner;
        let child = src.space.generate(label);
        let code = src.space.combine(&src.code, &child);
        tracing::trace!(parent = %src.code, %child, %code, label, "derived error subtype");
        let node = Node::new(
            Arc::clone(&src.space),
            code,
            src.message.clone(),
            Trace::sub_type(&src.wrapped, &child, label),
            src.cause.clone(),
        );
        Self::from(node)
    }

    /// Replace the message. Code and ancestry are unchanged.
    pub fn message(self, text: impl Into<String>) -> Self {
        let src = &self.node.inner;
        let node = Node::new(
            Arc::clone(&src.space),
            src.code.clone(),
            text.into(),
            Arc::clone(&src.wrapped),
            src.cause.clone(),
        );
        Self::from(node)
    }

    /// Replace the message with formatted text:
    /// `seed.message_fmt(format_args!("user {id} not found"))`.
    pub fn message_fmt(self, args: fmt::Arguments<'_>) -> Self {
        let text = match args.as_str() {
            Some(s) => s.to_string(),
            None => fmt::format(args),
        };
        self.message(text)
    }

    /// Absorb a foreign error.
    ///
    /// No-op when `err` is `None`, or when it is an [`ErrorNode`] that already
    /// carries a message. Otherwise the new node's chain records `err` next to
    /// the current chain, its cause becomes `err`, and its message is the
    /// current message or, when none is set, `err`'s display text.
    pub fn external_err_mess(self, err: Option<SharedError>) -> Self {
        let Some(err) = err else {
            return self;
        };
        let src = &self.node.inner;
        if let Some(node) = err.downcast_ref::<ErrorNode>() {
            if node.message().is_some() {
                tracing::debug!(
                    code = %src.code,
                    attached = %node.error_code(),
                    "attached error node already has a message, keeping source"
                );
                return self;
            }
        }

        let message = if src.message.is_empty() {
            err.to_string()
        } else {
            src.message.clone()
        };
        tracing::trace!(code = %src.code, external = %err, "attached external error");
        let node = Node::new(
            Arc::clone(&src.space),
            src.code.clone(),
            message,
            Trace::attached(&src.wrapped, Arc::clone(&err)),
            Cause::External(err),
        );
        Self::from(node)
    }

    /// Finish building.
    pub fn make(self) -> ErrorNode {
        self.node
    }
}

impl From<Node> for Seed {
    fn from(node: Node) -> Self {
        Self {
            node: ErrorNode::from_node(node),
        }
    }
}

impl From<Seed> for ErrorNode {
    fn from(seed: Seed) -> Self {
        seed.make()
    }
}
