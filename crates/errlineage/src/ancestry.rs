//! Ancestry matching.
//!
//! A node keeps two chains: the structural chain (`unwrap`/`source`) and the
//! semantic cause. They only diverge after `external_err_mess`, and a match on
//! either chain counts. Errors are compared by address, so a foreign error
//! matches only the very value that was attached.

use std::error::Error;

use crate::node::{as_error_node, ErrorNode};
use crate::trace::Trace;

/// Returns `true` if `a` and `b` are the same error value.
pub fn same_error(a: &(dyn Error + 'static), b: &(dyn Error + 'static)) -> bool {
    std::ptr::eq(
        a as *const dyn Error as *const (),
        b as *const dyn Error as *const (),
    )
}

/// Walk `err`'s `source()` chain looking for `target`.
///
/// Attachment links are searched on both sides (the foreign error and the
/// parent link), and an [`ErrorNode`] met on the way answers with its own
/// ancestry, including its cause.
///
/// A plain `source()` loop only follows parent links: an attached foreign
/// error is reachable through this function and [`ErrorNode::is`], or
/// through [`Trace::external`], but not through `source()` alone.
pub fn chain_contains(err: &(dyn Error + 'static), target: &(dyn Error + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(e) = current {
        if same_error(e, target) {
            return true;
        }
        if let Some(node) = as_error_node(e) {
            return node.reaches(target);
        }
        if let Some(external) = e.downcast_ref::<Trace>().and_then(Trace::external) {
            if chain_contains(external, target) {
                return true;
            }
        }
        current = e.source();
    }
    false
}

impl ErrorNode {
    /// Returns `true` if this node derives from, or contains, `candidate`.
    ///
    /// For an [`ErrorNode`] candidate the comparison uses its structural link,
    /// so a node matches its ancestors and message-only variants of them but
    /// not its descendants or siblings. Any other error matches when it is
    /// the exact value attached somewhere along this node's chains.
    pub fn is(&self, candidate: &(dyn Error + 'static)) -> bool {
        let candidate_node = as_error_node(candidate);
        let target = candidate_node.map_or(candidate, ErrorNode::wrapped);
        let found = self.reaches(target);

        // Legacy cause check: evaluated only under TRACE, logged, never part
        // of the result.
        if !found && tracing::enabled!(tracing::Level::TRACE) {
            if let Some(node) = candidate_node {
                let legacy = chain_contains(self.cause(), node.cause());
                tracing::trace!(
                    code = %self.error_code(),
                    candidate = %node.error_code(),
                    legacy,
                    "legacy cause check"
                );
            }
        }
        found
    }

    pub(crate) fn reaches(&self, target: &(dyn Error + 'static)) -> bool {
        chain_contains(self.wrapped(), target) || chain_contains(self.cause(), target)
    }
}
