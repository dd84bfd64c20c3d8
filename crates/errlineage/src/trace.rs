//! The structural chain behind every error node.
//!
//! Each node points at a [`Trace`] link: the root link holds the root code,
//! a subtype link adds a child code to its parent, and an attachment link
//! records a foreign error next to its parent. Links are shared between
//! nodes that have the same structural position (a node and its message-only
//! variants), and their addresses are the identities that ancestry matching
//! compares.
//!
//! A link stores only its own segment. The chain text and the code note are
//! assembled on first use by walking towards the root, so chains of any depth
//! cost linear memory and never recurse.

use std::error::Error;
use std::fmt::{self, Write as _};
use std::iter;
use std::mem;
use std::sync::{Arc, OnceLock};

use errlineage_core::Code;

/// A foreign error attached to a node.
pub type SharedError = Arc<dyn Error + Send + Sync + 'static>;

/// One link of a node's structural chain.
pub struct Trace {
    link: Link,
    text: OnceLock<String>,
    note: OnceLock<String>,
}

enum Link {
    Root {
        code: Code,
        label: String,
    },
    SubType {
        parent: Arc<Trace>,
        child: Code,
        label: String,
    },
    Attached {
        parent: Arc<Trace>,
        external: SharedError,
    },
}

impl Link {
    /// Placeholder left behind when a link is unlinked on drop.
    fn detached() -> Self {
        Self::Root {
            code: Code::sentinel(),
            label: String::new(),
        }
    }

    fn take_parent(&mut self) -> Option<Arc<Trace>> {
        match mem::replace(self, Self::detached()) {
            Self::Root { .. } => None,
            Self::SubType { parent, .. } | Self::Attached { parent, .. } => Some(parent),
        }
    }
}

impl Trace {
    fn new(link: Link) -> Arc<Self> {
        Arc::new(Self {
            link,
            text: OnceLock::new(),
            note: OnceLock::new(),
        })
    }

    pub(crate) fn root(code: &Code, label: &str) -> Arc<Self> {
        Self::new(Link::Root {
            code: code.clone(),
            label: label.to_string(),
        })
    }

    pub(crate) fn sub_type(parent: &Arc<Trace>, child: &Code, label: &str) -> Arc<Self> {
        Self::new(Link::SubType {
            parent: Arc::clone(parent),
            child: child.clone(),
            label: label.to_string(),
        })
    }

    pub(crate) fn attached(parent: &Arc<Trace>, external: SharedError) -> Arc<Self> {
        Self::new(Link::Attached {
            parent: Arc::clone(parent),
            external,
        })
    }

    fn parent(&self) -> Option<&Trace> {
        match &self.link {
            Link::Root { .. } => None,
            Link::SubType { parent, .. } | Link::Attached { parent, .. } => Some(&**parent),
        }
    }

    /// Chain text: `<root code>`, then `.<child code>` per subtype and
    /// `: <external text>` per attachment.
    pub fn text(&self) -> &str {
        self.text.get_or_init(|| {
            self.assemble(
                |t| t.text.get(),
                |out, link| match link {
                    Link::Root { code, .. } => out.push_str(code.as_str()),
                    Link::SubType { child, .. } => {
                        out.push('.');
                        out.push_str(child.as_str());
                    }
                    Link::Attached { external, .. } => {
                        let _ = write!(out, ": {external}");
                    }
                },
            )
        })
    }

    /// Derivation trace: `<root code>:<label>`, then ` ~> <child code>:<label>`
    /// per subtype. Attachments add nothing.
    pub fn code_note(&self) -> &str {
        self.note.get_or_init(|| {
            self.assemble(
                |t| t.note.get(),
                |out, link| match link {
                    Link::Root { code, label } => {
                        let _ = write!(out, "{code}:{label}");
                    }
                    Link::SubType { child, label, .. } => {
                        let _ = write!(out, " ~> {child}:{label}");
                    }
                    Link::Attached { .. } => {}
                },
            )
        })
    }

    /// Walk up to the root (or the nearest link with a cached value) and
    /// append each segment from there back down to `self`.
    fn assemble(
        &self,
        cached: impl Fn(&Trace) -> Option<&String>,
        segment: impl Fn(&mut String, &Link),
    ) -> String {
        let mut pending = Vec::new();
        let mut out = String::new();
        for t in iter::successors(Some(self), |t| t.parent()) {
            if let Some(prefix) = cached(t) {
                out.push_str(prefix);
                break;
            }
            pending.push(t);
        }
        for t in pending.iter().rev() {
            segment(&mut out, &t.link);
        }
        out
    }

    pub fn is_root(&self) -> bool {
        matches!(self.link, Link::Root { .. })
    }

    /// The foreign error recorded by an attachment link.
    pub fn external(&self) -> Option<&(dyn Error + 'static)> {
        match &self.link {
            Link::Attached { external, .. } => Some(&**external as &(dyn Error + 'static)),
            _ => None,
        }
    }
}

// Unlink uniquely owned ancestors one by one instead of letting each parent's
// drop run inside its child's.
impl Drop for Trace {
    fn drop(&mut self) {
        let mut next = self.link.take_parent();
        while let Some(parent) = next {
            next = match Arc::into_inner(parent) {
                Some(mut trace) => trace.link.take_parent(),
                None => None,
            };
        }
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

impl fmt::Debug for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Trace")
            .field("text", &self.text())
            .field("root", &self.is_root())
            .finish()
    }
}

// source() hands out the parent link itself (not the Arc around it) so that
// chain walks see the same addresses nodes expose. An attachment's foreign
// error is not part of this chain; see `ancestry::chain_contains`.
impl Error for Trace {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.parent().map(|p| p as &(dyn Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn texts_follow_the_chain() {
        let root = Trace::root(&Code::new("1MWWTMD"), "general error");
        let child = Trace::sub_type(&root, &Code::new("1EGN0JD"), "descendant");
        let ext: SharedError = Arc::new(io::Error::new(io::ErrorKind::Other, "disk full"));
        let attached = Trace::attached(&child, ext);

        assert_eq!(root.text(), "1MWWTMD");
        assert_eq!(child.text(), "1MWWTMD.1EGN0JD");
        assert_eq!(attached.to_string(), "1MWWTMD.1EGN0JD: disk full");
        assert!(root.is_root());
        assert!(!child.is_root());
    }

    #[test]
    fn code_note_skips_attachments() {
        let root = Trace::root(&Code::new("A"), "root");
        let child = Trace::sub_type(&root, &Code::new("B"), "child");
        let ext: SharedError = Arc::new(io::Error::new(io::ErrorKind::Other, "boom"));
        let attached = Trace::attached(&child, ext);
        assert_eq!(root.code_note(), "A:root");
        assert_eq!(attached.code_note(), "A:root ~> B:child");
    }

    #[test]
    fn cached_prefix_is_reused() {
        let root = Trace::root(&Code::new("A"), "root");
        let child = Trace::sub_type(&root, &Code::new("B"), "b");
        assert_eq!(child.text(), "A.B");
        let grandchild = Trace::sub_type(&child, &Code::new("C"), "c");
        assert_eq!(grandchild.text(), "A.B.C");
        assert_eq!(grandchild.code_note(), "A:root ~> B:b ~> C:c");
    }

    #[test]
    fn source_walks_to_the_root() {
        let root = Trace::root(&Code::new("A"), "a");
        let child = Trace::sub_type(&root, &Code::new("B"), "b");
        let grandchild = Trace::sub_type(&child, &Code::new("C"), "c");

        let mut depth = 0;
        let mut current: Option<&(dyn Error + 'static)> = Some(&*grandchild);
        while let Some(e) = current {
            depth += 1;
            current = e.source();
        }
        assert_eq!(depth, 3);

        let parent = grandchild.source().unwrap();
        assert!(std::ptr::eq(
            parent as *const dyn Error as *const (),
            Arc::as_ptr(&child) as *const ()
        ));
    }

    #[test]
    fn external_only_on_attachments() {
        let root = Trace::root(&Code::new("A"), "a");
        assert!(root.external().is_none());
        let ext: SharedError = Arc::new(io::Error::new(io::ErrorKind::Other, "boom"));
        let attached = Trace::attached(&root, ext);
        assert_eq!(attached.external().unwrap().to_string(), "boom");
        assert!(attached.source().is_some());
    }

    #[test]
    fn source_chain_does_not_enter_attachments() {
        let root = Trace::root(&Code::new("A"), "a");
        let ext: SharedError = Arc::new(io::Error::new(io::ErrorKind::Other, "boom"));
        let attached = Trace::attached(&root, Arc::clone(&ext));
        let target = &*ext as *const (dyn Error + Send + Sync) as *const ();

        let mut current: Option<&(dyn Error + 'static)> = Some(&*attached);
        while let Some(e) = current {
            assert!(!std::ptr::eq(e as *const dyn Error as *const (), target));
            current = e.source();
        }
    }

    #[test]
    fn dropping_a_deep_chain_is_iterative() {
        let mut tail = Trace::root(&Code::new("A"), "a");
        for _ in 0..100_000 {
            tail = Trace::sub_type(&tail, &Code::new("B"), "b");
        }
        drop(tail);
    }

    #[test]
    fn shared_ancestors_survive_drop() {
        let root = Trace::root(&Code::new("A"), "a");
        let child = Trace::sub_type(&root, &Code::new("B"), "b");
        let grandchild = Trace::sub_type(&child, &Code::new("C"), "c");
        drop(grandchild);
        assert_eq!(child.text(), "A.B");
        assert_eq!(Arc::strong_count(&root), 2);
    }
}
