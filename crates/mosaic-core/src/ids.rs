//! Generated element identifiers and boundary references.
//!
//! Accessible markup cross-references elements by id (`aria-labelledby`,
//! `aria-controls`, `aria-describedby`).  Components generate those ids once
//! at construction through [`ElementId::generate`] and keep them for their
//! whole lifetime, so re-renders of the same logical element never change
//! its identity.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ELEMENT_ID: AtomicU64 = AtomicU64::new(1);
static NEXT_NODE_REF: AtomicU64 = AtomicU64::new(1);

/// Prefix shared by every generated element id.
pub const ID_PREFIX: &str = "mosaic-";

/// A unique, stable `id` attribute value.
///
/// Generated ids are unique within the process: two instances of the same
/// component never share an id, even when they are rendered side by side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(String);

impl ElementId {
    /// Generate a fresh, process-unique id (`mosaic-<n>`).
    pub fn generate() -> Self {
        let n = NEXT_ELEMENT_ID.fetch_add(1, Ordering::Relaxed);
        Self(format!("{ID_PREFIX}{n}"))
    }

    /// Wrap a caller-chosen id.
    ///
    /// The caller is responsible for keeping it unique within the document.
    pub fn from_static(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derive a related id, e.g. `mosaic-4-page-2` for a child control.
    pub fn child(&self, suffix: impl fmt::Display) -> Self {
        Self(format!("{}-{}", self.0, suffix))
    }

    /// The id as it appears in markup.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ElementId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// An opaque reference to one rendered element subtree.
///
/// A `NodeRef` is attached to an element with
/// [`Element::node_ref`](crate::markup::Element::node_ref).  It is *bound*
/// while that element is mounted in a [`Document`](crate::document::Document)
/// and unbound otherwise; [`Document::resolve`](crate::document::Document::resolve)
/// returns the live node or `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeRef(u64);

impl NodeRef {
    /// Create a fresh, unbound reference.
    pub fn new() -> Self {
        Self(NEXT_NODE_REF.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw key, used to derive listener identities.
    pub fn key(&self) -> u64 {
        self.0
    }
}

impl Default for NodeRef {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn generated_ids_are_unique() {
        let ids: HashSet<ElementId> = (0..100).map(|_| ElementId::generate()).collect();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn generated_ids_use_prefix() {
        assert!(ElementId::generate().as_str().starts_with(ID_PREFIX));
    }

    #[test]
    fn child_id_extends_parent() {
        let id = ElementId::from_static("pager");
        assert_eq!(id.child("page-3").as_str(), "pager-page-3");
    }

    #[test]
    fn node_refs_are_distinct() {
        assert_ne!(NodeRef::new(), NodeRef::new());
    }
}
