//! Headless document host.
//!
//! A [`Document`] holds one mounted [`Node`] tree in an arena and answers
//! the questions event listeners and tests ask of a browser DOM: which node
//! contains which, what class name an event target exposes, which element
//! a [`NodeRef`] is bound to, and which elements match an ARIA role and
//! accessible name.
//!
//! Mounting is positional: node ids are assigned in document order, and
//! remounting an identical tree is a no-op, so ids stay valid across
//! re-renders that do not change the markup.

use crate::ids::NodeRef;
use crate::markup::{Attribute, Node, Tag};
use std::collections::HashMap;
use std::fmt;

/// Handle to a node in a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// The class-name value an event target exposes.
///
/// HTML elements expose a plain string.  SVG elements expose an animated
/// value object, and text nodes expose none at all; code that needs a
/// string class name must handle both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassName<'a> {
    Plain(&'a str),
    Animated(&'a str),
    Missing,
}

impl<'a> ClassName<'a> {
    /// The class string when it is a plain string.
    pub fn as_plain(&self) -> Option<&'a str> {
        match self {
            ClassName::Plain(s) => Some(s),
            ClassName::Animated(_) | ClassName::Missing => None,
        }
    }
}

/// Error returned by role queries that expect exactly one match.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("no accessible element matches {0}")]
    NotFound(String),
    #[error("{count} accessible elements match {query}, expected one")]
    Ambiguous { query: String, count: usize },
}

/// A role + accessible-name query, modelled on how browser tests locate
/// elements.
///
/// ```rust,ignore
/// let close = doc.query(&RoleQuery::new("button").name("Close"))?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleQuery {
    role: String,
    name: Option<String>,
    include_hidden: bool,
}

impl RoleQuery {
    pub fn new(role: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            name: None,
            include_hidden: false,
        }
    }

    /// Require an exact accessible name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Also match elements hidden with `hidden` or `aria-hidden="true"`.
    pub fn include_hidden(mut self) -> Self {
        self.include_hidden = true;
        self
    }
}

impl fmt::Display for RoleQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "role={:?}", self.role)?;
        if let Some(name) = &self.name {
            write!(f, " name={name:?}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
enum NodeData {
    Root,
    Element {
        tag: Tag,
        class: String,
        attrs: Vec<Attribute>,
    },
    Text(String),
}

#[derive(Debug, Clone)]
struct DocNode {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    data: NodeData,
}

// Roles whose accessible name is computed from their text content.
const NAME_FROM_CONTENT: &[&str] = &[
    "button",
    "link",
    "tab",
    "columnheader",
    "rowheader",
    "gridcell",
    "cell",
    "row",
    "option",
    "heading",
    "tooltip",
    "menuitem",
    "switch",
];

/// An arena-backed document holding one mounted tree under a root node.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<DocNode>,
    refs: HashMap<NodeRef, NodeId>,
    ids: HashMap<String, NodeId>,
    mounted: Option<Node>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document containing only its root (the "body").
    pub fn new() -> Self {
        Self {
            nodes: vec![DocNode {
                parent: None,
                children: Vec::new(),
                data: NodeData::Root,
            }],
            refs: HashMap::new(),
            ids: HashMap::new(),
            mounted: None,
        }
    }

    /// The root node.  Pointer events on empty page background target it.
    pub fn body(&self) -> NodeId {
        NodeId(0)
    }

    /// Mount `tree` under the root, replacing whatever was mounted before.
    ///
    /// Returns `false` when the tree is identical to the mounted one, in
    /// which case nothing changes and existing [`NodeId`]s stay valid.
    pub fn mount(&mut self, tree: &Node) -> bool {
        if self.mounted.as_ref() == Some(tree) {
            return false;
        }
        self.clear();
        let body = self.body();
        self.insert(body, tree);
        self.mounted = Some(tree.clone());
        true
    }

    /// Remove the mounted tree.  Every [`NodeRef`] becomes unbound.
    pub fn unmount(&mut self) {
        self.clear();
        self.mounted = None;
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    /// The tree currently mounted, if any.
    pub fn mounted_tree(&self) -> Option<&Node> {
        self.mounted.as_ref()
    }

    /// Serialise the mounted tree to HTML.
    pub fn to_html(&self) -> String {
        self.mounted.as_ref().map(Node::to_html).unwrap_or_default()
    }

    /// Resolve a boundary reference to its live node.
    pub fn resolve(&self, node_ref: NodeRef) -> Option<NodeId> {
        self.refs.get(&node_ref).copied()
    }

    /// Find the element carrying `id`.
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.ids.get(id).copied()
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.get(node).and_then(|n| n.parent)
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.get(node).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Whether `node` is `ancestor` or one of its descendants.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if n == ancestor {
                return true;
            }
            current = self.parent(n);
        }
        false
    }

    /// `node` and its ancestors, nearest first.
    pub fn ancestors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.get(node).map(|_| node), move |n| self.parent(*n))
    }

    /// Every node below `node` in document order, excluding `node` itself.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(node).iter().rev().copied().collect();
        while let Some(n) = stack.pop() {
            out.push(n);
            stack.extend(self.children(n).iter().rev().copied());
        }
        out
    }

    pub fn tag(&self, node: NodeId) -> Option<Tag> {
        match self.get(node).map(|n| &n.data) {
            Some(NodeData::Element { tag, .. }) => Some(*tag),
            _ => None,
        }
    }

    pub fn is_element(&self, node: NodeId) -> bool {
        self.tag(node).is_some()
    }

    /// Attribute value; boolean attributes yield `Some("")`.  The class list
    /// is available through [`class_name`](Self::class_name).
    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        match self.get(node).map(|n| &n.data) {
            Some(NodeData::Element { attrs, .. }) => attrs
                .iter()
                .find(|a| a.name == name)
                .map(|a| a.value.as_deref().unwrap_or("")),
            _ => None,
        }
    }

    pub fn has_attribute(&self, node: NodeId, name: &str) -> bool {
        self.attribute(node, name).is_some()
    }

    /// The class name `node` exposes to event handlers.
    pub fn class_name(&self, node: NodeId) -> ClassName<'_> {
        match self.get(node).map(|n| &n.data) {
            Some(NodeData::Root) => ClassName::Plain(""),
            Some(NodeData::Element { tag, class, .. }) if tag.is_svg() => {
                ClassName::Animated(class)
            }
            Some(NodeData::Element { class, .. }) => ClassName::Plain(class),
            Some(NodeData::Text(_)) | None => ClassName::Missing,
        }
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        match self.get(node).map(|n| &n.data) {
            Some(NodeData::Element { class: list, .. }) => {
                list.split_whitespace().any(|c| c == class)
            }
            _ => false,
        }
    }

    /// Concatenated text of `node` and its descendants.
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        if let Some(NodeData::Text(text)) = self.get(node).map(|n| &n.data) {
            out.push_str(text);
        }
        for n in self.descendants(node) {
            if let Some(NodeData::Text(text)) = self.get(n).map(|d| &d.data) {
                out.push_str(text);
            }
        }
        out
    }

    /// Whether `node` or any ancestor is hidden from assistive technology.
    pub fn is_hidden(&self, node: NodeId) -> bool {
        self.ancestors(node).any(|n| {
            self.has_attribute(n, "hidden") || self.attribute(n, "aria-hidden") == Some("true")
        })
    }

    /// The ARIA role of `node`: the explicit `role` attribute, or the
    /// implicit role of its tag.
    pub fn role(&self, node: NodeId) -> Option<&str> {
        if let Some(role) = self.attribute(node, "role") {
            return Some(role);
        }
        let tag = self.tag(node)?;
        let role = match tag {
            Tag::Button => "button",
            Tag::A if self.has_attribute(node, "href") => "link",
            Tag::Nav => "navigation",
            Tag::Ul => "list",
            Tag::Li => "listitem",
            Tag::Table => "table",
            Tag::Tr => "row",
            Tag::Th => "columnheader",
            Tag::Td => "cell",
            Tag::Select => "combobox",
            Tag::Option => "option",
            Tag::H1 | Tag::H2 | Tag::H3 => "heading",
            Tag::Form => "form",
            Tag::Img => "img",
            Tag::Section
                if self.has_attribute(node, "aria-label")
                    || self.has_attribute(node, "aria-labelledby") =>
            {
                "region"
            }
            Tag::Input => match self.attribute(node, "type").unwrap_or("text") {
                "search" => "searchbox",
                "checkbox" => "checkbox",
                "radio" => "radio",
                "button" | "submit" | "reset" => "button",
                _ => "textbox",
            },
            _ => return None,
        };
        Some(role)
    }

    /// Accessible name: `aria-labelledby`, then `aria-label`, then an
    /// associated `<label for>`, then text content for roles named from
    /// content, then `title`.
    pub fn accessible_name(&self, node: NodeId) -> Option<String> {
        if let Some(ids) = self.attribute(node, "aria-labelledby") {
            let name = self.text_of_ids(ids);
            if !name.is_empty() {
                return Some(name);
            }
        }
        if let Some(label) = self.attribute(node, "aria-label") {
            let label = normalize(label);
            if !label.is_empty() {
                return Some(label);
            }
        }
        if matches!(self.tag(node), Some(Tag::Input | Tag::Select)) {
            if let Some(id) = self.attribute(node, "id") {
                let label = self.all_nodes().find(|n| {
                    self.tag(*n) == Some(Tag::Label) && self.attribute(*n, "for") == Some(id)
                });
                if let Some(label) = label {
                    let name = normalize(&self.text_content(label));
                    if !name.is_empty() {
                        return Some(name);
                    }
                }
            }
        }
        if self
            .role(node)
            .is_some_and(|role| NAME_FROM_CONTENT.contains(&role))
        {
            let name = normalize(&self.text_content(node));
            if !name.is_empty() {
                return Some(name);
            }
        }
        self.attribute(node, "title").map(normalize)
    }

    /// Accessible description from `aria-describedby`.
    pub fn accessible_description(&self, node: NodeId) -> Option<String> {
        let ids = self.attribute(node, "aria-describedby")?;
        let description = self.text_of_ids(ids);
        (!description.is_empty()).then_some(description)
    }

    /// All elements matching `query`, in document order.
    pub fn query_all(&self, query: &RoleQuery) -> Vec<NodeId> {
        self.all_nodes()
            .filter(|n| self.role(*n) == Some(query.role.as_str()))
            .filter(|n| query.include_hidden || !self.is_hidden(*n))
            .filter(|n| match &query.name {
                Some(name) => self.accessible_name(*n).as_deref() == Some(name.as_str()),
                None => true,
            })
            .collect()
    }

    /// The single element matching `query`.
    pub fn query(&self, query: &RoleQuery) -> Result<NodeId, QueryError> {
        let matches = self.query_all(query);
        match matches.as_slice() {
            [one] => Ok(*one),
            [] => Err(QueryError::NotFound(query.to_string())),
            many => Err(QueryError::Ambiguous {
                query: query.to_string(),
                count: many.len(),
            }),
        }
    }

    /// Shorthand for a role + name query.
    pub fn get_by_role(&self, role: &str, name: &str) -> Result<NodeId, QueryError> {
        self.query(&RoleQuery::new(role).name(name))
    }

    /// The innermost element whose normalised text content equals `text`.
    pub fn find_by_text(&self, text: &str) -> Option<NodeId> {
        let wanted = normalize(text);
        self.all_nodes()
            .filter(|n| self.is_element(*n))
            .filter(|n| normalize(&self.text_content(*n)) == wanted)
            .last()
    }

    /// The child-index path from the root to `node`.
    pub fn path(&self, node: NodeId) -> Option<Vec<usize>> {
        self.get(node)?;
        let mut path = Vec::new();
        let mut current = node;
        while let Some(parent) = self.parent(current) {
            let index = self.children(parent).iter().position(|c| *c == current)?;
            path.push(index);
            current = parent;
        }
        path.reverse();
        Some(path)
    }

    /// The node at a child-index path, if the current tree has one there.
    pub fn node_at(&self, path: &[usize]) -> Option<NodeId> {
        path.iter()
            .try_fold(self.body(), |node, index| self.children(node).get(*index).copied())
    }

    fn all_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.descendants(self.body()).into_iter()
    }

    fn text_of_ids(&self, ids: &str) -> String {
        let parts: Vec<String> = ids
            .split_whitespace()
            .filter_map(|id| self.element_by_id(id))
            .map(|n| normalize(&self.text_content(n)))
            .filter(|s| !s.is_empty())
            .collect();
        parts.join(" ")
    }

    fn get(&self, node: NodeId) -> Option<&DocNode> {
        self.nodes.get(node.0)
    }

    fn clear(&mut self) {
        self.nodes.truncate(1);
        self.nodes[0].children.clear();
        self.refs.clear();
        self.ids.clear();
    }

    fn push(&mut self, parent: NodeId, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(DocNode {
            parent: Some(parent),
            children: Vec::new(),
            data,
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    fn insert(&mut self, parent: NodeId, node: &Node) {
        match node {
            Node::Empty => {}
            Node::Text(text) => {
                self.push(parent, NodeData::Text(text.clone()));
            }
            Node::Fragment(nodes) => {
                for child in nodes {
                    self.insert(parent, child);
                }
            }
            Node::Element(el) => {
                let id = self.push(
                    parent,
                    NodeData::Element {
                        tag: el.tag(),
                        class: el.classes().join(" "),
                        attrs: el.attributes().to_vec(),
                    },
                );
                if let Some(node_ref) = el.get_node_ref() {
                    self.refs.insert(node_ref, id);
                }
                if let Some(dom_id) = el.attribute("id") {
                    self.ids.entry(dom_id.to_string()).or_insert(id);
                }
                if !el.tag().is_void() {
                    for child in el.child_nodes() {
                        self.insert(id, child);
                    }
                }
            }
        }
    }
}

fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::Element;

    fn sample() -> (Document, NodeRef) {
        let boundary = NodeRef::new();
        let tree = Element::new(Tag::Div)
            .class("page")
            .child(
                Element::new(Tag::Div)
                    .class("card")
                    .node_ref(boundary)
                    .child(Element::new(Tag::H2).attr("id", "card-title").text("Settings"))
                    .child(Element::new(Tag::Button).attr("aria-label", "Close").text("×"))
                    .child(
                        Element::new(Tag::Svg)
                            .class("icon")
                            .child(Element::new(Tag::Path).attr("d", "M0 0")),
                    ),
            )
            .child(Element::new(Tag::A).attr("href", "/docs").text("Docs"))
            .child(Element::new(Tag::Button).flag("hidden").text("Ghost"));
        let mut doc = Document::new();
        doc.mount(&tree.into());
        (doc, boundary)
    }

    #[test]
    fn resolves_bound_references() {
        let (doc, boundary) = sample();
        let card = doc.resolve(boundary).unwrap();
        assert!(doc.has_class(card, "card"));
        assert_eq!(doc.resolve(NodeRef::new()), None);
    }

    #[test]
    fn unmount_unbinds_references() {
        let (mut doc, boundary) = sample();
        doc.unmount();
        assert_eq!(doc.resolve(boundary), None);
        assert!(!doc.is_mounted());
        assert!(doc.children(doc.body()).is_empty());
    }

    #[test]
    fn contains_is_inclusive() {
        let (doc, boundary) = sample();
        let card = doc.resolve(boundary).unwrap();
        let close = doc.get_by_role("button", "Close").unwrap();
        let docs = doc.get_by_role("link", "Docs").unwrap();
        assert!(doc.contains(card, card));
        assert!(doc.contains(card, close));
        assert!(!doc.contains(card, docs));
        assert!(!doc.contains(close, card));
    }

    #[test]
    fn svg_elements_expose_animated_class_names() {
        let (doc, _) = sample();
        let svg = doc
            .descendants(doc.body())
            .into_iter()
            .find(|n| doc.tag(*n) == Some(Tag::Svg))
            .unwrap();
        assert_eq!(doc.class_name(svg), ClassName::Animated("icon"));
        assert_eq!(doc.class_name(svg).as_plain(), None);
        assert_eq!(doc.class_name(doc.body()), ClassName::Plain(""));
    }

    #[test]
    fn text_nodes_have_no_class_name() {
        let (doc, _) = sample();
        let title = doc.element_by_id("card-title").unwrap();
        let text = doc.children(title)[0];
        assert_eq!(doc.class_name(text), ClassName::Missing);
    }

    #[test]
    fn implicit_roles_and_names() {
        let (doc, _) = sample();
        let link = doc.get_by_role("link", "Docs").unwrap();
        assert_eq!(doc.role(link), Some("link"));
        let heading = doc.query(&RoleQuery::new("heading")).unwrap();
        assert_eq!(doc.accessible_name(heading).as_deref(), Some("Settings"));
    }

    #[test]
    fn aria_label_wins_over_content() {
        let (doc, _) = sample();
        let close = doc.get_by_role("button", "Close").unwrap();
        assert_eq!(doc.text_content(close), "×");
    }

    #[test]
    fn hidden_elements_are_excluded_by_default() {
        let (doc, _) = sample();
        assert_eq!(
            doc.get_by_role("button", "Ghost"),
            Err(QueryError::NotFound(r#"role="button" name="Ghost""#.to_string()))
        );
        let ghost = doc
            .query(&RoleQuery::new("button").name("Ghost").include_hidden())
            .unwrap();
        assert!(doc.is_hidden(ghost));
    }

    #[test]
    fn ambiguous_queries_report_count() {
        let tree = Element::new(Tag::Div)
            .child(Element::new(Tag::Button).text("A"))
            .child(Element::new(Tag::Button).text("B"));
        let mut doc = Document::new();
        doc.mount(&tree.into());
        assert_eq!(
            doc.query(&RoleQuery::new("button")),
            Err(QueryError::Ambiguous {
                query: r#"role="button""#.to_string(),
                count: 2,
            })
        );
    }

    #[test]
    fn labelledby_and_describedby_resolve_text() {
        let tree = Element::new(Tag::Div)
            .child(
                Element::new(Tag::Div)
                    .role("dialog")
                    .attr("aria-labelledby", "t")
                    .attr("aria-describedby", "d"),
            )
            .child(Element::new(Tag::H2).attr("id", "t").text("  Delete   file "))
            .child(Element::new(Tag::P).attr("id", "d").text("This cannot be undone."));
        let mut doc = Document::new();
        doc.mount(&tree.into());
        let dialog = doc.get_by_role("dialog", "Delete file").unwrap();
        assert_eq!(
            doc.accessible_description(dialog).as_deref(),
            Some("This cannot be undone.")
        );
    }

    #[test]
    fn label_for_names_inputs() {
        let tree = Element::new(Tag::Form)
            .child(Element::new(Tag::Label).attr("for", "q").text("Query"))
            .child(Element::new(Tag::Input).attr("id", "q").attr("type", "search"));
        let mut doc = Document::new();
        doc.mount(&tree.into());
        assert!(doc.get_by_role("searchbox", "Query").is_ok());
    }

    #[test]
    fn remounting_identical_tree_keeps_ids() {
        let tree: Node = Element::new(Tag::Div).child(Element::new(Tag::Button).text("Go")).into();
        let mut doc = Document::new();
        assert!(doc.mount(&tree));
        let go = doc.get_by_role("button", "Go").unwrap();
        assert!(!doc.mount(&tree));
        assert_eq!(doc.get_by_role("button", "Go").unwrap(), go);
    }

    #[test]
    fn paths_round_trip() {
        let (doc, boundary) = sample();
        let card = doc.resolve(boundary).unwrap();
        let path = doc.path(card).unwrap();
        assert_eq!(path, vec![0, 0]);
        assert_eq!(doc.node_at(&path), Some(card));
        assert_eq!(doc.node_at(&[9, 9]), None);
    }

    #[test]
    fn find_by_text_returns_innermost() {
        let (doc, _) = sample();
        let title = doc.find_by_text("Settings").unwrap();
        assert_eq!(doc.tag(title), Some(Tag::H2));
    }
}
