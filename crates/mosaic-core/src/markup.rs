//! Markup tree produced by component views.
//!
//! A view is a plain [`Node`] tree: elements drawn from a closed set of
//! [`Tag`]s, a class list, attributes in insertion order, and children.
//! The tree can be serialised to HTML through [`Display`](std::fmt::Display)
//! or mounted into a [`Document`](crate::document::Document) for event
//! dispatch and role queries.
//!
//! ```rust
//! use mosaic_core::markup::{Element, Tag};
//!
//! let button = Element::new(Tag::Button)
//!     .class("button")
//!     .class_if(true, "button--primary")
//!     .attr("type", "button")
//!     .text("Save");
//!
//! assert_eq!(
//!     button.to_string(),
//!     r#"<button class="button button--primary" type="button">Save</button>"#,
//! );
//! ```

use crate::ids::{ElementId, NodeRef};
use std::fmt::{self, Write};

/// The element kinds a view may produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    A,
    Button,
    Div,
    Span,
    P,
    H1,
    H2,
    H3,
    Header,
    Footer,
    Nav,
    Section,
    Ul,
    Li,
    Table,
    Thead,
    Tbody,
    Tr,
    Th,
    Td,
    Form,
    Label,
    Input,
    Select,
    Option,
    Img,
    Svg,
    Path,
    Circle,
}

impl Tag {
    /// The lowercase tag name.
    pub fn as_str(self) -> &'static str {
        match self {
            Tag::A => "a",
            Tag::Button => "button",
            Tag::Div => "div",
            Tag::Span => "span",
            Tag::P => "p",
            Tag::H1 => "h1",
            Tag::H2 => "h2",
            Tag::H3 => "h3",
            Tag::Header => "header",
            Tag::Footer => "footer",
            Tag::Nav => "nav",
            Tag::Section => "section",
            Tag::Ul => "ul",
            Tag::Li => "li",
            Tag::Table => "table",
            Tag::Thead => "thead",
            Tag::Tbody => "tbody",
            Tag::Tr => "tr",
            Tag::Th => "th",
            Tag::Td => "td",
            Tag::Form => "form",
            Tag::Label => "label",
            Tag::Input => "input",
            Tag::Select => "select",
            Tag::Option => "option",
            Tag::Img => "img",
            Tag::Svg => "svg",
            Tag::Path => "path",
            Tag::Circle => "circle",
        }
    }

    /// Void elements have no children and no closing tag.
    pub fn is_void(self) -> bool {
        matches!(self, Tag::Input | Tag::Img)
    }

    /// Elements in the SVG namespace.  Their `className` is an animated
    /// value rather than a plain string.
    pub fn is_svg(self) -> bool {
        matches!(self, Tag::Svg | Tag::Path | Tag::Circle)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single attribute.  `value: None` is a boolean attribute such as
/// `hidden` or `disabled`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: Option<String>,
}

/// An element node with its class list, attributes and children.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: Tag,
    classes: Vec<String>,
    attrs: Vec<Attribute>,
    node_ref: Option<NodeRef>,
    children: Vec<Node>,
}

impl Element {
    /// Create an empty element.
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            classes: Vec::new(),
            attrs: Vec::new(),
            node_ref: None,
            children: Vec::new(),
        }
    }

    /// Append one or more whitespace-separated class tokens.
    pub fn class(mut self, class: impl AsRef<str>) -> Self {
        for token in class.as_ref().split_whitespace() {
            if !self.classes.iter().any(|c| c == token) {
                self.classes.push(token.to_string());
            }
        }
        self
    }

    /// Append a class only when `condition` holds.
    pub fn class_if(self, condition: bool, class: impl AsRef<str>) -> Self {
        if condition {
            self.class(class)
        } else {
            self
        }
    }

    /// Set an attribute, replacing any earlier value with the same name.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name.into(), Some(value.into()));
        self
    }

    /// Set an attribute when `value` is `Some`.
    pub fn attr_opt(self, name: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.attr(name, value),
            None => self,
        }
    }

    /// Set a boolean attribute.
    pub fn flag(mut self, name: impl Into<String>) -> Self {
        self.set(name.into(), None);
        self
    }

    /// Set a boolean attribute only when `condition` holds.
    pub fn flag_if(self, condition: bool, name: impl Into<String>) -> Self {
        if condition {
            self.flag(name)
        } else {
            self
        }
    }

    /// Set the `id` attribute.
    pub fn id(self, id: &ElementId) -> Self {
        self.attr("id", id.as_str())
    }

    /// Set an explicit ARIA `role`.
    pub fn role(self, role: &str) -> Self {
        self.attr("role", role)
    }

    /// Bind a boundary reference to this element.
    pub fn node_ref(mut self, node_ref: NodeRef) -> Self {
        self.node_ref = Some(node_ref);
        self
    }

    /// Append a child node.
    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append several child nodes.
    pub fn children<I, N>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// Append a text child.
    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    pub fn tag(&self) -> Tag {
        self.tag
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attrs
    }

    /// Look up an attribute value.  Boolean attributes yield `Some("")`.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_deref().unwrap_or(""))
    }

    pub fn get_node_ref(&self) -> Option<NodeRef> {
        self.node_ref
    }

    pub fn child_nodes(&self) -> &[Node] {
        &self.children
    }

    fn set(&mut self, name: String, value: Option<String>) {
        if let Some(existing) = self.attrs.iter_mut().find(|a| a.name == name) {
            existing.value = value;
        } else {
            self.attrs.push(Attribute { name, value });
        }
    }

    fn write_html(&self, out: &mut impl Write) -> fmt::Result {
        write!(out, "<{}", self.tag)?;
        if !self.classes.is_empty() {
            out.write_str(" class=\"")?;
            write_escaped(out, &self.classes.join(" "), true)?;
            out.write_char('"')?;
        }
        for attr in &self.attrs {
            write!(out, " {}", attr.name)?;
            if let Some(value) = &attr.value {
                out.write_str("=\"")?;
                write_escaped(out, value, true)?;
                out.write_char('"')?;
            }
        }
        out.write_char('>')?;
        if self.tag.is_void() {
            return Ok(());
        }
        for child in &self.children {
            child.write_html(out)?;
        }
        write!(out, "</{}>", self.tag)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_html(f)
    }
}

/// A node in a rendered view.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Node {
    Element(Element),
    Text(String),
    /// Several sibling nodes without a wrapping element.
    Fragment(Vec<Node>),
    /// Renders nothing.
    #[default]
    Empty,
}

impl Node {
    /// Build a fragment from an iterator of nodes.
    pub fn fragment<I, N>(nodes: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        Node::Fragment(nodes.into_iter().map(Into::into).collect())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Node::Empty => true,
            Node::Fragment(nodes) => nodes.iter().all(Node::is_empty),
            Node::Text(_) | Node::Element(_) => false,
        }
    }

    /// Serialise to HTML.
    pub fn to_html(&self) -> String {
        self.to_string()
    }

    fn write_html(&self, out: &mut impl Write) -> fmt::Result {
        match self {
            Node::Element(el) => el.write_html(out),
            Node::Text(text) => write_escaped(out, text, false),
            Node::Fragment(nodes) => {
                for node in nodes {
                    node.write_html(out)?;
                }
                Ok(())
            }
            Node::Empty => Ok(()),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_html(f)
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

impl<T: Into<Node>> From<Option<T>> for Node {
    fn from(node: Option<T>) -> Self {
        node.map(Into::into).unwrap_or(Node::Empty)
    }
}

fn write_escaped(out: &mut impl Write, text: &str, in_attribute: bool) -> fmt::Result {
    for ch in text.chars() {
        match ch {
            '&' => out.write_str("&amp;")?,
            '<' => out.write_str("&lt;")?,
            '>' => out.write_str("&gt;")?,
            '"' if in_attribute => out.write_str("&quot;")?,
            _ => out.write_char(ch)?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_classes_before_attributes() {
        let el = Element::new(Tag::Div).attr("role", "status").class("spinner");
        assert_eq!(el.to_string(), r#"<div class="spinner" role="status"></div>"#);
    }

    #[test]
    fn class_if_skips_false_condition() {
        let el = Element::new(Tag::Span).class("a").class_if(false, "b").class_if(true, "c");
        assert_eq!(el.classes(), ["a", "c"]);
    }

    #[test]
    fn duplicate_classes_collapse() {
        let el = Element::new(Tag::Span).class("a b").class("b");
        assert_eq!(el.classes(), ["a", "b"]);
    }

    #[test]
    fn later_attribute_replaces_earlier() {
        let el = Element::new(Tag::Input).attr("type", "text").attr("type", "search");
        assert_eq!(el.attribute("type"), Some("search"));
        assert_eq!(el.attributes().len(), 1);
    }

    #[test]
    fn boolean_attributes_render_bare() {
        let el = Element::new(Tag::Div).flag("hidden");
        assert_eq!(el.to_string(), "<div hidden></div>");
        assert_eq!(el.attribute("hidden"), Some(""));
    }

    #[test]
    fn void_elements_have_no_closing_tag() {
        let el = Element::new(Tag::Input).attr("type", "search").text("ignored");
        assert_eq!(el.to_string(), r#"<input type="search">"#);
    }

    #[test]
    fn text_and_attributes_are_escaped() {
        let el = Element::new(Tag::P).attr("title", "a \"b\" & c").text("<x> & y");
        assert_eq!(
            el.to_string(),
            r#"<p title="a &quot;b&quot; &amp; c">&lt;x&gt; &amp; y</p>"#
        );
    }

    #[test]
    fn fragments_and_empty_flatten() {
        let node = Node::fragment([Node::from("a"), Node::Empty, Node::from("b")]);
        assert_eq!(node.to_html(), "ab");
        assert!(Node::fragment([Node::Empty]).is_empty());
    }

    #[test]
    fn optional_nodes_convert() {
        let none: Option<&str> = None;
        assert_eq!(Node::from(none), Node::Empty);
        assert_eq!(Node::from(Some("x")), Node::Text("x".into()));
    }

    #[test]
    fn svg_tags_are_classified() {
        assert!(Tag::Svg.is_svg());
        assert!(Tag::Path.is_svg());
        assert!(!Tag::Div.is_svg());
    }
}
