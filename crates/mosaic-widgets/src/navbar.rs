//! Site navigation bar with a collapsible menu.
//!
//! The menu toggle reports its state through `aria-expanded` and points at
//! the menu with `aria-controls`.  While the menu is open, a pointer-down
//! outside the navigation landmark or a press of `Escape` closes it; both
//! detectors are only declared while open.

use mosaic_core::listeners::{activate, DismissKey, OutsideClick};
use mosaic_core::markup::{Element, Node, Tag};
use mosaic_core::{props, Callback, Command, Component, ElementId, Listener, NodeRef};

/// Messages for the navbar component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    ToggleMenu,
    CloseMenu,
    /// The link at this index was followed.
    Navigate(usize),
}

/// A menu entry.
#[derive(Debug, Clone)]
pub struct NavLink {
    pub label: String,
    pub href: String,
    id: ElementId,
}

impl NavLink {
    pub fn new(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
            id: ElementId::generate(),
        }
    }
}

/// A navigation bar.
///
/// # Example
///
/// ```ignore
/// use mosaic_widgets::navbar::{Navbar, NavLink};
///
/// let nav = Navbar::new("Mosaic", "/")
///     .link(NavLink::new("Docs", "/docs"))
///     .link(NavLink::new("Blog", "/blog"))
///     .with_current("/docs");
/// ```
pub struct Navbar {
    id: ElementId,
    brand: String,
    brand_href: String,
    links: Vec<NavLink>,
    current: Option<String>,
    toggle_id: ElementId,
    menu_id: ElementId,
    boundary: NodeRef,
    outside: OutsideClick<Message>,
    escape: DismissKey<Message>,
    menu_open: bool,
}

impl Navbar {
    pub fn new(brand: impl Into<String>, brand_href: impl Into<String>) -> Self {
        let id = ElementId::generate();
        let boundary = NodeRef::new();
        let close = Callback::message(Message::CloseMenu);
        Self {
            toggle_id: id.child("toggle"),
            menu_id: id.child("menu"),
            id,
            brand: brand.into(),
            brand_href: brand_href.into(),
            links: Vec::new(),
            current: None,
            boundary,
            outside: OutsideClick::new(boundary, close.clone()).with_enabled(false),
            escape: DismissKey::new(close),
            menu_open: false,
        }
    }

    pub fn link(mut self, link: NavLink) -> Self {
        self.links.push(link);
        self
    }

    /// Mark the link with this href as the current page.
    pub fn with_current(mut self, href: impl Into<String>) -> Self {
        self.current = Some(href.into());
        self
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn links(&self) -> &[NavLink] {
        &self.links
    }

    fn set_menu_open(&mut self, open: bool) {
        self.menu_open = open;
        self.outside.set_enabled(open);
    }
}

impl Component for Navbar {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::ToggleMenu => self.set_menu_open(!self.menu_open),
            Message::CloseMenu => self.set_menu_open(false),
            Message::Navigate(i) => {
                if let Some(link) = self.links.get(i) {
                    self.current = Some(link.href.clone());
                }
                self.set_menu_open(false);
            }
        }
        Command::none()
    }

    fn view(&self) -> Node {
        props::require_text("Navbar", "brand", Some(self.brand.as_str()));

        let menu = Element::new(Tag::Ul)
            .class("navbar__menu")
            .class_if(self.menu_open, "navbar__menu--open")
            .id(&self.menu_id)
            .children(self.links.iter().map(|link| {
                let current = self.current.as_deref() == Some(link.href.as_str());
                Element::new(Tag::Li).child(
                    Element::new(Tag::A)
                        .class("navbar__link")
                        .id(&link.id)
                        .attr("href", &link.href)
                        .attr_opt("aria-current", current.then_some("page"))
                        .text(&link.label),
                )
            }));

        Element::new(Tag::Header)
            .class("navbar")
            .id(&self.id)
            .child(
                Element::new(Tag::Nav)
                    .class("navbar__nav")
                    .attr("aria-label", "Main")
                    .node_ref(self.boundary)
                    .child(
                        Element::new(Tag::A)
                            .class("navbar__brand")
                            .attr("href", &self.brand_href)
                            .text(&self.brand),
                    )
                    .child(
                        Element::new(Tag::Button)
                            .class("navbar__toggle")
                            .id(&self.toggle_id)
                            .attr("type", "button")
                            .attr("aria-label", "Menu")
                            .attr("aria-expanded", self.menu_open.to_string())
                            .attr("aria-controls", self.menu_id.as_str())
                            .text("\u{2630}"),
                    )
                    .child(menu),
            )
            .into()
    }

    fn listeners(&self) -> Vec<Listener<Message>> {
        let toggle = self.toggle_id.clone();
        let link_ids: Vec<ElementId> = self.links.iter().map(|l| l.id.clone()).collect();
        let mut targets = vec![toggle.clone()];
        targets.extend(link_ids.iter().cloned());

        let mut listeners = vec![activate(&self.id, targets, move |id| {
            match link_ids.iter().position(|l| l == id) {
                Some(index) => Message::Navigate(index),
                None => Message::ToggleMenu,
            }
        })];
        listeners.extend(self.outside.listener());
        if self.menu_open {
            listeners.push(self.escape.listener());
        }
        listeners
    }
}
