//! Accordion: a group of disclosure sections with at most one expanded.
//!
//! Expansion state lives only in the [`DisclosureGroup`].  Each section
//! derives its `aria-expanded` and `hidden` attributes by comparing its own
//! activator id against the group, so there is never a moment where two
//! sections read as open.

use mosaic_core::listeners::activate;
use mosaic_core::markup::{Element, Node, Tag};
use mosaic_core::{Command, Component, ElementId, Listener};

/// Single-select expansion state for a set of sections.
///
/// Activating the expanded section collapses it; activating any other
/// section expands that one instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisclosureGroup {
    expanded: Option<ElementId>,
}

impl DisclosureGroup {
    /// A group with every section collapsed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the initially expanded section.
    pub fn with_expanded(mut self, id: ElementId) -> Self {
        self.expanded = Some(id);
        self
    }

    pub fn expanded(&self) -> Option<&ElementId> {
        self.expanded.as_ref()
    }

    pub fn is_expanded(&self, id: &ElementId) -> bool {
        self.expanded.as_ref() == Some(id)
    }

    /// Apply one activation of section `id`.
    pub fn toggle(&mut self, id: &ElementId) {
        if self.is_expanded(id) {
            self.expanded = None;
        } else {
            self.expanded = Some(id.clone());
        }
    }
}

/// One expandable section.  Its activator and content ids are generated
/// once and stay stable across renders.
#[derive(Debug, Clone)]
pub struct Section {
    title: String,
    body: Node,
    activator_id: ElementId,
    content_id: ElementId,
}

impl Section {
    pub fn new(title: impl Into<String>, body: impl Into<Node>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            activator_id: ElementId::generate(),
            content_id: ElementId::generate(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn activator_id(&self) -> &ElementId {
        &self.activator_id
    }

    pub fn content_id(&self) -> &ElementId {
        &self.content_id
    }

    fn view(&self, group: &DisclosureGroup, heading: Tag) -> Element {
        let expanded = group.is_expanded(&self.activator_id);
        Element::new(Tag::Div)
            .class("accordion__section")
            .class_if(expanded, "accordion__section--expanded")
            .child(
                Element::new(heading).class("accordion__heading").child(
                    Element::new(Tag::Button)
                        .class("accordion__trigger")
                        .id(&self.activator_id)
                        .attr("type", "button")
                        .attr("aria-expanded", expanded.to_string())
                        .attr("aria-controls", self.content_id.as_str())
                        .text(&self.title),
                ),
            )
            .child(
                Element::new(Tag::Div)
                    .class("accordion__panel")
                    .id(&self.content_id)
                    .role("region")
                    .attr("aria-labelledby", self.activator_id.as_str())
                    .flag_if(!expanded, "hidden")
                    .child(self.body.clone()),
            )
    }
}

/// Messages for the accordion component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// The activator with this id was clicked.
    Toggle(ElementId),
}

/// A stack of [`Section`]s sharing one [`DisclosureGroup`].
///
/// # Example
///
/// ```ignore
/// use mosaic_widgets::accordion::{Accordion, Section};
///
/// let faq = Accordion::new()
///     .with_section(Section::new("Shipping", "Ships in 2 days."))
///     .with_section(Section::new("Returns", "30 day returns."))
///     .with_expanded(0);
/// ```
#[derive(Debug, Clone)]
pub struct Accordion {
    id: ElementId,
    sections: Vec<Section>,
    group: DisclosureGroup,
    heading: Tag,
}

impl Default for Accordion {
    fn default() -> Self {
        Self::new()
    }
}

impl Accordion {
    pub fn new() -> Self {
        Self {
            id: ElementId::generate(),
            sections: Vec::new(),
            group: DisclosureGroup::new(),
            heading: Tag::H3,
        }
    }

    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    /// Expand the section at `index` initially.  Out-of-range indexes are
    /// ignored.
    pub fn with_expanded(mut self, index: usize) -> Self {
        match self.sections.get(index) {
            Some(section) => {
                self.group = DisclosureGroup::new().with_expanded(section.activator_id.clone())
            }
            None => mosaic_core::props::warn_invalid(
                "Accordion",
                "expanded",
                format!("no section at index {index}"),
            ),
        }
        self
    }

    /// Heading element wrapping each activator (default `h3`).
    pub fn with_heading(mut self, heading: Tag) -> Self {
        self.heading = heading;
        self
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn group(&self) -> &DisclosureGroup {
        &self.group
    }

    /// Index of the expanded section, if any.
    pub fn expanded_index(&self) -> Option<usize> {
        let expanded = self.group.expanded()?;
        self.sections
            .iter()
            .position(|s| &s.activator_id == expanded)
    }
}

impl Component for Accordion {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::Toggle(id) => {
                if self.sections.iter().any(|s| s.activator_id == id) {
                    self.group.toggle(&id);
                } else {
                    tracing::debug!(%id, "toggle for unknown accordion section");
                }
            }
        }
        Command::none()
    }

    fn view(&self) -> Node {
        Element::new(Tag::Div)
            .class("accordion")
            .id(&self.id)
            .children(
                self.sections
                    .iter()
                    .map(|section| section.view(&self.group, self.heading)),
            )
            .into()
    }

    fn listeners(&self) -> Vec<Listener<Message>> {
        if self.sections.is_empty() {
            return vec![];
        }
        let targets = self
            .sections
            .iter()
            .map(|s| s.activator_id.clone())
            .collect();
        vec![activate(&self.id, targets, |id| Message::Toggle(id.clone()))]
    }
}
