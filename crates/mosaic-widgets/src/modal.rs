//! Dismissible dialog overlay with title, body, and action buttons.
//!
//! The dialog is labelled by its title and described by its body through a
//! generated [`DialogIds`] pair.  It is dismissed by a pointer-down outside
//! the dialog box, by `Escape`, or by the close button; each path reports
//! [`Message::Dismiss`].

use mosaic_core::listeners::{activate, DismissKey, OutsideClick};
use mosaic_core::markup::{Element, Node, Tag};
use mosaic_core::{props, Callback, Command, Component, ElementId, Listener, NodeRef};

/// Ids cross-referencing the dialog's accessible name and description.
///
/// Generated once per dialog, so two dialogs open at the same time never
/// share ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogIds {
    pub title_id: ElementId,
    pub description_id: ElementId,
}

impl DialogIds {
    pub fn generate() -> Self {
        Self {
            title_id: ElementId::generate(),
            description_id: ElementId::generate(),
        }
    }
}

/// A button in the dialog footer.
#[derive(Debug, Clone)]
pub struct Action {
    /// Display label for the button.
    pub label: String,
    id: ElementId,
}

impl Action {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            id: ElementId::generate(),
        }
    }

    pub fn id(&self) -> &ElementId {
        &self.id
    }
}

/// Messages for the modal component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// An action was selected (by index).
    Select(usize),
    /// The modal was dismissed (outside pointer-down, Escape, or close button).
    Dismiss,
}

/// An accessible dialog overlay.
///
/// # Example
///
/// ```ignore
/// use mosaic_widgets::modal::{Modal, Action};
///
/// let confirm = Modal::new("Delete file?")
///     .body("This cannot be undone.")
///     .action(Action::new("Delete"))
///     .action(Action::new("Cancel"));
/// ```
pub struct Modal {
    title: String,
    body: Node,
    actions: Vec<Action>,
    ids: DialogIds,
    root_id: ElementId,
    close_id: ElementId,
    close_label: String,
    boundary: NodeRef,
    outside: OutsideClick<Message>,
    escape: DismissKey<Message>,
    close_on_escape: bool,
    open: bool,
}

impl Modal {
    /// Create an open modal with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        let boundary = NodeRef::new();
        let dismiss = Callback::message(Message::Dismiss);
        Self {
            title: title.into(),
            body: Node::Empty,
            actions: Vec::new(),
            ids: DialogIds::generate(),
            root_id: ElementId::generate(),
            close_id: ElementId::generate(),
            close_label: "Close".to_string(),
            boundary,
            outside: OutsideClick::new(boundary, dismiss.clone()),
            escape: DismissKey::new(dismiss),
            close_on_escape: true,
            open: true,
        }
    }

    /// Set the body content.  The body is the dialog's accessible description.
    pub fn body(mut self, body: impl Into<Node>) -> Self {
        self.body = body.into();
        self
    }

    /// Add an action button to the footer.
    pub fn action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    /// Whether a pointer-down outside the dialog dismisses it (default: true).
    pub fn with_dismiss_on_outside(mut self, enabled: bool) -> Self {
        self.outside.set_enabled(enabled);
        self
    }

    /// Whether `Escape` dismisses the dialog (default: true).
    pub fn with_close_on_escape(mut self, enabled: bool) -> Self {
        self.close_on_escape = enabled;
        self
    }

    /// Accessible label of the close button (default: "Close").
    pub fn with_close_label(mut self, label: impl Into<String>) -> Self {
        self.close_label = label.into();
        self
    }

    /// Start hidden.
    pub fn closed(mut self) -> Self {
        self.open = false;
        self
    }

    pub fn show(&mut self) {
        self.open = true;
    }

    pub fn hide(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn ids(&self) -> &DialogIds {
        &self.ids
    }

    /// The boundary outside of which pointer-downs dismiss.
    pub fn boundary(&self) -> NodeRef {
        self.boundary
    }
}

impl Component for Modal {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::Dismiss => self.open = false,
            Message::Select(_) => {}
        }
        Command::none()
    }

    fn view(&self) -> Node {
        if !self.open {
            return Node::Empty;
        }
        props::require_text("Modal", "title", Some(self.title.as_str()));

        let header = Element::new(Tag::Header)
            .class("modal__header")
            .child(
                Element::new(Tag::H2)
                    .class("modal__title")
                    .id(&self.ids.title_id)
                    .text(&self.title),
            )
            .child(
                Element::new(Tag::Button)
                    .class("modal__close")
                    .id(&self.close_id)
                    .attr("type", "button")
                    .attr("aria-label", &self.close_label)
                    .text("\u{00d7}"),
            );

        let footer = (!self.actions.is_empty()).then(|| {
            Element::new(Tag::Footer)
                .class("modal__footer")
                .children(self.actions.iter().map(|action| {
                    Element::new(Tag::Button)
                        .class("modal__action")
                        .id(&action.id)
                        .attr("type", "button")
                        .text(&action.label)
                }))
        });

        Element::new(Tag::Div)
            .class("modal-overlay")
            .id(&self.root_id)
            .child(
                Element::new(Tag::Div)
                    .class("modal")
                    .role("dialog")
                    .attr("aria-modal", "true")
                    .attr("aria-labelledby", self.ids.title_id.as_str())
                    .attr("aria-describedby", self.ids.description_id.as_str())
                    .node_ref(self.boundary)
                    .child(header)
                    .child(
                        Element::new(Tag::Div)
                            .class("modal__body")
                            .id(&self.ids.description_id)
                            .child(self.body.clone()),
                    )
                    .child(footer),
            )
            .into()
    }

    fn listeners(&self) -> Vec<Listener<Message>> {
        if !self.open {
            return vec![];
        }
        let mut listeners = Vec::new();
        listeners.extend(self.outside.listener());
        if self.close_on_escape {
            listeners.push(self.escape.listener());
        }

        let close_id = self.close_id.clone();
        let action_ids: Vec<ElementId> = self.actions.iter().map(|a| a.id.clone()).collect();
        let mut targets = vec![close_id.clone()];
        targets.extend(action_ids.iter().cloned());
        listeners.push(activate(&self.root_id, targets, move |id| {
            match action_ids.iter().position(|a| a == id) {
                Some(index) => Message::Select(index),
                None => Message::Dismiss,
            }
        }));
        listeners
    }
}
