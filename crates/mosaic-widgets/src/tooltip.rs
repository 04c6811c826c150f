//! Hover and focus tooltip.
//!
//! The trigger is described by a `role="tooltip"` bubble through
//! `aria-describedby`.  The bubble appears when the pointer moves over the
//! trigger or the trigger receives focus, and disappears when the pointer
//! moves elsewhere, focus moves elsewhere, or `Escape` is pressed.

use mosaic_core::listeners::DismissKey;
use mosaic_core::markup::{Element, Node, Tag};
use mosaic_core::{
    props, Callback, Command, Component, Document, DomEvent, ElementId, EventKind, Listener,
    ListenerId, NodeId,
};

struct PointerTracking;
struct FocusTracking;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Show,
    Hide,
}

pub struct Tooltip {
    label: String,
    text: String,
    trigger_id: ElementId,
    tooltip_id: ElementId,
    escape: DismissKey<Message>,
    visible: bool,
}

impl Tooltip {
    /// A tooltip showing `text` for a trigger button labelled `label`.
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        let trigger_id = ElementId::generate();
        Self {
            label: label.into(),
            text: text.into(),
            tooltip_id: trigger_id.child("tooltip"),
            trigger_id,
            escape: DismissKey::new(Callback::message(Message::Hide)),
            visible: false,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// A document listener that shows the bubble for events on the trigger
    /// and hides it for events anywhere else.  Each registration only
    /// reports the transition away from the visibility it was declared
    /// with.
    fn tracker<T: 'static>(&self, event: EventKind) -> Listener<Message> {
        let trigger = self.trigger_id.clone();
        let visible = self.visible;
        Listener::document(
            ListenerId::with_str::<T>(trigger.as_str()),
            event,
            move |dom_event, document| {
                let target = dom_event.target()?;
                let on_trigger = is_within(document, trigger.as_str(), target);
                match (on_trigger, visible) {
                    (true, false) => Some(Message::Show),
                    (false, true) => Some(Message::Hide),
                    _ => None,
                }
            },
        )
        .with_identity(u64::from(visible))
    }
}

fn is_within(document: &Document, id: &str, target: NodeId) -> bool {
    document
        .element_by_id(id)
        .is_some_and(|root| document.contains(root, target))
}

impl Component for Tooltip {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::Show => self.visible = true,
            Message::Hide => self.visible = false,
        }
        Command::none()
    }

    fn view(&self) -> Node {
        props::require_text("Tooltip", "text", Some(self.text.as_str()));
        Element::new(Tag::Span)
            .class("tooltip")
            .child(
                Element::new(Tag::Button)
                    .class("tooltip__trigger")
                    .id(&self.trigger_id)
                    .attr("type", "button")
                    .attr("aria-describedby", self.tooltip_id.as_str())
                    .text(&self.label),
            )
            .child(
                Element::new(Tag::Div)
                    .class("tooltip__bubble")
                    .id(&self.tooltip_id)
                    .role("tooltip")
                    .flag_if(!self.visible, "hidden")
                    .text(&self.text),
            )
            .into()
    }

    fn listeners(&self) -> Vec<Listener<Message>> {
        let mut listeners = vec![
            self.tracker::<PointerTracking>(EventKind::PointerMove),
            self.tracker::<FocusTracking>(EventKind::Focus),
        ];
        if self.visible {
            listeners.push(self.escape.listener());
        }
        listeners
    }
}
