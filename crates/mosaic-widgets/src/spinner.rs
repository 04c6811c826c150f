//! Loading indicator.
//!
//! Renders a `role="status"` region whose visible part is a decorative
//! circle and whose text is a visually hidden label, so screen readers
//! announce "Loading" while sighted users see the animation.  Stopped
//! spinners render nothing.

use mosaic_core::markup::{Element, Node, Tag};
use mosaic_core::{props, Command, Component, Listener};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpinnerSize {
    Sm,
    #[default]
    Md,
    Lg,
}

impl SpinnerSize {
    fn token(self) -> &'static str {
        match self {
            Self::Sm => "sm",
            Self::Md => "md",
            Self::Lg => "lg",
        }
    }
}

/// Messages for the spinner component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Start,
    Stop,
}

/// A loading spinner, spinning from creation.
pub struct Spinner {
    label: String,
    size: SpinnerSize,
    spinning: bool,
}

impl Spinner {
    pub fn new() -> Self {
        Self {
            label: "Loading".to_string(),
            size: SpinnerSize::default(),
            spinning: true,
        }
    }

    /// Text announced to assistive technology (default: "Loading").
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_size(mut self, size: SpinnerSize) -> Self {
        self.size = size;
        self
    }

    pub fn start(&mut self) {
        self.spinning = true;
    }

    pub fn stop(&mut self) {
        self.spinning = false;
    }

    pub fn is_spinning(&self) -> bool {
        self.spinning
    }
}

impl Default for Spinner {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for Spinner {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::Start => self.start(),
            Message::Stop => self.stop(),
        }
        Command::none()
    }

    fn view(&self) -> Node {
        if !self.spinning {
            return Node::Empty;
        }
        props::require_text("Spinner", "label", Some(self.label.as_str()));
        Element::new(Tag::Div)
            .class("spinner")
            .class(format!("spinner--{}", self.size.token()))
            .role("status")
            .child(
                Element::new(Tag::Span)
                    .class("spinner__circle")
                    .attr("aria-hidden", "true"),
            )
            .child(
                Element::new(Tag::Span)
                    .class("visually-hidden")
                    .text(&self.label),
            )
            .into()
    }

    fn listeners(&self) -> Vec<Listener<Message>> {
        vec![]
    }
}
