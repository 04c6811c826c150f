//! Dismissible notification banner with optional auto-dismiss.
//!
//! Warnings and errors are announced with `role="alert"`; info and success
//! messages use the politer `role="status"`.  The auto-dismiss timer is
//! scheduled once, when the notification is first mounted, and is cancelled
//! if the notification is closed or torn down first.

use mosaic_core::listeners::{activate, After};
use mosaic_core::markup::{Element, Node, Tag};
use mosaic_core::{props, Callback, Command, Component, ElementId, Listener};
use std::time::Duration;

/// How long a notification stays up by default.
pub const DEFAULT_AUTO_DISMISS: Duration = Duration::from_secs(5);

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Kind {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl Kind {
    fn token(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }

    /// The live-region role used to announce this kind.
    pub fn role(self) -> &'static str {
        match self {
            Self::Warning | Self::Error => "alert",
            Self::Info | Self::Success => "status",
        }
    }
}

/// Messages for the notification component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Closed by the user or by the auto-dismiss timer.
    Dismiss,
}

/// A notification banner.
///
/// # Example
///
/// ```ignore
/// use mosaic_widgets::notification::{Kind, Notification};
///
/// let saved = Notification::new("Changes saved").with_kind(Kind::Success);
/// let sticky = Notification::new("Connection lost")
///     .with_kind(Kind::Error)
///     .with_auto_dismiss(None);
/// ```
pub struct Notification {
    id: ElementId,
    close_id: ElementId,
    kind: Kind,
    title: Option<String>,
    text: String,
    auto_dismiss: Option<Duration>,
    dismissible: bool,
    on_timeout: Callback<Message>,
    visible: bool,
}

impl Notification {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: ElementId::generate(),
            close_id: ElementId::generate(),
            kind: Kind::default(),
            title: None,
            text: text.into(),
            auto_dismiss: Some(DEFAULT_AUTO_DISMISS),
            dismissible: true,
            on_timeout: Callback::message(Message::Dismiss),
            visible: true,
        }
    }

    pub fn with_kind(mut self, kind: Kind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Delay before the notification closes itself; `None` keeps it up
    /// until closed.
    pub fn with_auto_dismiss(mut self, delay: Option<Duration>) -> Self {
        self.auto_dismiss = delay;
        self
    }

    /// Whether to render a close button (default: true).
    pub fn with_dismissible(mut self, dismissible: bool) -> Self {
        self.dismissible = dismissible;
        self
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

impl Component for Notification {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::Dismiss => self.visible = false,
        }
        Command::none()
    }

    fn view(&self) -> Node {
        if !self.visible {
            return Node::Empty;
        }
        props::require_text("Notification", "text", Some(self.text.as_str()));

        let close = self.dismissible.then(|| {
            Element::new(Tag::Button)
                .class("notification__close")
                .id(&self.close_id)
                .attr("type", "button")
                .attr("aria-label", "Dismiss notification")
                .text("\u{00d7}")
        });

        Element::new(Tag::Div)
            .class("notification")
            .class(format!("notification--{}", self.kind.token()))
            .id(&self.id)
            .role(self.kind.role())
            .child(self.title.as_ref().map(|title| {
                Element::new(Tag::P)
                    .class("notification__title")
                    .text(title)
            }))
            .child(Element::new(Tag::P).class("notification__text").text(&self.text))
            .child(close)
            .into()
    }

    fn listeners(&self) -> Vec<Listener<Message>> {
        if !self.visible {
            return vec![];
        }
        let mut listeners = Vec::new();
        if let Some(delay) = self.auto_dismiss {
            listeners.push(After::new(delay, self.id.as_str()).listener(self.on_timeout.clone()));
        }
        if self.dismissible {
            listeners.push(activate(&self.id, vec![self.close_id.clone()], |_| {
                Message::Dismiss
            }));
        }
        listeners
    }
}
