use crate::document::NodeId;
use std::fmt;
use std::str::FromStr;

/// The event types a document-level listener can observe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    PointerDown,
    PointerMove,
    PointerUp,
    Click,
    Focus,
    KeyDown,
    Input,
}

/// An event dispatched through a [`Document`](crate::document::Document).
///
/// Events are delivered to listeners in the order the host dispatches them;
/// nothing is reordered or batched.  A pointer gesture is a sequence of
/// events (`PointerDown`, any number of `PointerMove`, `PointerUp`, and a
/// `Click` when down and up land on the same element).
///
/// # Example
///
/// ```rust,ignore
/// program.dispatch(DomEvent::KeyDown(KeyPress::new(Key::Escape)))?;
/// program.dispatch(DomEvent::PointerDown(backdrop))?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomEvent {
    /// A pointer button was pressed over `target`.
    PointerDown(NodeId),
    /// The pointer moved over `target`.
    PointerMove(NodeId),
    /// A pointer button was released over `target`.
    PointerUp(NodeId),
    /// A completed activation of `target`.
    Click(NodeId),
    /// `target` received keyboard focus.
    Focus(NodeId),
    /// A key was pressed.
    KeyDown(KeyPress),
    /// The value of a form control changed.
    Input { target: NodeId, value: String },
}

impl DomEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            DomEvent::PointerDown(_) => EventKind::PointerDown,
            DomEvent::PointerMove(_) => EventKind::PointerMove,
            DomEvent::PointerUp(_) => EventKind::PointerUp,
            DomEvent::Click(_) => EventKind::Click,
            DomEvent::Focus(_) => EventKind::Focus,
            DomEvent::KeyDown(_) => EventKind::KeyDown,
            DomEvent::Input { .. } => EventKind::Input,
        }
    }

    /// The node the event was dispatched at, if any.  Key presses without a
    /// focused element have no target.
    pub fn target(&self) -> Option<NodeId> {
        match self {
            DomEvent::PointerDown(t)
            | DomEvent::PointerMove(t)
            | DomEvent::PointerUp(t)
            | DomEvent::Click(t)
            | DomEvent::Focus(t) => Some(*t),
            DomEvent::KeyDown(press) => press.target,
            DomEvent::Input { target, .. } => Some(*target),
        }
    }
}

/// A key-down event: the key and the focused element it was sent to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub target: Option<NodeId>,
}

impl KeyPress {
    /// A key press with no focused element.
    pub fn new(key: Key) -> Self {
        Self { key, target: None }
    }

    /// A key press delivered to a focused element.
    pub fn on(key: Key, target: NodeId) -> Self {
        Self {
            key,
            target: Some(target),
        }
    }
}

/// Keyboard keys, named after their DOM `KeyboardEvent.key` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Tab,
    Space,
    Backspace,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    Char(char),
}

/// Error returned when a DOM key name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown key name: {0:?}")]
pub struct KeyParseError(pub String);

impl FromStr for Key {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = match s {
            // "Esc" is the legacy name some engines still report.
            "Escape" | "Esc" => Key::Escape,
            "Enter" => Key::Enter,
            "Tab" => Key::Tab,
            " " | "Spacebar" => Key::Space,
            "Backspace" => Key::Backspace,
            "ArrowUp" | "Up" => Key::ArrowUp,
            "ArrowDown" | "Down" => Key::ArrowDown,
            "ArrowLeft" | "Left" => Key::ArrowLeft,
            "ArrowRight" | "Right" => Key::ArrowRight,
            "Home" => Key::Home,
            "End" => Key::End,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => return Err(KeyParseError(other.to_string())),
                }
            }
        };
        Ok(key)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Escape => f.write_str("Escape"),
            Key::Enter => f.write_str("Enter"),
            Key::Tab => f.write_str("Tab"),
            Key::Space => f.write_str(" "),
            Key::Backspace => f.write_str("Backspace"),
            Key::ArrowUp => f.write_str("ArrowUp"),
            Key::ArrowDown => f.write_str("ArrowDown"),
            Key::ArrowLeft => f.write_str("ArrowLeft"),
            Key::ArrowRight => f.write_str("ArrowRight"),
            Key::Home => f.write_str("Home"),
            Key::End => f.write_str("End"),
            Key::Char(c) => write!(f, "{c}"),
        }
    }
}
