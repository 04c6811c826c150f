use crate::command::Command;
use crate::listener::Listener;
use crate::markup::Node;

/// A reusable piece of UI that renders a markup fragment.
///
/// `Component` is nearly identical to [`Model`](crate::Model) but has no
/// `init`: components are constructed by their parent with builder methods
/// and embedded in the parent's state.  A parent decides *where* each child
/// renders by placing the child's [`Node`] inside its own tree.
///
/// # Composition pattern
///
/// Wrap the component's message type in a variant of the parent message and
/// use [`Command::map`] and [`Listener::map`] to translate:
///
/// ```rust,ignore
/// use mosaic_core::{Command, Component, Element, Listener, Node, Tag};
///
/// struct App { search: SearchBox }
///
/// enum AppMsg { Search(search::Message) }
///
/// impl Component for App {
///     type Message = AppMsg;
///
///     fn update(&mut self, msg: AppMsg) -> Command<AppMsg> {
///         match msg {
///             AppMsg::Search(m) => self.search.update(m).map(AppMsg::Search),
///         }
///     }
///
///     fn view(&self) -> Node {
///         Element::new(Tag::Div).child(self.search.view()).into()
///     }
///
///     fn listeners(&self) -> Vec<Listener<AppMsg>> {
///         self.search
///             .listeners()
///             .into_iter()
///             .map(|l| l.map(AppMsg::Search))
///             .collect()
///     }
/// }
/// ```
pub trait Component: Send + 'static {
    /// The component's internal message type.
    ///
    /// Parent models typically wrap this in one of their own message variants
    /// so that events can be routed to the correct child.
    type Message: Send + 'static;

    /// Process a message, mutate state, and return a [`Command`] for side effects.
    ///
    /// The returned command uses the component's own `Message` type; the
    /// parent should call [`.map()`](Command::map) to lift it into the parent
    /// message type.
    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;

    /// Render the current state as a markup tree.
    ///
    /// This must be a pure function of `&self`.  Generated element ids and
    /// boundary refs are stored on the component so repeated renders of the
    /// same state are identical.
    fn view(&self) -> Node;

    /// Declare the document listeners and timers this component needs given
    /// its current state.
    ///
    /// The parent is responsible for collecting child listeners and mapping
    /// their messages.  The default implementation returns an empty list.
    fn listeners(&self) -> Vec<Listener<Self::Message>> {
        vec![]
    }
}
