use crate::command::Command;
use crate::component::Component;
use crate::listener::Listener;
use crate::markup::Node;

/// The top-level application trait, following the [Elm Architecture].
///
/// The runtime drives a continuous **init -> update -> view** cycle:
///
/// 1. [`init`](Model::init) creates the initial state and may return a
///    [`Command`] for early side effects.
/// 2. [`view`](Model::view) renders the current state to a [`Node`] tree,
///    which the runtime mounts into its [`Document`](crate::Document).
/// 3. Document events reach the model through the [`Listener`]s it declares.
/// 4. [`update`](Model::update) processes each message, mutates state, and
///    optionally returns a [`Command`] for further work.
/// 5. Steps 2--4 repeat until the program is unmounted.
///
/// # Example
///
/// ```rust,ignore
/// use mosaic_core::{Command, Element, Model, Node, Tag};
///
/// struct Counter { count: i32 }
///
/// enum Msg { Increment }
///
/// impl Model for Counter {
///     type Message = Msg;
///     type Flags = ();
///
///     fn init(_flags: ()) -> (Self, Command<Msg>) {
///         (Counter { count: 0 }, Command::none())
///     }
///
///     fn update(&mut self, msg: Msg) -> Command<Msg> {
///         match msg {
///             Msg::Increment => self.count += 1,
///         }
///         Command::none()
///     }
///
///     fn view(&self) -> Node {
///         Element::new(Tag::P).text(format!("Count: {}", self.count)).into()
///     }
/// }
/// ```
///
/// [Elm Architecture]: https://guide.elm-lang.org/architecture/
pub trait Model: Sized + Send + 'static {
    /// The application's message type.
    type Message: Send + 'static;

    /// Initialization data passed to [`Model::init`].
    ///
    /// Use `()` when no startup data is needed.
    type Flags: Send + 'static;

    /// Create the initial model state and an optional startup command.
    fn init(flags: Self::Flags) -> (Self, Command<Self::Message>);

    /// Process a message, mutate state, and return a command for side effects.
    ///
    /// After `update` returns, the runtime calls [`view`](Model::view) to
    /// re-render and [`listeners`](Model::listeners) to reconcile active
    /// registrations.
    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;

    /// Render the current state.  Must be a pure function of `&self`.
    fn view(&self) -> Node;

    /// Declare active listeners.  Called after every update.
    ///
    /// The runtime diffs the returned list against the previously active
    /// set: new listeners are registered, removed ones are deregistered.
    fn listeners(&self) -> Vec<Listener<Self::Message>> {
        vec![]
    }
}

/// Hosts a single [`Component`] as a top-level [`Model`].
///
/// The component itself is passed as the flags:
///
/// ```rust,ignore
/// let program = TestProgram::<Mount<Modal>>::new(Modal::new("Title"));
/// ```
pub struct Mount<C: Component> {
    pub component: C,
}

impl<C: Component> Model for Mount<C> {
    type Message = C::Message;
    type Flags = C;

    fn init(component: C) -> (Self, Command<C::Message>) {
        (Mount { component }, Command::none())
    }

    fn update(&mut self, msg: C::Message) -> Command<C::Message> {
        self.component.update(msg)
    }

    fn view(&self) -> Node {
        self.component.view()
    }

    fn listeners(&self) -> Vec<Listener<C::Message>> {
        self.component.listeners()
    }
}
