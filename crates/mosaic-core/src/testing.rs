use crate::command::{Command, CommandInner};
use crate::document::{Document, NodeId, RoleQuery};
use crate::event::{DomEvent, EventKind, Key, KeyPress};
use crate::listener::ListenerManager;
use crate::model::Model;

/// A headless test harness that drives a [`Model`] against a [`Document`].
///
/// `TestProgram` exercises the whole init/update/view/listeners cycle in a
/// plain `#[test]` function -- no tokio runtime required.  Synchronous
/// commands (e.g. [`Command::message`]) are collected and flushed with
/// [`drain_messages`](TestProgram::drain_messages); async commands are
/// ignored, and timer listeners are recorded but never started (use
/// [`Program`](crate::runtime::Program) with a paused clock for those).
///
/// Events go through the same listener registry the runtime uses, so
/// gestures behave the way they would in a host document.
///
/// # Example
///
/// ```rust,ignore
/// use mosaic_core::testing::TestProgram;
///
/// let mut prog = TestProgram::<Mount<Accordion>>::new(accordion);
/// let header = prog.by_role("button", "Shipping");
/// prog.click(header);
/// assert_eq!(prog.document().attribute(header, "aria-expanded"), Some("true"));
/// ```
pub struct TestProgram<M: Model> {
    model: M,
    document: Document,
    listeners: ListenerManager<M::Message>,
    pending_messages: Vec<M::Message>,
}

impl<M: Model> TestProgram<M> {
    /// Create a test program by calling [`Model::init`] with the given flags,
    /// then render and register listeners.
    ///
    /// Any synchronous commands produced by `init` are collected into the
    /// pending-message queue.
    pub fn new(flags: M::Flags) -> Self {
        let (model, init_cmd) = M::init(flags);
        let mut program = Self {
            model,
            document: Document::new(),
            listeners: ListenerManager::headless(),
            pending_messages: Vec::new(),
        };
        program.collect_sync_messages(init_cmd);
        program.render();
        program
    }

    /// Send a message, triggering a single update cycle.
    ///
    /// Synchronous commands returned by `update` are enqueued; call
    /// [`drain_messages`](TestProgram::drain_messages) to flush them.
    pub fn send(&mut self, msg: M::Message) {
        let cmd = self.model.update(msg);
        self.collect_sync_messages(cmd);
        self.render();
    }

    /// Process all pending synchronous messages until none are left.
    pub fn drain_messages(&mut self) {
        while !self.pending_messages.is_empty() {
            let messages: Vec<_> = self.pending_messages.drain(..).collect();
            for msg in messages {
                self.send(msg);
            }
        }
    }

    /// Get a shared reference to the model for assertions.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Get a mutable reference to the model for direct test setup.
    ///
    /// This bypasses the message-driven cycle; the document is re-rendered
    /// on the next send or event.
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The mounted markup.
    pub fn html(&self) -> String {
        self.document.to_html()
    }

    /// Deliver an event to the registered listeners, then run every message
    /// produced (and anything those produce).
    pub fn dispatch(&mut self, event: DomEvent) {
        let messages = self.listeners.dispatch(&event, &self.document);
        for msg in messages {
            self.send(msg);
        }
        self.drain_messages();
    }

    /// A full click gesture on `node`: pointer-down, pointer-up, click.
    ///
    /// Each step may re-render the document, so the target is found again
    /// between steps: by its `id` attribute when it has one, otherwise by
    /// position.  Steps whose target has disappeared are skipped.
    pub fn click(&mut self, node: NodeId) {
        let Some(anchor) = self.anchor(node) else {
            return;
        };
        self.dispatch(DomEvent::PointerDown(node));
        if let Some(node) = self.locate(&anchor) {
            self.dispatch(DomEvent::PointerUp(node));
        }
        if let Some(node) = self.locate(&anchor) {
            self.dispatch(DomEvent::Click(node));
        }
    }

    pub fn pointer_down(&mut self, node: NodeId) {
        self.dispatch(DomEvent::PointerDown(node));
    }

    pub fn pointer_move(&mut self, node: NodeId) {
        self.dispatch(DomEvent::PointerMove(node));
    }

    pub fn pointer_up(&mut self, node: NodeId) {
        self.dispatch(DomEvent::PointerUp(node));
    }

    pub fn focus(&mut self, node: NodeId) {
        self.dispatch(DomEvent::Focus(node));
    }

    /// Press a key with no element focused.
    pub fn press_key(&mut self, key: Key) {
        self.dispatch(DomEvent::KeyDown(KeyPress::new(key)));
    }

    /// Press a key while `node` has focus.
    pub fn press_key_on(&mut self, node: NodeId, key: Key) {
        self.dispatch(DomEvent::KeyDown(KeyPress::on(key, node)));
    }

    /// Change the value of a form control.
    pub fn input(&mut self, node: NodeId, value: impl Into<String>) {
        self.dispatch(DomEvent::Input {
            target: node,
            value: value.into(),
        });
    }

    /// The single visible element with `role` and accessible `name`.
    ///
    /// # Panics
    ///
    /// Panics if there is no such element or more than one.
    pub fn by_role(&self, role: &str, name: &str) -> NodeId {
        match self.document.get_by_role(role, name) {
            Ok(node) => node,
            Err(err) => panic!("{err}\n{}", self.html()),
        }
    }

    /// All visible elements with `role`.
    pub fn all_by_role(&self, role: &str) -> Vec<NodeId> {
        self.document.query_all(&RoleQuery::new(role))
    }

    /// Number of document listeners registered for `kind`.
    pub fn registered(&self, kind: EventKind) -> usize {
        self.listeners.registered(kind)
    }

    /// Number of timer and other task listeners registered.
    pub fn registered_tasks(&self) -> usize {
        self.listeners.tasks()
    }

    /// Deregister all listeners and clear the document.
    pub fn unmount(&mut self) {
        self.listeners.shutdown();
        self.document.unmount();
        self.pending_messages.clear();
    }

    fn anchor(&self, node: NodeId) -> Option<Anchor> {
        match self.document.attribute(node, "id") {
            Some(id) => Some(Anchor::Id(id.to_string())),
            None => self.document.path(node).map(Anchor::Path),
        }
    }

    fn locate(&self, anchor: &Anchor) -> Option<NodeId> {
        match anchor {
            Anchor::Id(id) => self.document.element_by_id(id),
            Anchor::Path(path) => self.document.node_at(path),
        }
    }

    fn render(&mut self) {
        let tree = self.model.view();
        self.document.mount(&tree);
        let listeners = self.model.listeners();
        self.listeners.reconcile(listeners);
    }

    fn collect_sync_messages(&mut self, cmd: Command<M::Message>) {
        match cmd.inner {
            CommandInner::None => {}
            CommandInner::Message(msg) => {
                self.pending_messages.push(msg);
            }
            CommandInner::Batch(cmds) | CommandInner::Sequence(cmds) => {
                for cmd in cmds {
                    self.collect_sync_messages(cmd);
                }
            }
            CommandInner::Future(_) => {}
        }
    }
}

/// How a gesture target is found again after a re-render.
enum Anchor {
    Id(String),
    Path(Vec<usize>),
}
