use crate::command::{Command, CommandInner};
use crate::document::Document;
use crate::event::DomEvent;
use crate::listener::ListenerManager;
use crate::model::Model;
use crate::props;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;

/// Errors that can occur while creating or driving a [`Program`].
#[derive(Debug, thiserror::Error)]
pub enum ProgramError {
    /// `Program` spawns commands and timers on tokio and must be created
    /// inside a runtime.
    #[error("no tokio runtime available: {0}")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),
    /// The program was unmounted (or killed) and no longer accepts input.
    #[error("program has been unmounted")]
    Unmounted,
    /// Synchronous messages kept producing more messages.
    #[error("messages did not settle after {0} updates")]
    Unsettled(usize),
}

/// Configuration options for a [`Program`].
///
/// Use struct update syntax to override only the options you need:
///
/// ```rust,ignore
/// let opts = ProgramOptions {
///     trace_events: true,
///     ..ProgramOptions::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct ProgramOptions {
    /// Log every dispatched event at `trace` level (default: false).
    pub trace_events: bool,
    /// Emit property-validation warnings while this program renders
    /// (default: true).  Other programs are unaffected.
    pub validate_props: bool,
    /// Upper bound on updates processed by a single drain (default: 1024).
    /// Messages left over when the bound trips stay queued for the next
    /// drain.
    pub max_drain_rounds: usize,
}

impl Default for ProgramOptions {
    fn default() -> Self {
        Self {
            trace_events: false,
            validate_props: true,
            max_drain_rounds: 1024,
        }
    }
}

/// A cloneable handle to a [`Program`] for external control.
///
/// * [`send`](ProgramHandle::send) -- enqueue a message; it is processed on
///   the next [`Program::process_pending`] or [`Program::next`].
/// * [`kill`](ProgramHandle::kill) -- ask the program to unmount at the next
///   opportunity.
#[derive(Clone)]
pub struct ProgramHandle<Msg: Send + 'static> {
    msg_tx: mpsc::UnboundedSender<Msg>,
    killed: Arc<AtomicBool>,
}

impl<Msg: Send + 'static> ProgramHandle<Msg> {
    /// Returns silently if the program has already been dropped.
    pub fn send(&self, msg: Msg) {
        let _ = self.msg_tx.send(msg);
    }

    pub fn kill(&self) {
        self.killed.store(true, Ordering::SeqCst);
    }
}

/// Hosts a [`Model`] against a headless [`Document`] on a tokio runtime.
///
/// The host application feeds DOM events in with
/// [`dispatch`](Program::dispatch).  Each event is offered to the registered
/// listeners in registration order; every message they produce runs through
/// `update`, the model is re-rendered and re-mounted, and listeners are
/// reconciled against the new state.
///
/// Futures from commands and timer listeners are spawned on tokio.  Their
/// messages arrive asynchronously; await [`next`](Program::next) to process
/// them.  [`unmount`](Program::unmount) (or dropping the program) aborts all
/// of them and deregisters every listener, so no callback runs after
/// teardown.
///
/// # Example
///
/// ```rust,ignore
/// let mut program = Program::<Mount<Notification>>::new(toast)?;
/// program.next().await?; // auto-dismiss timer fired
/// ```
pub struct Program<M: Model> {
    model: M,
    document: Document,
    listeners: ListenerManager<M::Message>,
    msg_tx: mpsc::UnboundedSender<M::Message>,
    msg_rx: mpsc::UnboundedReceiver<M::Message>,
    backlog: VecDeque<M::Message>,
    tasks: Vec<AbortHandle>,
    options: ProgramOptions,
    mounted: bool,
    killed: Arc<AtomicBool>,
}

impl<M: Model> Program<M> {
    /// Create and mount a program with default options.
    pub fn new(flags: M::Flags) -> Result<Self, ProgramError> {
        Self::with_options(flags, ProgramOptions::default())
    }

    /// Create and mount a program with custom options.
    ///
    /// Returns [`ProgramError::NoRuntime`] outside a tokio runtime.
    pub fn with_options(flags: M::Flags, options: ProgramOptions) -> Result<Self, ProgramError> {
        tokio::runtime::Handle::try_current()?;

        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        let (model, init_cmd) = M::init(flags);
        let listeners = ListenerManager::new(msg_tx.clone());

        let mut program = Self {
            model,
            document: Document::new(),
            listeners,
            msg_tx,
            msg_rx,
            backlog: VecDeque::new(),
            tasks: Vec::new(),
            options,
            mounted: true,
            killed: Arc::new(AtomicBool::new(false)),
        };

        tracing::debug!("program mounted");
        program.execute_command(init_cmd);
        program.render();
        program.process_pending()?;
        Ok(program)
    }

    /// Get a handle for external control.
    pub fn handle(&self) -> ProgramHandle<M::Message> {
        ProgramHandle {
            msg_tx: self.msg_tx.clone(),
            killed: self.killed.clone(),
        }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Number of document listeners and tasks currently registered.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Deliver a DOM event to the registered listeners and process every
    /// message that results.
    pub fn dispatch(&mut self, event: DomEvent) -> Result<(), ProgramError> {
        self.check_alive()?;
        if self.options.trace_events {
            tracing::trace!(?event, "dispatching event");
        }
        for msg in self.listeners.dispatch(&event, &self.document) {
            let _ = self.msg_tx.send(msg);
        }
        self.process_pending().map(|_| ())
    }

    /// Send a message and process it, along with anything it produces.
    pub fn send(&mut self, msg: M::Message) -> Result<(), ProgramError> {
        self.check_alive()?;
        let _ = self.msg_tx.send(msg);
        self.process_pending().map(|_| ())
    }

    /// Process every message already queued, without waiting.  Returns the
    /// number of updates run.
    pub fn process_pending(&mut self) -> Result<usize, ProgramError> {
        self.check_alive()?;
        let mut processed = 0;
        while let Some(msg) = self.next_queued() {
            if processed == self.options.max_drain_rounds {
                self.backlog.push_front(msg);
                return Err(ProgramError::Unsettled(processed));
            }
            self.process_message(msg);
            processed += 1;
            self.check_alive()?;
        }
        Ok(processed)
    }

    /// Wait for the next message (typically from a spawned future or timer),
    /// then process it and anything queued behind it.
    pub async fn next(&mut self) -> Result<(), ProgramError> {
        self.check_alive()?;
        let msg = match self.backlog.pop_front() {
            Some(msg) => Some(msg),
            None => self.msg_rx.recv().await,
        };
        if let Some(msg) = msg {
            self.process_message(msg);
        }
        self.process_pending().map(|_| ())
    }

    /// Tear the program down: deregister all listeners, abort pending
    /// futures and timers, and clear the document.  Idempotent.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.listeners.shutdown();
        for task in self.tasks.drain(..) {
            task.abort();
        }
        self.document.unmount();
        self.backlog.clear();
        while self.msg_rx.try_recv().is_ok() {}
        tracing::debug!("program unmounted");
    }

    fn check_alive(&mut self) -> Result<(), ProgramError> {
        if self.killed.load(Ordering::SeqCst) {
            self.unmount();
        }
        if self.mounted {
            Ok(())
        } else {
            Err(ProgramError::Unmounted)
        }
    }

    fn next_queued(&mut self) -> Option<M::Message> {
        self.backlog
            .pop_front()
            .or_else(|| self.msg_rx.try_recv().ok())
    }

    fn process_message(&mut self, msg: M::Message) {
        let cmd = self.model.update(msg);
        self.execute_command(cmd);
        self.render();
    }

    fn render(&mut self) {
        let model = &self.model;
        let (tree, listeners) =
            props::scoped(self.options.validate_props, || (model.view(), model.listeners()));
        if self.document.mount(&tree) {
            tracing::trace!("document re-rendered");
        }
        self.listeners.reconcile(listeners);
    }

    fn execute_command(&mut self, cmd: Command<M::Message>) {
        match cmd.inner {
            CommandInner::None => {}
            CommandInner::Message(msg) => {
                let _ = self.msg_tx.send(msg);
            }
            CommandInner::Future(fut) => {
                let tx = self.msg_tx.clone();
                let handle = tokio::spawn(async move {
                    let msg = fut.await;
                    let _ = tx.send(msg);
                });
                self.track(handle.abort_handle());
            }
            CommandInner::Batch(cmds) => {
                for cmd in cmds {
                    self.execute_command(cmd);
                }
            }
            CommandInner::Sequence(cmds) => {
                let tx = self.msg_tx.clone();
                let handle = tokio::spawn(async move {
                    for cmd in cmds {
                        execute_command_sequential(cmd, &tx).await;
                    }
                });
                self.track(handle.abort_handle());
            }
        }
    }

    fn track(&mut self, handle: AbortHandle) {
        self.tasks.retain(|task| !task.is_finished());
        self.tasks.push(handle);
    }
}

impl<M: Model> Drop for Program<M> {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// Execute a command sequentially (for `Command::sequence`).
fn execute_command_sequential<Msg: Send + 'static>(
    cmd: Command<Msg>,
    tx: &mpsc::UnboundedSender<Msg>,
) -> futures::future::BoxFuture<'_, ()> {
    Box::pin(async move {
        match cmd.inner {
            CommandInner::None => {}
            CommandInner::Message(msg) => {
                let _ = tx.send(msg);
            }
            CommandInner::Future(fut) => {
                let msg = fut.await;
                let _ = tx.send(msg);
            }
            CommandInner::Batch(cmds) => {
                // A batch inside a sequence still runs concurrently.
                futures::future::join_all(
                    cmds.into_iter()
                        .map(|cmd| execute_command_sequential(cmd, tx)),
                )
                .await;
            }
            CommandInner::Sequence(cmds) => {
                for cmd in cmds {
                    execute_command_sequential(cmd, tx).await;
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::callback::Callback;
    use crate::event::{EventKind, Key, KeyPress};
    use crate::ids::ElementId;
    use crate::listener::Listener;
    use crate::listeners::{activate, After, DismissKey};
    use crate::markup::{Element, Node, Tag};
    use std::time::Duration;

    struct Counter {
        count: i32,
        seen: Vec<u32>,
        button: ElementId,
        dismiss: DismissKey<Msg>,
        on_timer: Callback<Msg>,
        timer: Option<Duration>,
    }

    #[derive(Debug, Clone)]
    enum Msg {
        Increment,
        Reset,
        Ping(u32),
        Record(u32),
    }

    impl Model for Counter {
        type Message = Msg;
        type Flags = Option<Duration>;

        fn init(timer: Option<Duration>) -> (Self, Command<Msg>) {
            (
                Counter {
                    count: 0,
                    seen: Vec::new(),
                    button: ElementId::generate(),
                    dismiss: DismissKey::new(Callback::message(Msg::Reset)),
                    on_timer: Callback::message(Msg::Increment),
                    timer,
                },
                Command::none(),
            )
        }

        fn update(&mut self, msg: Msg) -> Command<Msg> {
            match msg {
                Msg::Increment => self.count += 1,
                Msg::Reset => self.count = 0,
                Msg::Ping(n) if n > 0 => return Command::message(Msg::Ping(n - 1)),
                Msg::Ping(_) => {}
                Msg::Record(n) => self.seen.push(n),
            }
            Command::none()
        }

        fn view(&self) -> Node {
            Element::new(Tag::Button)
                .id(&self.button)
                .text(format!("Count: {}", self.count))
                .into()
        }

        fn listeners(&self) -> Vec<Listener<Msg>> {
            let mut listeners = vec![
                activate(&self.button, vec![self.button.clone()], |_| Msg::Increment),
                self.dismiss.listener(),
            ];
            if let Some(duration) = self.timer {
                listeners.push(
                    After::new(duration, "bump").listener(self.on_timer.clone()),
                );
            }
            listeners
        }
    }

    fn button(program: &Program<Counter>) -> crate::document::NodeId {
        program.document().find_by_text("Count: 0").unwrap()
    }

    #[test]
    fn requires_runtime() {
        assert!(matches!(
            Program::<Counter>::new(None),
            Err(ProgramError::NoRuntime(_))
        ));
    }

    #[tokio::test]
    async fn dispatch_runs_update_and_rerenders() {
        let mut program = Program::<Counter>::new(None).unwrap();
        let target = button(&program);
        program.dispatch(DomEvent::Click(target)).unwrap();
        assert_eq!(program.model().count, 1);
        assert!(program.document().to_html().contains("Count: 1"));

        program
            .dispatch(DomEvent::KeyDown(KeyPress::new(Key::Escape)))
            .unwrap();
        assert_eq!(program.model().count, 0);
    }

    #[tokio::test]
    async fn unmount_rejects_further_events() {
        let mut program = Program::<Counter>::new(None).unwrap();
        let target = button(&program);
        program.unmount();
        program.unmount();
        assert!(matches!(
            program.dispatch(DomEvent::Click(target)),
            Err(ProgramError::Unmounted)
        ));
        assert_eq!(program.listener_count(), 0);
        assert!(!program.document().is_mounted());
    }

    #[tokio::test]
    async fn kill_unmounts() {
        let mut program = Program::<Counter>::new(None).unwrap();
        program.handle().kill();
        assert!(matches!(
            program.send(Msg::Increment),
            Err(ProgramError::Unmounted)
        ));
        assert!(!program.is_mounted());
    }

    #[tokio::test]
    async fn runaway_messages_are_bounded() {
        let options = ProgramOptions {
            max_drain_rounds: 10,
            ..ProgramOptions::default()
        };
        let mut program = Program::<Counter>::with_options(None, options).unwrap();
        assert!(program.send(Msg::Ping(5)).is_ok());
        assert!(matches!(
            program.send(Msg::Ping(50)),
            Err(ProgramError::Unsettled(10))
        ));
    }

    #[tokio::test]
    async fn unsettled_drain_keeps_the_remaining_messages() {
        let options = ProgramOptions {
            max_drain_rounds: 2,
            ..ProgramOptions::default()
        };
        let mut program = Program::<Counter>::with_options(None, options).unwrap();
        let handle = program.handle();
        for n in 0..5 {
            handle.send(Msg::Record(n));
        }
        assert!(matches!(program.process_pending(), Err(ProgramError::Unsettled(2))));
        assert_eq!(program.model().seen, vec![0, 1]);
        assert!(matches!(program.process_pending(), Err(ProgramError::Unsettled(2))));
        assert_eq!(program.process_pending().unwrap(), 1);
        assert_eq!(program.model().seen, vec![0, 1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn next_takes_leftovers_before_waiting() {
        let options = ProgramOptions {
            max_drain_rounds: 1,
            ..ProgramOptions::default()
        };
        let mut program = Program::<Counter>::with_options(None, options).unwrap();
        let handle = program.handle();
        handle.send(Msg::Record(1));
        handle.send(Msg::Record(2));
        assert!(program.process_pending().is_err());
        program.next().await.unwrap();
        assert_eq!(program.model().seen, vec![1, 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn timer_listener_delivers_through_next() {
        let mut program = Program::<Counter>::new(Some(Duration::from_secs(5))).unwrap();
        assert_eq!(program.listener_count(), 3);
        program.next().await.unwrap();
        assert_eq!(program.model().count, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn unmount_cancels_pending_timer() {
        let mut program = Program::<Counter>::new(Some(Duration::from_secs(5))).unwrap();
        let handle = program.handle();
        program.unmount();
        tokio::time::sleep(Duration::from_secs(10)).await;
        handle.send(Msg::Increment);
        assert_eq!(program.model().count, 0);
        assert_eq!(program.listeners.registered(EventKind::KeyDown), 0);
    }

    #[tokio::test]
    async fn handle_messages_are_processed_on_drain() {
        let mut program = Program::<Counter>::new(None).unwrap();
        program.handle().send(Msg::Increment);
        assert_eq!(program.process_pending().unwrap(), 1);
        assert_eq!(program.model().count, 1);
    }

    /// Records every number it receives; `init` runs the command it is
    /// given.
    struct Recorder {
        seen: Vec<u32>,
    }

    impl Model for Recorder {
        type Message = u32;
        type Flags = Command<u32>;

        fn init(cmd: Command<u32>) -> (Self, Command<u32>) {
            (Recorder { seen: Vec::new() }, cmd)
        }

        fn update(&mut self, n: u32) -> Command<u32> {
            self.seen.push(n);
            Command::none()
        }

        fn view(&self) -> Node {
            Element::new(Tag::P)
                .text(format!("validating: {}", props::validation_enabled()))
                .into()
        }

        fn listeners(&self) -> Vec<Listener<u32>> {
            vec![]
        }
    }

    async fn settle(program: &mut Program<Recorder>, count: usize) {
        while program.model().seen.len() < count {
            program.next().await.unwrap();
        }
    }

    #[tokio::test]
    async fn perform_delivers_mapped_output() {
        let mut program =
            Program::<Recorder>::new(Command::perform(async { 7 }, |n: u32| n * 2)).unwrap();
        assert!(program.model().seen.is_empty());
        program.next().await.unwrap();
        assert_eq!(program.model().seen, vec![14]);
    }

    #[tokio::test(start_paused = true)]
    async fn tick_fires_after_its_duration() {
        let start = tokio::time::Instant::now();
        let mut program =
            Program::<Recorder>::new(Command::tick(Duration::from_secs(3), |_| 1)).unwrap();
        assert_eq!(program.process_pending().unwrap(), 0);
        program.next().await.unwrap();
        assert_eq!(program.model().seen, vec![1]);
        assert!(start.elapsed() >= Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn batch_runs_every_command() {
        let cmd = Command::batch([
            Command::message(1),
            Command::tick(Duration::from_secs(1), |_| 3),
            Command::perform(async { 2 }, |n: u32| n),
        ]);
        let mut program = Program::<Recorder>::new(cmd).unwrap();
        assert_eq!(program.model().seen, vec![1]);
        settle(&mut program, 3).await;
        assert_eq!(program.model().seen, vec![1, 2, 3]);
    }

    #[tokio::test(start_paused = true)]
    async fn sequence_waits_for_each_command() {
        let cmd = Command::sequence([
            Command::tick(Duration::from_secs(2), |_| 1),
            Command::message(2),
            Command::tick(Duration::from_secs(1), |_| 3),
        ]);
        let mut program = Program::<Recorder>::new(cmd).unwrap();
        settle(&mut program, 3).await;
        assert_eq!(program.model().seen, vec![1, 2, 3]);
    }

    #[tokio::test(start_paused = true)]
    async fn unmount_aborts_a_running_sequence() {
        let reached = Arc::new(AtomicBool::new(false));
        let flag = reached.clone();
        let cmd = Command::sequence([
            Command::tick(Duration::from_secs(1), |_| 1),
            Command::perform(
                async move {
                    flag.store(true, Ordering::SeqCst);
                },
                |_| 2,
            ),
        ]);
        let mut program = Program::<Recorder>::new(cmd).unwrap();
        program.unmount();
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(!reached.load(Ordering::SeqCst));
        assert!(program.model().seen.is_empty());
    }

    #[tokio::test]
    async fn validation_setting_stays_with_its_program() {
        let quiet = Program::<Recorder>::with_options(
            Command::none(),
            ProgramOptions {
                validate_props: false,
                ..ProgramOptions::default()
            },
        )
        .unwrap();
        let mut loud = Program::<Recorder>::new(Command::none()).unwrap();
        loud.send(1).unwrap();
        assert!(quiet.document().to_html().contains("validating: false"));
        assert!(loud.document().to_html().contains("validating: true"));
        assert!(props::validation_enabled());
    }
}
