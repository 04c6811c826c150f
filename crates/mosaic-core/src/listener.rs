use crate::document::Document;
use crate::event::{DomEvent, EventKind};
use futures::future::BoxFuture;
use std::any::TypeId;
use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;

/// A document event handler.  Returns `Some(msg)` when the event concerns
/// the listener's owner.
pub type Handler<Msg> = Arc<dyn Fn(&DomEvent, &Document) -> Option<Msg> + Send + Sync>;

/// A registration request declared by a component.
///
/// Listeners are declared in
/// [`Component::listeners`](crate::Component::listeners) and reconciled by
/// the runtime after every update: new ones are registered, ones no longer
/// declared are deregistered, unchanged ones are left alone, and ones whose
/// [identity](Listener::with_identity) changed are deregistered and
/// registered again so the latest handler is used.
pub struct Listener<Msg: Send + 'static> {
    pub(crate) id: ListenerId,
    pub(crate) identity: u64,
    pub(crate) kind: ListenerKind<Msg>,
}

pub(crate) enum ListenerKind<Msg: Send + 'static> {
    Document {
        event: EventKind,
        handler: Handler<Msg>,
    },
    Task(BoxFuture<'static, Msg>),
}

/// Identity for diffing listeners between update cycles.
///
/// Each listener carries a `ListenerId` composed of a Rust [`TypeId`] and a
/// numeric discriminant.  The runtime uses it to determine which listeners
/// are new, unchanged, or removed when reconciling.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId {
    type_id: TypeId,
    discriminant: u64,
}

impl ListenerId {
    /// Create an ID from a type and a numeric discriminant.
    pub fn new<T: 'static>(discriminant: u64) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            discriminant,
        }
    }

    /// Create an ID from a type alone (for singletons).
    pub fn of<T: 'static>() -> Self {
        Self::new::<T>(0)
    }

    /// Create an ID from a type and a string discriminant.
    pub fn with_str<T: 'static>(s: &str) -> Self {
        Self::new::<T>(hash_of(s))
    }
}

impl<Msg: Send + 'static> Listener<Msg> {
    /// A synchronous document-level listener for one event kind.
    pub fn document(
        id: ListenerId,
        event: EventKind,
        handler: impl Fn(&DomEvent, &Document) -> Option<Msg> + Send + Sync + 'static,
    ) -> Self {
        Listener {
            id,
            identity: 0,
            kind: ListenerKind::Document {
                event,
                handler: Arc::new(handler),
            },
        }
    }

    /// A one-shot async task.  It is spawned when first registered, its
    /// output is delivered as a message, and it is aborted if the listener
    /// is removed first.
    pub fn task<F>(id: ListenerId, future: F) -> Self
    where
        F: Future<Output = Msg> + Send + 'static,
    {
        Listener {
            id,
            identity: 0,
            kind: ListenerKind::Task(Box::pin(future)),
        }
    }

    /// Tag the listener with an identity key.  A change of identity under
    /// the same [`ListenerId`] forces re-registration.
    pub fn with_identity(mut self, identity: u64) -> Self {
        self.identity = identity;
        self
    }

    pub fn id(&self) -> &ListenerId {
        &self.id
    }

    pub fn identity(&self) -> u64 {
        self.identity
    }

    /// The event kind for document listeners; `None` for tasks.
    pub fn event(&self) -> Option<EventKind> {
        match &self.kind {
            ListenerKind::Document { event, .. } => Some(*event),
            ListenerKind::Task(_) => None,
        }
    }

    /// Transform the message type (for component composition).
    pub fn map<NewMsg: Send + 'static>(
        self,
        f: impl Fn(Msg) -> NewMsg + Send + Sync + 'static,
    ) -> Listener<NewMsg> {
        let kind = match self.kind {
            ListenerKind::Document { event, handler } => ListenerKind::Document {
                event,
                handler: Arc::new(move |e: &DomEvent, d: &Document| handler(e, d).map(&f)),
            },
            ListenerKind::Task(fut) => ListenerKind::Task(Box::pin(async move { f(fut.await) })),
        };
        Listener {
            id: self.id,
            identity: self.identity,
            kind,
        }
    }
}

/// Hash any value into a listener discriminant or identity key.
pub fn hash_of<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = std::hash::DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

enum Slot<Msg: Send + 'static> {
    Document {
        event: EventKind,
        handler: Handler<Msg>,
    },
    Task(Option<AbortHandle>),
}

struct Registration<Msg: Send + 'static> {
    id: ListenerId,
    identity: u64,
    slot: Slot<Msg>,
}

impl<Msg: Send + 'static> Registration<Msg> {
    fn stop(&self) {
        if let Slot::Task(Some(handle)) = &self.slot {
            handle.abort();
        }
    }
}

/// Owns active listener registrations, performing diffing between cycles.
///
/// Document listeners are kept in registration order and dispatched in that
/// order.  Task listeners are spawned on tokio when a message sender is
/// available; a headless manager records them without spawning.
pub struct ListenerManager<Msg: Send + 'static> {
    active: Vec<Registration<Msg>>,
    msg_tx: Option<mpsc::UnboundedSender<Msg>>,
}

impl<Msg: Send + 'static> ListenerManager<Msg> {
    /// A manager that spawns task listeners and delivers their output on `msg_tx`.
    pub fn new(msg_tx: mpsc::UnboundedSender<Msg>) -> Self {
        Self {
            active: Vec::new(),
            msg_tx: Some(msg_tx),
        }
    }

    /// A manager that never spawns tasks (no runtime required).
    pub fn headless() -> Self {
        Self {
            active: Vec::new(),
            msg_tx: None,
        }
    }

    /// Diff `listeners` against the active registrations.
    ///
    /// Start new ones, stop removed ones, keep unchanged ones, and replace
    /// ones whose identity changed.
    pub fn reconcile(&mut self, listeners: Vec<Listener<Msg>>) {
        let mut seen = HashSet::new();
        let listeners: Vec<Listener<Msg>> = listeners
            .into_iter()
            .filter(|l| {
                let fresh = seen.insert(l.id.clone());
                if !fresh {
                    tracing::warn!(listener = ?l.id, "duplicate listener id declared; ignoring");
                }
                fresh
            })
            .collect();

        let wanted: HashMap<ListenerId, u64> = listeners
            .iter()
            .map(|l| (l.id.clone(), l.identity))
            .collect();

        let mut kept = HashSet::new();
        self.active.retain(|reg| {
            let keep = wanted.get(&reg.id) == Some(&reg.identity);
            if keep {
                kept.insert(reg.id.clone());
            } else {
                tracing::debug!(listener = ?reg.id, "deregistering listener");
                reg.stop();
            }
            keep
        });

        for listener in listeners {
            if !kept.contains(&listener.id) {
                self.start(listener);
            }
        }
    }

    /// Run every document listener registered for `event`'s kind, in
    /// registration order, collecting the messages they produce.
    pub fn dispatch(&self, event: &DomEvent, document: &Document) -> Vec<Msg> {
        let kind = event.kind();
        self.active
            .iter()
            .filter_map(|reg| match &reg.slot {
                Slot::Document { event: k, handler } if *k == kind => handler(event, document),
                _ => None,
            })
            .collect()
    }

    /// Deregister everything and abort running tasks.
    pub fn shutdown(&mut self) {
        for reg in self.active.drain(..) {
            reg.stop();
        }
    }

    /// Number of document listeners registered for `kind`.
    pub fn registered(&self, kind: EventKind) -> usize {
        self.active
            .iter()
            .filter(|reg| matches!(reg.slot, Slot::Document { event, .. } if event == kind))
            .count()
    }

    /// Number of task listeners registered.
    pub fn tasks(&self) -> usize {
        self.active
            .iter()
            .filter(|reg| matches!(reg.slot, Slot::Task(_)))
            .count()
    }

    pub fn contains(&self, id: &ListenerId) -> bool {
        self.active.iter().any(|reg| &reg.id == id)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    fn start(&mut self, listener: Listener<Msg>) {
        tracing::debug!(listener = ?listener.id, "registering listener");
        let slot = match listener.kind {
            ListenerKind::Document { event, handler } => Slot::Document { event, handler },
            ListenerKind::Task(fut) => match &self.msg_tx {
                Some(tx) => {
                    let tx = tx.clone();
                    let handle = tokio::spawn(async move {
                        let msg = fut.await;
                        let _ = tx.send(msg);
                    });
                    Slot::Task(Some(handle.abort_handle()))
                }
                None => Slot::Task(None),
            },
        };
        self.active.push(Registration {
            id: listener.id,
            identity: listener.identity,
            slot,
        });
    }
}

impl<Msg: Send + 'static> Drop for ListenerManager<Msg> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
