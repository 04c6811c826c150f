use crate::callback::Callback;
use crate::event::{DomEvent, EventKind, Key};
use crate::listener::{hash_of, Listener, ListenerId};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(1);

/// Fires a callback once per press of a dismissal key (default `Escape`).
///
/// The key is observed at the document level regardless of focus.  There is
/// no enabled flag: an owner that wants the detector inactive simply stops
/// declaring its listener.
#[derive(Debug, Clone)]
pub struct DismissKey<Msg> {
    key: Key,
    callback: Callback<Msg>,
    instance: u64,
}

impl<Msg: Send + 'static> DismissKey<Msg> {
    pub fn new(callback: Callback<Msg>) -> Self {
        Self {
            key: Key::Escape,
            callback,
            instance: NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed),
        }
    }

    pub fn with_key(mut self, key: Key) -> Self {
        self.key = key;
        self
    }

    pub fn key(&self) -> Key {
        self.key
    }

    pub fn set_callback(&mut self, callback: Callback<Msg>) {
        self.callback = callback;
    }

    pub fn listener(&self) -> Listener<Msg> {
        let key = self.key;
        let callback = self.callback.clone();
        Listener::document(
            ListenerId::new::<DismissKey<()>>(self.instance),
            EventKind::KeyDown,
            move |event, _| match event {
                DomEvent::KeyDown(press) if press.key == key => Some(callback.emit()),
                _ => None,
            },
        )
        .with_identity(hash_of(&(self.callback.identity(), key)))
    }
}
