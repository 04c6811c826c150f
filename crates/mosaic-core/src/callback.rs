use std::fmt;
use std::sync::Arc;

/// A shared zero-argument callback that produces a message.
///
/// Callbacks compare by identity: two clones of the same `Callback` are the
/// [`same`](Callback::same), two separately constructed callbacks are not,
/// even if their bodies are identical.  Listener registrations use this
/// identity to decide whether a re-render changed the callback and the
/// listener must be re-registered.
///
/// Components build their callbacks once, at construction, and keep them in
/// a field so that every render hands the same identity to the runtime.
pub struct Callback<Msg> {
    f: Arc<dyn Fn() -> Msg + Send + Sync>,
}

impl<Msg> Callback<Msg> {
    pub fn new(f: impl Fn() -> Msg + Send + Sync + 'static) -> Self {
        Self { f: Arc::new(f) }
    }

    /// Invoke the callback.
    pub fn emit(&self) -> Msg {
        (self.f)()
    }

    /// Whether `self` and `other` are clones of the same callback.
    pub fn same(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.f, &other.f)
    }

    /// A stable key for this callback's identity.
    pub fn identity(&self) -> u64 {
        Arc::as_ptr(&self.f) as *const () as usize as u64
    }
}

impl<Msg: Clone + Send + Sync + 'static> Callback<Msg> {
    /// A callback that always produces a clone of `msg`.
    pub fn message(msg: Msg) -> Self {
        Self::new(move || msg.clone())
    }
}

impl<Msg> Clone for Callback<Msg> {
    fn clone(&self) -> Self {
        Self { f: self.f.clone() }
    }
}

impl<Msg> fmt::Debug for Callback<Msg> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("identity", &self.identity())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emit_produces_message() {
        let cb = Callback::new(|| 7);
        assert_eq!(cb.emit(), 7);
    }

    #[test]
    fn clones_share_identity() {
        let cb = Callback::message("x");
        let clone = cb.clone();
        assert!(cb.same(&clone));
        assert_eq!(cb.identity(), clone.identity());
    }

    #[test]
    fn separate_callbacks_differ() {
        let a = Callback::message(1);
        let b = Callback::message(1);
        assert!(!a.same(&b));
        assert_ne!(a.identity(), b.identity());
    }
}
