use crate::callback::Callback;
use crate::listener::{hash_of, Listener, ListenerId};
use std::time::Duration;

/// A one-shot delay that fires once after the specified duration.
///
/// Declared as a listener, the timer is started the first time it is
/// reconciled and runs at most once for as long as the same `key` keeps
/// being declared.  Removing the listener (or tearing down the program)
/// aborts a pending timer, so its callback never runs.
///
/// # Example
///
/// ```rust,ignore
/// fn listeners(&self) -> Vec<Listener<Message>> {
///     vec![After::new(Duration::from_secs(5), self.id.as_str())
///         .listener(self.on_timeout.clone())]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct After {
    /// How long to wait before firing.
    pub duration: Duration,
    /// Distinguishes this timer from others of the same duration.
    pub key: String,
}

impl After {
    pub fn new(duration: Duration, key: impl Into<String>) -> Self {
        Self {
            duration,
            key: key.into(),
        }
    }

    pub fn listener<Msg: Send + 'static>(self, callback: Callback<Msg>) -> Listener<Msg> {
        let identity = hash_of(&(callback.identity(), self.duration));
        let duration = self.duration;
        Listener::task(ListenerId::with_str::<After>(&self.key), async move {
            tokio::time::sleep(duration).await;
            callback.emit()
        })
        .with_identity(identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listener::ListenerManager;
    use tokio::sync::mpsc;

    #[tokio::test(start_paused = true)]
    async fn fires_after_duration() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut manager = ListenerManager::new(tx);
        manager.reconcile(vec![After::new(Duration::from_secs(5), "toast")
            .listener(Callback::message("expired"))]);
        tokio::time::advance(Duration::from_secs(4)).await;
        assert!(rx.try_recv().is_err());
        assert_eq!(rx.recv().await, Some("expired"));
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_cancels_pending_timer() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut manager = ListenerManager::new(tx);
        manager.reconcile(vec![After::new(Duration::from_secs(5), "toast")
            .listener(Callback::message("expired"))]);
        manager.shutdown();
        tokio::time::advance(Duration::from_secs(10)).await;
        drop(manager);
        assert_eq!(rx.recv().await, None);
    }

    #[test]
    fn keys_distinguish_timers() {
        let a = After::new(Duration::from_secs(1), "a").listener(Callback::message(()));
        let b = After::new(Duration::from_secs(1), "b").listener(Callback::message(()));
        assert_ne!(a.id(), b.id());
    }
}
