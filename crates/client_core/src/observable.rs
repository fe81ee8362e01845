//! Shared value with change notification, the binding primitive between the
//! view-model and whatever renders it.

use std::sync::Arc;

use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

pub struct Observable<T> {
    tx: Arc<watch::Sender<T>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            tx: Arc::clone(&self.tx),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> Observable<T> {
    pub fn new(initial: T) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx: Arc::new(tx) }
    }

    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }

    /// Read without cloning. Do not call back into this observable from `f`.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.tx.borrow())
    }

    pub fn set(&self, value: T) {
        self.tx.send_replace(value);
    }

    /// Mutates in place; subscribers are notified only when `f` returns true.
    pub fn update(&self, f: impl FnOnce(&mut T) -> bool) -> bool {
        self.tx.send_if_modified(f)
    }

    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }

    /// Stream of values published after this call; the current value is not
    /// replayed.
    pub fn changes(&self) -> WatchStream<T> {
        WatchStream::from_changes(self.tx.subscribe())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use futures::StreamExt;

    use super::*;

    #[tokio::test]
    async fn set_notifies_subscribers() {
        let observable = Observable::new(0_u32);
        let mut rx = observable.subscribe();
        observable.set(3);
        rx.changed().await.expect("changed");
        assert_eq!(*rx.borrow(), 3);
        assert_eq!(observable.get(), 3);
    }

    #[tokio::test]
    async fn unmodified_update_does_not_notify() {
        let observable = Observable::new(vec![1_u32]);
        let rx = observable.subscribe();
        assert!(!observable.update(|_| false));
        assert!(!rx.has_changed().expect("sender alive"));
        assert!(observable.update(|v| {
            v.push(2);
            true
        }));
        assert!(rx.has_changed().expect("sender alive"));
        assert_eq!(observable.with(|v| v.len()), 2);
    }

    #[tokio::test]
    async fn changes_skip_the_current_value() {
        let observable = Observable::new("initial".to_string());
        let mut changes = observable.changes();
        let clone = observable.clone();
        clone.set("next".to_string());
        let next = tokio::time::timeout(Duration::from_secs(1), changes.next())
            .await
            .expect("change in time");
        assert_eq!(next.as_deref(), Some("next"));
    }
}
