//! Live-subscription handle and snapshot callback types.

use std::fmt;
use std::sync::Arc;

/// Callback invoked with a full replacement snapshot of a collection.
///
/// Listeners deliver snapshots, not deltas: every invocation carries the
/// complete current result set for the subscribed filter.
pub type SnapshotHandler<T> = Arc<dyn Fn(Vec<T>) + Send + Sync>;

/// Handle to a live subscription.
///
/// Unregisters the underlying listener when [`unsubscribe`] is called or
/// when the handle is dropped, whichever comes first. After
/// unregistration no further snapshots are delivered.
///
/// [`unsubscribe`]: Subscription::unsubscribe
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    /// Wrap an unregistration closure.
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// A subscription with nothing to tear down.
    pub fn noop() -> Self {
        Self { cancel: None }
    }

    /// Explicitly unregister the listener.
    pub fn unsubscribe(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}
