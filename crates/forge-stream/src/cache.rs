//! Last-write-wins snapshot cache with change notification.
//!
//! Views share one cache instance, injected explicitly — never a hidden
//! module-level singleton. The stream consumer replaces the value wholesale
//! on every snapshot event; successful mutations invalidate it so the next
//! fetch repopulates.

use parking_lot::RwLock;
use tokio::sync::broadcast;

/// Change notifications emitted by [`SnapshotCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheEvent {
    /// A new snapshot replaced the cached value.
    Replaced,
    /// The cached value was cleared.
    Invalidated,
}

/// A process-wide cached value with a subscribe/invalidate lifecycle.
///
/// `replace` is last-write-wins; there is no merging. Reads clone the
/// current value so the lock is never held across awaits.
#[derive(Debug)]
pub struct SnapshotCache<T> {
    current: RwLock<Option<T>>,
    events: broadcast::Sender<CacheEvent>,
}

impl<T: Clone> SnapshotCache<T> {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            current: RwLock::new(None),
            events,
        }
    }

    /// The current snapshot, if one has arrived.
    #[must_use]
    pub fn current(&self) -> Option<T> {
        self.current.read().clone()
    }

    /// Whether a snapshot is cached.
    #[must_use]
    pub fn has_snapshot(&self) -> bool {
        self.current.read().is_some()
    }

    /// Replaces the cached value wholesale and notifies subscribers.
    pub fn replace(&self, snapshot: T) {
        *self.current.write() = Some(snapshot);
        let _ = self.events.send(CacheEvent::Replaced);
    }

    /// Clears the cached value and notifies subscribers.
    pub fn invalidate(&self) {
        *self.current.write() = None;
        let _ = self.events.send(CacheEvent::Invalidated);
    }

    /// Subscribes to change notifications.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<CacheEvent> {
        self.events.subscribe()
    }

    /// Number of live change subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.events.receiver_count()
    }
}

impl<T: Clone> Default for SnapshotCache<T> {
    fn default() -> Self {
        Self::new()
    }
}
