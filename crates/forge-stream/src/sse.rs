//! Server-sent event consumption for dashboard snapshots.
//!
//! The consumer is transport-agnostic: anything yielding [`SseEvent`]
//! items drives it, so tests use plain channels and production wires in
//! the HTTP client's event stream. One rule everywhere: a malformed event
//! is dropped silently and the subscription stays open; only teardown of
//! the owning view closes it.

use std::sync::Arc;
use std::time::Duration;

use futures::{Stream, StreamExt};
use serde::de::DeserializeOwned;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::cache::SnapshotCache;
use crate::error::{StreamError, StreamResult};

/// Event name carrying a full dashboard snapshot.
pub const SNAPSHOT_EVENT: &str = "snapshot";

/// One named server-sent event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseEvent {
    /// Event name from the `event:` field.
    pub event: String,
    /// Raw payload from the `data:` field.
    pub data: String,
}

impl SseEvent {
    /// Creates an event.
    #[must_use]
    pub fn new(event: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            data: data.into(),
        }
    }
}

/// Handle owning a running stream-consumer task.
///
/// The subscription ends when [`close`](Self::close) is called or the
/// handle is dropped — either way the task is aborted and the underlying
/// event stream is dropped with it, so no callbacks fire afterwards.
#[derive(Debug)]
pub struct StreamSubscription {
    task: JoinHandle<()>,
}

impl StreamSubscription {
    /// Tears the subscription down and waits for the task to finish.
    pub async fn close(mut self) {
        self.task.abort();
        let _ = (&mut self.task).await;
    }

    /// Whether the consumer task has already exited (stream ended).
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for StreamSubscription {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Spawns a consumer that applies `snapshot` events to the cache.
///
/// Each `snapshot`-named event is decoded as `T` and replaces the cached
/// value wholesale. Events with other names are ignored; events that fail
/// to decode are dropped silently and the subscription remains open.
pub fn spawn_snapshot_consumer<T, S>(
    events: S,
    cache: Arc<SnapshotCache<T>>,
) -> StreamSubscription
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
    S: Stream<Item = SseEvent> + Send + 'static,
{
    let task = tokio::spawn(async move {
        futures::pin_mut!(events);
        while let Some(event) = events.next().await {
            if event.event != SNAPSHOT_EVENT {
                continue;
            }
            match serde_json::from_str::<T>(&event.data) {
                Ok(snapshot) => cache.replace(snapshot),
                Err(e) => debug!(error = %e, "dropping malformed snapshot event"),
            }
        }
        debug!("snapshot stream ended");
    });

    StreamSubscription { task }
}

/// Waits for the first event with a bounded deadline.
///
/// Used wherever a consumer needs proof the stream is live before trusting
/// it (readiness checks, initial connect).
///
/// # Errors
///
/// [`StreamError::ConnectTimeout`] when nothing arrives in time,
/// [`StreamError::Closed`] when the stream ends first.
pub async fn first_event_within<S>(events: &mut S, wait: Duration) -> StreamResult<SseEvent>
where
    S: Stream<Item = SseEvent> + Unpin,
{
    match tokio::time::timeout(wait, events.next()).await {
        Ok(Some(event)) => Ok(event),
        Ok(None) => Err(StreamError::Closed),
        Err(_) => Err(StreamError::ConnectTimeout(wait)),
    }
}
