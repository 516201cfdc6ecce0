//! # forge-stream
//!
//! Server-push stream consumers for Skyforge live views.
//!
//! Everything here follows one subscribe/cleanup contract: a consumer is
//! opened against a transport, feeds typed state while it lives, and is
//! torn down deterministically with the view that owns it. Nothing
//! auto-reconnects; a dead connection is a visible state, and a fresh view
//! opens a fresh consumer.
//!
//! ## Pieces
//!
//! - [`SnapshotCache`]: injected last-write-wins cache with change
//!   notifications
//! - [`spawn_snapshot_consumer`]: applies SSE `snapshot` events to a cache,
//!   dropping malformed payloads silently
//! - [`TerminalSession`]: one bidirectional socket per terminal view, with
//!   `stdin`/`resize` outbound and `output`/`info`/`error` inbound frames
//! - [`run_bounded`]: fixed-width worker pool for bulk node operations
//! - [`first_event_within`]: bounded wait for a stream's first event
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use forge_stream::{SnapshotCache, SseEvent, spawn_snapshot_consumer};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let (tx, rx) = futures::channel::mpsc::unbounded::<SseEvent>();
//! let cache: Arc<SnapshotCache<u64>> = Arc::new(SnapshotCache::new());
//!
//! let subscription = spawn_snapshot_consumer(rx, cache.clone());
//! tx.unbounded_send(SseEvent::new("snapshot", "42")).expect("send");
//!
//! // ... the cache now tracks the latest snapshot ...
//! subscription.close().await;
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod batch;
pub mod cache;
pub mod error;
pub mod snapshot;
pub mod sse;
pub mod terminal;

// Re-export main types for convenience
pub use batch::{BatchItemResult, BatchOutcome, DEFAULT_BATCH_WORKERS, run_bounded};
pub use cache::{CacheEvent, SnapshotCache};
pub use error::{StreamError, StreamResult};
pub use snapshot::{DashboardSnapshot, DeploymentSummary, NodeSummary};
pub use sse::{SNAPSHOT_EVENT, SseEvent, StreamSubscription, first_event_within, spawn_snapshot_consumer};
pub use terminal::{
    ClientFrame, ServerFrame, TerminalEvent, TerminalSession, TerminalSize, TerminalState,
    WsReader, WsTextTransport, WsWriter, connect_terminal, open_terminal,
};
