//! Error types for stream consumers.

use std::time::Duration;

use thiserror::Error;

/// Result type alias for stream operations.
pub type StreamResult<T> = Result<T, StreamError>;

/// Errors that can occur on a server-push stream.
///
/// Event-level problems (a malformed payload) never appear here — those are
/// dropped where they occur. These are connection-level failures that the
/// consuming view surfaces as a visible status change.
#[derive(Debug, Error)]
pub enum StreamError {
    /// No event arrived within the bounded initial wait.
    #[error("no event arrived within {0:?}")]
    ConnectTimeout(Duration),

    /// The stream ended cleanly before an expected event.
    #[error("stream closed")]
    Closed,

    /// The underlying transport failed.
    #[error("transport error: {0}")]
    Transport(String),

    /// The websocket handshake was rejected or never completed.
    #[error("websocket handshake failed: {0}")]
    Handshake(String),
}
