//! Interactive terminal sessions over a bidirectional socket.
//!
//! One socket per open terminal view. Keystrokes go out as `stdin` frames,
//! size changes as `resize` frames (sent once immediately after the socket
//! opens); inbound frames are `output` text plus out-of-band `info`/`error`
//! annotations. A dead socket stays dead — reconnection is a fresh view
//! with a fresh session, never an automatic retry here.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures::stream::{SplitSink, SplitStream};
use futures::{Sink, SinkExt, Stream, StreamExt};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{StreamError, StreamResult};

/// Frames sent from the terminal view to the node console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ClientFrame {
    /// User keystrokes.
    Stdin {
        /// Raw input text.
        data: String,
    },
    /// Terminal geometry change.
    Resize {
        /// Columns.
        cols: u16,
        /// Rows.
        rows: u16,
    },
}

/// Frames received from the node console.
///
/// Anything with an unrecognized `type` tag fails to decode and is ignored
/// by the read loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ServerFrame {
    /// Raw terminal output to render.
    Output {
        /// Output text.
        data: String,
    },
    /// Out-of-band annotation, rendered on its own line.
    Info {
        /// Annotation text.
        data: String,
    },
    /// Out-of-band error annotation, rendered on its own line.
    Error {
        /// Annotation text.
        data: String,
    },
}

/// Terminal geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalSize {
    /// Columns.
    pub cols: u16,
    /// Rows.
    pub rows: u16,
}

impl Default for TerminalSize {
    fn default() -> Self {
        Self { cols: 80, rows: 24 }
    }
}

/// Connection state of a terminal session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalState {
    /// Socket is open.
    Connected,
    /// Socket closed cleanly (remote end or local close).
    Disconnected,
    /// Socket died with a transport error.
    Failed,
}

/// Events surfaced to the terminal view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalEvent {
    /// Raw output text.
    Output(String),
    /// Out-of-band annotation.
    Info(String),
    /// Out-of-band error annotation.
    Error(String),
    /// The socket closed cleanly.
    Closed,
    /// The socket failed; the message describes the transport error.
    Failed(String),
}

/// One interactive terminal session bound to one socket.
///
/// Created by [`open`](Self::open); the session owns the write half and a
/// spawned read loop over the other half. Dropping or
/// [`close`](Self::close)-ing the session tears both down deterministically.
#[derive(Debug)]
pub struct TerminalSession<W> {
    id: Uuid,
    writer: W,
    state: Arc<RwLock<TerminalState>>,
    reader: JoinHandle<()>,
}

impl<W> TerminalSession<W>
where
    W: Sink<String, Error = StreamError> + Unpin,
{
    /// Opens a session over a split transport.
    ///
    /// The initial resize frame is sent before anything else, immediately
    /// after the socket reports itself open. Inbound frames arrive on the
    /// returned receiver.
    ///
    /// # Errors
    ///
    /// Returns the transport error if the initial resize cannot be sent.
    pub async fn open<R>(
        mut writer: W,
        reader: R,
        size: TerminalSize,
    ) -> StreamResult<(Self, mpsc::UnboundedReceiver<TerminalEvent>)>
    where
        R: Stream<Item = StreamResult<String>> + Send + 'static,
    {
        let initial = encode_frame(&ClientFrame::Resize {
            cols: size.cols,
            rows: size.rows,
        })?;
        writer.send(initial).await?;

        let state = Arc::new(RwLock::new(TerminalState::Connected));
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        let loop_state = state.clone();
        let reader = tokio::spawn(async move {
            read_loop(reader, &events_tx, &loop_state).await;
        });

        Ok((
            Self {
                id: Uuid::new_v4(),
                writer,
                state,
                reader,
            },
            events_rx,
        ))
    }

    /// Session identifier, for correlating views and logs.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Current connection state.
    #[must_use]
    pub fn state(&self) -> TerminalState {
        *self.state.read()
    }

    /// Sends user keystrokes.
    ///
    /// # Errors
    ///
    /// Returns the transport error if the socket rejects the frame.
    pub async fn send_input(&mut self, data: impl Into<String>) -> StreamResult<()> {
        let frame = encode_frame(&ClientFrame::Stdin { data: data.into() })?;
        self.writer.send(frame).await
    }

    /// Sends a geometry change.
    ///
    /// # Errors
    ///
    /// Returns the transport error if the socket rejects the frame.
    pub async fn resize(&mut self, size: TerminalSize) -> StreamResult<()> {
        let frame = encode_frame(&ClientFrame::Resize {
            cols: size.cols,
            rows: size.rows,
        })?;
        self.writer.send(frame).await
    }

    /// Closes the socket and stops the read loop.
    pub async fn close(mut self) {
        let _ = self.writer.close().await;
        self.reader.abort();
        let _ = (&mut self.reader).await;
        let mut state = self.state.write();
        if *state == TerminalState::Connected {
            *state = TerminalState::Disconnected;
        }
    }
}

impl<W> Drop for TerminalSession<W> {
    fn drop(&mut self) {
        self.reader.abort();
    }
}

async fn read_loop<R>(
    reader: R,
    events: &mpsc::UnboundedSender<TerminalEvent>,
    state: &Arc<RwLock<TerminalState>>,
) where
    R: Stream<Item = StreamResult<String>>,
{
    futures::pin_mut!(reader);
    while let Some(item) = reader.next().await {
        match item {
            Ok(text) => match serde_json::from_str::<ServerFrame>(&text) {
                Ok(ServerFrame::Output { data }) => {
                    let _ = events.send(TerminalEvent::Output(data));
                }
                Ok(ServerFrame::Info { data }) => {
                    let _ = events.send(TerminalEvent::Info(data));
                }
                Ok(ServerFrame::Error { data }) => {
                    let _ = events.send(TerminalEvent::Error(data));
                }
                Err(e) => debug!(error = %e, "ignoring unrecognized terminal frame"),
            },
            Err(e) => {
                warn!(error = %e, "terminal socket failed");
                *state.write() = TerminalState::Failed;
                let _ = events.send(TerminalEvent::Failed(e.to_string()));
                return;
            }
        }
    }
    debug!("terminal socket closed");
    *state.write() = TerminalState::Disconnected;
    let _ = events.send(TerminalEvent::Closed);
}

fn encode_frame(frame: &ClientFrame) -> StreamResult<String> {
    serde_json::to_string(frame).map_err(|e| StreamError::Transport(e.to_string()))
}

/// Text-frame view of a terminal websocket.
///
/// Yields inbound text frames as strings and sends outbound strings as text
/// frames; binary and control frames are handled below this layer and never
/// surface.
#[derive(Debug)]
pub struct WsTextTransport {
    ws: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

/// The write half of a split [`WsTextTransport`].
pub type WsWriter = SplitSink<WsTextTransport, String>;
/// The read half of a split [`WsTextTransport`].
pub type WsReader = SplitStream<WsTextTransport>;

impl WsTextTransport {
    /// Splits the transport into write and read halves.
    #[must_use]
    pub fn split_halves(self) -> (WsWriter, WsReader) {
        self.split()
    }
}

impl Stream for WsTextTransport {
    type Item = StreamResult<String>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            match Pin::new(&mut self.ws).poll_next(cx) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(None) => return Poll::Ready(None),
                Poll::Ready(Some(Ok(Message::Text(text)))) => {
                    return Poll::Ready(Some(Ok(text.to_string())));
                }
                Poll::Ready(Some(Ok(Message::Binary(_)))) => {
                    debug!("ignoring binary frame on terminal socket");
                }
                Poll::Ready(Some(Ok(_))) => {
                    // ping/pong/close are handled by tungstenite itself
                }
                Poll::Ready(Some(Err(e))) => {
                    return Poll::Ready(Some(Err(StreamError::Transport(e.to_string()))));
                }
            }
        }
    }
}

impl Sink<String> for WsTextTransport {
    type Error = StreamError;

    fn poll_ready(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Pin::new(&mut self.ws)
            .poll_ready(cx)
            .map_err(|e| StreamError::Transport(e.to_string()))
    }

    fn start_send(mut self: Pin<&mut Self>, item: String) -> Result<(), Self::Error> {
        Pin::new(&mut self.ws)
            .start_send(Message::Text(item.into()))
            .map_err(|e| StreamError::Transport(e.to_string()))
    }

    fn poll_flush(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Pin::new(&mut self.ws)
            .poll_flush(cx)
            .map_err(|e| StreamError::Transport(e.to_string()))
    }

    fn poll_close(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Pin::new(&mut self.ws)
            .poll_close(cx)
            .map_err(|e| StreamError::Transport(e.to_string()))
    }
}

/// Connects the terminal websocket for a node console.
///
/// # Errors
///
/// Returns [`StreamError::Handshake`] when the websocket upgrade fails.
pub async fn connect_terminal(url: &str) -> StreamResult<WsTextTransport> {
    let (ws, response) = tokio_tungstenite::connect_async(url)
        .await
        .map_err(|e| StreamError::Handshake(e.to_string()))?;
    debug!(status = ?response.status(), "terminal websocket established");
    Ok(WsTextTransport { ws })
}

/// Connects and opens a terminal session in one step.
///
/// # Errors
///
/// Returns a handshake error if the socket cannot be established, or a
/// transport error if the initial resize cannot be sent.
pub async fn open_terminal(
    url: &str,
    size: TerminalSize,
) -> StreamResult<(
    TerminalSession<WsWriter>,
    mpsc::UnboundedReceiver<TerminalEvent>,
)> {
    let transport = connect_terminal(url).await?;
    let (writer, reader) = transport.split_halves();
    TerminalSession::open(writer, reader, size).await
}
