//! Relay stream upgrade and the message-mode duplex stream handed to callers.

use crate::{RelayError, RelayResult};
use futures_util::{Sink, SinkExt, Stream, StreamExt};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::pin::Pin;
use std::task::{ready, Context, Poll};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

/// Underlying WebSocket type.
pub type RelaySocket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// One application message. Each frame is delivered whole; ping, pong and
/// close frames are handled by the stream and never surface here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayFrame {
    Text(String),
    Binary(Vec<u8>),
}

impl From<RelayFrame> for Message {
    fn from(frame: RelayFrame) -> Self {
        match frame {
            RelayFrame::Text(text) => Message::text(text),
            RelayFrame::Binary(bytes) => Message::binary(bytes),
        }
    }
}

/// Upgrade `url` into a relay stream.
///
/// Completes exactly once: with the open stream after a successful
/// handshake, or with [`RelayError::StreamOpen`] on the first error. There is
/// no retry and no timeout beyond the transport's own.
pub async fn open(url: &str) -> RelayResult<RelayStream> {
    let (socket, response) = connect_async(url).await.map_err(RelayError::StreamOpen)?;
    tracing::debug!(status = %response.status(), "Relay stream upgraded");

    Ok(RelayStream {
        url: url.to_string(),
        socket,
    })
}

/// A live relay connection in message mode.
///
/// Implements [`Stream`] of received frames and [`Sink`] of frames to send.
/// The caller owns the connection once `connect` returns; nothing in this
/// crate keeps a handle to it.
pub struct RelayStream {
    url: String,
    socket: RelaySocket,
}

impl std::fmt::Debug for RelayStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayStream").field("url", &self.url).finish()
    }
}

impl RelayStream {
    /// The negotiated URL this stream was opened against.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Serialize `value` and send it as a single text frame.
    pub async fn send_json<T: Serialize>(&mut self, value: &T) -> RelayResult<()> {
        let text = serde_json::to_string(value)?;
        self.send(RelayFrame::Text(text)).await
    }

    /// Receive the next frame and decode it as JSON.
    ///
    /// Returns `None` once the peer closes the stream.
    pub async fn next_json<T: DeserializeOwned>(&mut self) -> Option<RelayResult<T>> {
        let frame = match self.next().await? {
            Ok(frame) => frame,
            Err(e) => return Some(Err(e)),
        };

        let decoded = match &frame {
            RelayFrame::Text(text) => serde_json::from_str(text),
            RelayFrame::Binary(bytes) => serde_json::from_slice(bytes),
        };
        Some(decoded.map_err(RelayError::from))
    }

    /// Receive the next frame, treating end of stream as an error.
    pub async fn recv(&mut self) -> RelayResult<RelayFrame> {
        self.next().await.unwrap_or(Err(RelayError::StreamClosed))
    }

    /// Send a close frame and flush it.
    pub async fn close(mut self) -> RelayResult<()> {
        self.socket.close(None).await.map_err(RelayError::Frame)
    }

    /// Give up the message-mode wrapper and take the raw WebSocket.
    pub fn into_inner(self) -> RelaySocket {
        self.socket
    }
}

impl Stream for RelayStream {
    type Item = RelayResult<RelayFrame>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        loop {
            let message = match ready!(this.socket.poll_next_unpin(cx)) {
                Some(Ok(message)) => message,
                Some(Err(e)) => return Poll::Ready(Some(Err(RelayError::Frame(e)))),
                None => return Poll::Ready(None),
            };

            match message {
                Message::Text(text) => {
                    return Poll::Ready(Some(Ok(RelayFrame::Text(text.as_str().to_owned()))))
                }
                Message::Binary(bytes) => {
                    return Poll::Ready(Some(Ok(RelayFrame::Binary(bytes.to_vec()))))
                }
                Message::Close(_) => return Poll::Ready(None),
                Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => continue,
            }
        }
    }
}

impl Sink<RelayFrame> for RelayStream {
    type Error = RelayError;

    fn poll_ready(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.get_mut()
            .socket
            .poll_ready_unpin(cx)
            .map_err(RelayError::Frame)
    }

    fn start_send(self: Pin<&mut Self>, frame: RelayFrame) -> Result<(), Self::Error> {
        self.get_mut()
            .socket
            .start_send_unpin(Message::from(frame))
            .map_err(RelayError::Frame)
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.get_mut()
            .socket
            .poll_flush_unpin(cx)
            .map_err(RelayError::Frame)
    }

    fn poll_close(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.get_mut()
            .socket
            .poll_close_unpin(cx)
            .map_err(RelayError::Frame)
    }
}
