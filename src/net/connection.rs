//! Framed, buffered client socket.
//!
//! # Responsibilities
//! - Buffer inbound bytes and cut them into frames
//! - Write one newline-terminated response per call and flush it
//! - Enforce the per-connection frame size limit

use std::io;
use std::sync::atomic::{AtomicU64, Ordering};

use bytes::{Buf, BytesMut};
use thiserror::Error;
use tokio::io::{AsyncReadExt, AsyncWriteExt, BufWriter};
use tokio::net::TcpStream;

use crate::protocol::frame::{self, Frame, FrameError};
use crate::protocol::Response;

/// Global atomic counter for connection IDs.
/// Using relaxed ordering is sufficient since we only need uniqueness, not synchronization.
static CONNECTION_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a connection, used in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Generate a new unique connection ID.
    pub fn new() -> Self {
        Self(CONNECTION_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// Transport failures. Any of these ends the connection.
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Frame(#[from] FrameError),

    #[error("connection reset by peer")]
    ResetByPeer,

    #[error("failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug)]
pub struct Connection {
    stream: BufWriter<TcpStream>,
    buffer: BytesMut,
    max_frame_bytes: usize,
}

impl Connection {
    pub fn new(socket: TcpStream, max_frame_bytes: usize) -> Connection {
        Connection {
            stream: BufWriter::new(socket),
            buffer: BytesMut::with_capacity(4 * 1024),
            max_frame_bytes,
        }
    }

    /// Read the next frame.
    ///
    /// `Ok(None)` means the peer closed the connection cleanly between
    /// frames. Closing in the middle of a frame is `ResetByPeer`.
    pub async fn read_frame(&mut self) -> Result<Option<Frame>, ConnectionError> {
        loop {
            if let Some(frame) = self.parse_frame()? {
                return Ok(Some(frame));
            }

            if 0 == self.stream.read_buf(&mut self.buffer).await? {
                if self.buffer.is_empty() {
                    return Ok(None);
                } else {
                    return Err(ConnectionError::ResetByPeer);
                }
            }
        }
    }

    fn parse_frame(&mut self) -> Result<Option<Frame>, FrameError> {
        let skip = frame::leading_whitespace(&self.buffer);
        self.buffer.advance(skip);

        match frame::parse(&self.buffer, self.max_frame_bytes)? {
            Some((frame, len)) => {
                self.buffer.advance(len);
                Ok(Some(frame))
            }
            None => Ok(None),
        }
    }

    /// Write one response and flush it to the socket.
    pub async fn write_response(&mut self, response: &Response) -> Result<(), ConnectionError> {
        let bytes = frame::encode(response)?;

        self.stream.write_all(&bytes).await?;
        self.stream.flush().await?;

        Ok(())
    }
}
