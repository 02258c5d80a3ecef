//! Per-connection request loop.
//!
//! # State Machine
//! ```text
//! Open ─▶ AwaitRequest ─(frame)─▶ Processing ─(response flushed)─▶ AwaitRequest
//!              │
//!              ├─(peer closed / transport error)─▶ Closed
//!              └─(shutdown)─────────────────────▶ Closed
//! ```
//!
//! Requests on one connection are strictly sequential: the next frame is
//! not read until the previous response has been written and flushed.
//! Shutdown is only observed while waiting for a request, so a request
//! already in Processing always gets its response. Reads are polled
//! before shutdown, so a request that is already buffered is answered
//! too.

use std::net::SocketAddr;

use tokio::sync::broadcast;

use crate::net::{Connection, ConnectionError, ConnectionId};
use crate::server::dispatch::Dispatcher;

#[derive(Debug)]
pub struct Handler {
    id: ConnectionId,
    peer_addr: SocketAddr,
    connection: Connection,
    dispatcher: Dispatcher,
    shutdown: broadcast::Receiver<()>,
}

impl Handler {
    pub fn new(
        id: ConnectionId,
        peer_addr: SocketAddr,
        connection: Connection,
        dispatcher: Dispatcher,
        shutdown: broadcast::Receiver<()>,
    ) -> Self {
        Self {
            id,
            peer_addr,
            connection,
            dispatcher,
            shutdown,
        }
    }

    /// Serve requests until the peer disconnects or shutdown is signalled.
    ///
    /// Errors are transport failures only. Store and request errors are
    /// answered in-band and never end the loop.
    pub async fn run(&mut self) -> Result<(), ConnectionError> {
        loop {
            let maybe_frame = tokio::select! {
                biased;
                res = self.connection.read_frame() => res?,
                _ = self.shutdown.recv() => {
                    tracing::debug!(connection_id = %self.id, "Closing connection for shutdown");
                    return Ok(());
                }
            };

            let Some(frame) = maybe_frame else {
                return Ok(());
            };

            let response = self.dispatcher.handle_frame(frame);
            self.connection.write_response(&response).await?;
        }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn peer_addr(&self) -> SocketAddr {
        self.peer_addr
    }
}
