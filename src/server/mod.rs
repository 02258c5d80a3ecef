//! Shop server: accept loop and connection fan-out.
//!
//! # Data Flow
//! ```text
//! Listener::accept ─▶ spawn Handler (one task per connection)
//!                        │ read frame
//!                        ▼
//!                    Dispatcher ─▶ Shop (engine) ─▶ Response
//!                        │ write response
//!                        ▼
//!                    next frame ...
//! ```
//!
//! # Shutdown
//! 1. The shutdown future resolves: stop accepting, close the listener
//! 2. Broadcast to every handler; idle ones exit immediately
//! 3. Wait up to the grace period for the connection count to reach zero
//!
//! # Design Decisions
//! - All handlers share one `Arc<Shop>`; the listener holds no shop state
//! - A failing connection only ever ends its own task

pub mod dispatch;
pub mod handler;

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpStream;

use crate::config::ShopConfig;
use crate::engine::Shop;
use crate::lifecycle::Shutdown;
use crate::net::{Connection, ConnectionPermit, ConnectionTracker, Listener, ListenerError};

pub use dispatch::Dispatcher;
pub use handler::Handler;

/// The shop server, ready to run on a bound [`Listener`].
#[derive(Debug)]
pub struct Server {
    dispatcher: Dispatcher,
    tracker: ConnectionTracker,
    shutdown: Shutdown,
    max_frame_bytes: usize,
    grace_period: Duration,
}

impl Server {
    pub fn new(shop: Arc<Shop>, config: &ShopConfig) -> Self {
        Self {
            dispatcher: Dispatcher::new(shop),
            tracker: ConnectionTracker::new(),
            shutdown: Shutdown::new(),
            max_frame_bytes: config.limits.max_frame_bytes,
            grace_period: Duration::from_secs(config.shutdown.grace_period_secs),
        }
    }

    /// Accept connections until `signal` resolves, then drain.
    pub async fn run(self, listener: Listener, signal: impl Future<Output = ()>) {
        tokio::pin!(signal);

        if let Ok(addr) = listener.local_addr() {
            tracing::info!(address = %addr, "Shop server accepting connections");
        }

        loop {
            tokio::select! {
                _ = &mut signal => {
                    tracing::info!("Shutdown requested, no longer accepting connections");
                    break;
                }
                res = listener.accept() => match res {
                    Ok((stream, peer_addr, permit)) => self.spawn_handler(stream, peer_addr, permit),
                    Err(ListenerError::Closed) => break,
                    Err(e) => {
                        tracing::error!(error = %e, "Accept failed");
                    }
                },
            }
        }

        drop(listener);
        self.shutdown.trigger();

        let open = self.tracker.active_count();
        if open > 0 {
            tracing::info!(
                open_connections = open,
                grace_period = ?self.grace_period,
                "Waiting for connections to drain"
            );
        }

        if self.tracker.wait_for_drain(self.grace_period).await {
            tracing::info!("All connections closed");
        } else {
            tracing::warn!(
                open_connections = self.tracker.active_count(),
                "Grace period elapsed, abandoning open connections"
            );
        }
    }

    fn spawn_handler(&self, stream: TcpStream, peer_addr: SocketAddr, permit: ConnectionPermit) {
        let guard = self.tracker.track();
        let connection = Connection::new(stream, self.max_frame_bytes);
        let mut handler = Handler::new(
            guard.id(),
            peer_addr,
            connection,
            self.dispatcher.clone(),
            self.shutdown.subscribe(),
        );

        tokio::spawn(async move {
            tracing::debug!(connection_id = %handler.id(), peer_addr = %peer_addr, "Connection opened");

            if let Err(e) = handler.run().await {
                tracing::warn!(
                    connection_id = %handler.id(),
                    peer_addr = %handler.peer_addr(),
                    error = %e,
                    "Connection terminated"
                );
            }

            tracing::debug!(connection_id = %handler.id(), "Connection closed");

            drop(guard);
            drop(permit);
        });
    }
}
