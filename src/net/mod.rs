//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming TCP connection
//!     → listener.rs (accept loop, connection limits)
//!     → tracker.rs (lifecycle tracking for shutdown)
//!     → connection.rs (buffered framing)
//!     → Hand off to the connection handler
//!
//! Connection States:
//!     Open → AwaitRequest ⇄ Processing → Closed
//! ```
//!
//! # Design Decisions
//! - Bounded accept prevents resource exhaustion
//! - Each connection tracked for graceful shutdown

pub mod connection;
pub mod listener;
pub mod tracker;

pub use connection::{Connection, ConnectionError, ConnectionId};
pub use listener::{ConnectionPermit, Listener, ListenerError};
pub use tracker::{ConnectionGuard, ConnectionTracker};
