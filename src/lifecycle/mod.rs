//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → shutdown future resolves
//!
//! Shutdown (shutdown.rs):
//!     Stop accepting → Broadcast to handlers → Drain connections → Exit
//! ```
//!
//! # Design Decisions
//! - Ordered shutdown: stop accept, drain, close
//! - Shutdown has a deadline: connections still open after the grace
//!   period are abandoned
//! - Store state stays consistent at any abandonment point since every
//!   store operation is one critical section

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
pub use signals::wait_for_signal;
