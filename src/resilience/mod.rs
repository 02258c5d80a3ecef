//! Resilience helpers.
//!
//! # Data Flow
//! ```text
//! Listener accept fails
//!     → backoff.rs (exponential delay with jitter)
//!     → retry accept
//! ```
//!
//! # Design Decisions
//! - Transient accept errors (fd exhaustion, aborted handshakes) never stop the server
//! - Jitter spreads retries so a burst of failures does not retry in lockstep

pub mod backoff;
