//! Wire protocol: JSON documents over a TCP stream.
//!
//! # Data Flow
//! ```text
//! bytes ─▶ frame.rs (one JSON document) ─▶ request.rs (typed Request)
//!                                               │
//!                                          dispatcher
//!                                               │
//! bytes ◀─ frame.rs (document + '\n') ◀── response.rs (envelope)
//! ```
//!
//! # Design Decisions
//! - Requests are validated once at decode time into a tagged enum
//! - Responses always carry `status`; errors add `code` and `message`
//! - Decode problems are answered in-band; only framing limits and socket
//!   failures close a connection

pub mod frame;
pub mod request;
pub mod response;

pub use frame::{Frame, FrameError};
pub use request::{decode, Request, RequestError};
pub use response::{ErrorKind, Payload, Response};
