//! Splitting a byte stream into JSON documents.
//!
//! A frame is one complete JSON value. Clients normally terminate each
//! request with `\n`, but concatenated or bare documents decode the same
//! way: the parser consumes exactly one value and leaves the rest buffered.
//!
//! ```text
//! {"action":"get_products"}\n{"action":"create_cart"}\n
//! └──────── frame 1 ────────┘  └──────── frame 2 ───────┘
//! ```
//!
//! A malformed document is still one frame: it is rejected once its
//! brackets balance (or, for bare garbage, at the end of the line), so
//! every request gets exactly one reply.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// A decoded unit of the request stream.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    /// A complete, well-formed JSON document.
    Document(Value),
    /// Bytes that can never become a valid document. The client gets an
    /// error response and the connection carries on.
    Rejected { reason: String },
}

/// Framing failures that end the connection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    #[error("frame exceeds {limit} bytes")]
    TooLarge { limit: usize },
}

/// Number of leading whitespace bytes, which separate documents.
pub fn leading_whitespace(buf: &[u8]) -> usize {
    buf.iter()
        .take_while(|b| matches!(b, b' ' | b'\t' | b'\r' | b'\n'))
        .count()
}

/// Try to decode one frame from the front of `buf`.
///
/// Returns `Ok(None)` when more bytes are needed, otherwise the frame and
/// the number of bytes it consumed. `buf` is expected to start at a
/// document boundary (see [`leading_whitespace`]).
pub fn parse(buf: &[u8], max_frame_bytes: usize) -> Result<Option<(Frame, usize)>, FrameError> {
    let mut stream = serde_json::Deserializer::from_slice(buf).into_iter::<Value>();

    match stream.next() {
        None => Ok(None),
        Some(Ok(value)) => {
            let consumed = stream.byte_offset();
            if consumed > max_frame_bytes {
                return Err(FrameError::TooLarge {
                    limit: max_frame_bytes,
                });
            }
            Ok(Some((Frame::Document(value), consumed)))
        }
        Some(Err(e)) if e.is_eof() => {
            if buf.len() > max_frame_bytes {
                return Err(FrameError::TooLarge {
                    limit: max_frame_bytes,
                });
            }
            Ok(None)
        }
        Some(Err(e)) => match rejected_len(buf) {
            Some(consumed) if consumed > max_frame_bytes => Err(FrameError::TooLarge {
                limit: max_frame_bytes,
            }),
            Some(consumed) => Ok(Some((
                Frame::Rejected {
                    reason: e.to_string(),
                },
                consumed,
            ))),
            None if buf.len() > max_frame_bytes => Err(FrameError::TooLarge {
                limit: max_frame_bytes,
            }),
            None => Ok(None),
        },
    }
}

/// Length of the malformed document at the front of `buf`, or `None`
/// while it is still open.
///
/// A document that opens with `{` or `[` runs until its brackets balance,
/// so a broken request spread over several lines or reads is rejected
/// once. Anything else runs to the end of its line.
fn rejected_len(buf: &[u8]) -> Option<usize> {
    if !matches!(buf.first(), Some(b'{' | b'[')) {
        return buf.iter().position(|&b| b == b'\n').map(|pos| pos + 1);
    }

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in buf.iter().enumerate() {
        if in_string {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                // A raw newline cannot sit inside a JSON string.
                b'"' | b'\n' => in_string = false,
                _ => {}
            }
            continue;
        }

        match b {
            b'"' => in_string = true,
            b'{' | b'[' => depth += 1,
            b'}' | b']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }

    None
}

/// Serialize one outgoing message, newline terminated.
pub fn encode<T: Serialize>(message: &T) -> serde_json::Result<Vec<u8>> {
    let mut bytes = serde_json::to_vec(message)?;
    bytes.push(b'\n');
    Ok(bytes)
}
