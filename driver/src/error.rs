//! Error types for the frame transport.
//!
//! Every layer returns a typed failure instead of partially-populated
//! output; nothing in this crate retries or logs above debug level on its
//! own. Retry policy belongs to the caller.

use thiserror::Error;

/// Command too long for the wire format's one-byte length field.
///
/// Returned by [`build_frame`](crate::frame::build_frame) before any byte
/// reaches the bus. This is a caller programming error, not a runtime
/// fault to recover from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("command of {0} bytes exceeds the frame length limit")]
pub struct FrameTooLarge(pub usize);

/// Failure taxonomy of one command exchange.
///
/// `E` is the bus transport's error type; transport failures are always
/// fatal and propagated unmodified. On any failure the bus read position
/// is undefined and the caller must re-initiate the exchange before
/// trusting further reads.
#[derive(Debug, PartialEq, Eq, Error)]
pub enum ProtocolError<E> {
    /// Frame construction rejected the command before any I/O.
    #[error(transparent)]
    FrameTooLarge(#[from] FrameTooLarge),

    /// Underlying bus I/O failure, never retried internally.
    #[error("bus transport error: {0:?}")]
    Transport(E),

    /// Readiness was not observed within the timeout budget. Recoverable
    /// by retrying the exchange with fresh state.
    #[error("peripheral not ready within the timeout budget")]
    Timeout,

    /// The peripheral rejected or garbled the command: the 6-byte
    /// acknowledgement did not match the fixed ACK pattern.
    #[error("acknowledgement frame missing or malformed")]
    NoAck,

    /// Response header mismatch, treated as data corruption. No payload
    /// byte past the mismatch is interpreted.
    #[error("unexpected response header")]
    UnexpectedResponse,
}
