//! Bus transport capability.
//!
//! The driver consumes the bus as a minimal blocking capability with no
//! inherent framing; all protocol knowledge (selector opcodes, frame
//! delimiters) stays in the layers above. The bus is a single exclusively
//! owned resource: callers needing concurrent command issuance must
//! serialize exchanges externally.

pub mod spi;

pub use spi::SpiTransport;

/// Minimal blocking bus consumed by the driver.
pub trait BusTransport {
    type Error: core::fmt::Debug;

    /// Full-buffer blocking write.
    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Blocking read of exactly `buf.len()` bytes.
    ///
    /// Implementations must fail rather than return a partially filled
    /// buffer; the driver never interprets a short read.
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), Self::Error>;
}
