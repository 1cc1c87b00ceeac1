//! TagStation PN532 driver.
//!
//! Frame transport for the PN532 contactless reader over SPI: command
//! framing with checksums, readiness polling under a bounded time budget,
//! ACK verification against the chip's fixed pattern, and response
//! decoding behind a header check.
//!
//! The bus is consumed as a minimal blocking capability
//! ([`BusTransport`]); an [`embedded-hal`](embedded_hal) SPI binding is
//! provided in [`transport::spi`], and any other synchronous byte pipe to
//! the chip can implement the trait. Each command exchange runs to
//! completion on the calling thread; serialize access to the bus
//! externally if several parts of the application issue commands.

pub mod error;
pub mod frame;
pub mod pn532;
pub mod poll;
pub mod transport;

pub use error::{FrameTooLarge, ProtocolError};
pub use pn532::{FirmwareVersion, Pn532};
pub use poll::{Delay, PollStrategy, ThreadDelay};
pub use transport::BusTransport;
