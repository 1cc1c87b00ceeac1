//! PN532 frame transport: handshake sequencing and response decoding.
//!
//! Every command follows the same synchronous pipeline on the calling
//! thread: build the frame, write it, poll the status byte until the chip
//! reports ready, verify the fixed ACK frame, poll ready again, then read
//! and validate the response. The only suspension point is the blocking
//! pause between status polls.
//!
//! The bus handle is owned exclusively by the driver for its lifetime;
//! there is no internal locking and no cancellation mechanism beyond the
//! timeout budget.

pub mod commands;

use core::time::Duration;

use log::{debug, trace};

use crate::error::ProtocolError;
use crate::frame::{self, build_frame, response_header};
use crate::poll::{Delay, PollStrategy, ThreadDelay};
use crate::transport::BusTransport;

/// Full length of the `GetFirmwareVersion` response frame: 6 header
/// bytes, the response code, IC/Ver/Rev/Support, data checksum and
/// postamble.
pub const FIRMWARE_VERSION_RESPONSE_LEN: usize = 13;

/// Byte offset of the version word inside the response frame.
const FIRMWARE_VERSION_OFFSET: usize = 7;

/// Decoded `GetFirmwareVersion` fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FirmwareVersion {
    /// IC identifier (0x32 for the PN532).
    pub ic: u8,
    /// Firmware major version.
    pub ver: u8,
    /// Firmware revision.
    pub rev: u8,
    /// Feature support bitmask (ISO 14443A/B, ISO 18092).
    pub support: u8,
}

impl From<u32> for FirmwareVersion {
    fn from(word: u32) -> Self {
        let [ic, ver, rev, support] = word.to_be_bytes();
        Self {
            ic,
            ver,
            rev,
            support,
        }
    }
}

/// Extract the firmware-version word from a raw response frame.
///
/// The leading bytes must equal the firmware response header
/// `00 00 FF 06 FA D5` and the response code must follow it; only then
/// are the four bytes at the version offset combined high-byte-first.
pub fn decode_firmware_version<E>(buf: &[u8]) -> Result<u32, ProtocolError<E>> {
    let header = response_header(6);
    if buf.len() < FIRMWARE_VERSION_RESPONSE_LEN || buf[..header.len()] != header {
        return Err(ProtocolError::UnexpectedResponse);
    }
    if buf[6] != commands::GET_FIRMWARE_VERSION + 1 {
        return Err(ProtocolError::UnexpectedResponse);
    }
    let o = FIRMWARE_VERSION_OFFSET;
    Ok(u32::from_be_bytes([
        buf[o],
        buf[o + 1],
        buf[o + 2],
        buf[o + 3],
    ]))
}

/// PN532 driver over an exclusively-owned bus.
pub struct Pn532<B, D = ThreadDelay> {
    bus: B,
    delay: D,
    poll: PollStrategy,
}

impl<B: BusTransport> Pn532<B> {
    /// Driver with the default 10 ms poll interval and an OS-scheduler
    /// delay.
    pub fn new(bus: B) -> Self {
        Self::with_parts(bus, ThreadDelay, PollStrategy::default())
    }
}

impl<B: BusTransport, D: Delay> Pn532<B, D> {
    /// Driver with an injected delay and poll pacing.
    pub fn with_parts(bus: B, delay: D, poll: PollStrategy) -> Self {
        Self { bus, delay, poll }
    }

    /// Give the bus back.
    pub fn release(self) -> B {
        self.bus
    }

    /// Write one command frame and confirm the chip accepted it.
    ///
    /// On success the chip has both acknowledged the command and has a
    /// response ready to be read. A `timeout` of zero polls readiness
    /// indefinitely — an explicit opt-in to an unbounded block, not a
    /// default. No step is retried internally.
    pub fn send_command_check_ack(
        &mut self,
        opcode: u8,
        payload: &[u8],
        timeout: Duration,
    ) -> Result<(), ProtocolError<B::Error>> {
        let frame = build_frame(opcode, payload)?;
        trace!("frame out: {:02X?}", frame.as_slice());
        self.bus.write(&frame).map_err(ProtocolError::Transport)?;

        self.wait_ready(timeout)?;
        self.read_ack()?;
        self.wait_ready(timeout)?;
        Ok(())
    }

    /// Poll the status byte until the chip reports ready.
    ///
    /// Elapsed time accumulates as the sum of performed pauses, so a
    /// nonzero `timeout` fails after a total wait in
    /// `[timeout, timeout + interval)`, never earlier.
    fn wait_ready(&mut self, timeout: Duration) -> Result<(), ProtocolError<B::Error>> {
        let mut elapsed = Duration::ZERO;
        loop {
            self.bus
                .write(&[frame::SPI_STATREAD])
                .map_err(ProtocolError::Transport)?;
            let mut status = [0u8];
            self.bus
                .read_exact(&mut status)
                .map_err(ProtocolError::Transport)?;
            if status[0] == frame::SPI_READY {
                return Ok(());
            }
            if !timeout.is_zero() && elapsed >= timeout {
                return Err(ProtocolError::Timeout);
            }
            self.delay.delay(self.poll.interval);
            elapsed += self.poll.interval;
        }
    }

    /// Read the 6-byte acknowledgement and compare it element-wise
    /// against the fixed ACK pattern.
    fn read_ack(&mut self) -> Result<(), ProtocolError<B::Error>> {
        self.bus
            .write(&[frame::SPI_DATAREAD])
            .map_err(ProtocolError::Transport)?;
        let mut ack = [0u8; frame::ACK_FRAME.len()];
        self.bus
            .read_exact(&mut ack)
            .map_err(ProtocolError::Transport)?;
        if ack != frame::ACK_FRAME {
            debug!("bad ack: {ack:02X?}");
            return Err(ProtocolError::NoAck);
        }
        Ok(())
    }

    /// Read a response of exactly `buf.len()` bytes and verify its
    /// leading bytes against `expected_header` before trusting any offset
    /// into the buffer.
    pub fn read_response(
        &mut self,
        buf: &mut [u8],
        expected_header: &[u8],
    ) -> Result<(), ProtocolError<B::Error>> {
        self.bus
            .write(&[frame::SPI_DATAREAD])
            .map_err(ProtocolError::Transport)?;
        self.bus.read_exact(buf).map_err(ProtocolError::Transport)?;
        trace!("frame in: {buf:02X?}");
        if buf.len() < expected_header.len() || buf[..expected_header.len()] != *expected_header {
            return Err(ProtocolError::UnexpectedResponse);
        }
        Ok(())
    }

    /// Run the full pipeline for an arbitrary command.
    ///
    /// `response` must be sized for the complete frame: 6 header bytes,
    /// the response code, the payload, the data checksum and the
    /// postamble. The header pattern is derived from the buffer length
    /// and the response code must be the command code plus one. A
    /// `timeout` of zero polls readiness indefinitely.
    pub fn process(
        &mut self,
        opcode: u8,
        payload: &[u8],
        response: &mut [u8],
        timeout: Duration,
    ) -> Result<(), ProtocolError<B::Error>> {
        if response.len() < 9 {
            return Err(ProtocolError::UnexpectedResponse);
        }
        self.send_command_check_ack(opcode, payload, timeout)?;

        // LEN covers the direction byte, the response code and the
        // payload; delimiters and checksums account for the other seven.
        let expected_len = (response.len() - 7) as u8;
        let header = response_header(expected_len);
        self.read_response(response, &header)?;
        if response[6] != opcode.wrapping_add(1) {
            return Err(ProtocolError::UnexpectedResponse);
        }
        Ok(())
    }

    /// Query the chip's firmware version.
    ///
    /// A `timeout` of zero polls readiness indefinitely; see
    /// [`Self::process`].
    pub fn firmware_version(
        &mut self,
        timeout: Duration,
    ) -> Result<FirmwareVersion, ProtocolError<B::Error>> {
        let mut response = [0u8; FIRMWARE_VERSION_RESPONSE_LEN];
        self.process(
            commands::GET_FIRMWARE_VERSION,
            &[],
            &mut response,
            timeout,
        )?;
        let word = decode_firmware_version(&response)?;
        debug!("firmware version word: {word:#010X}");
        Ok(FirmwareVersion::from(word))
    }
}
