//! Behavioral PN532 peripheral emulation.
//!
//! Consumes frames the way the real chip does — checking the start code,
//! length checksum, data checksum and frame direction — then queues the
//! ACK plus a canned response for the command. Readiness is reported only
//! after a configurable number of status polls, which exercises the
//! driver's poll loop end to end.

use std::collections::VecDeque;

use log::{debug, warn};
use tagstation_driver::frame;
use tagstation_driver::pn532::commands;
use tagstation_driver::BusTransport;

/// Firmware word reported by the emulated chip (IC 0x32, v1.6,
/// ISO 14443A/B + ISO 18092 support).
pub const SIMULATED_FIRMWARE: u32 = 0x3201_0607;

/// Fault injected into every exchange against this peripheral.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    None,
    /// The status byte never reports ready.
    NeverReady,
    /// The ACK frame comes back garbled.
    CorruptAck,
    /// Reads stop short of the requested length.
    TruncatedResponse,
    /// The response start code is corrupted.
    CorruptHeader,
}

/// Bus-level failure surfaced to the driver.
#[derive(Debug, PartialEq, Eq)]
pub struct SimulatedBusError(pub &'static str);

pub struct SimulatedPn532 {
    /// Status polls answered "not ready" before each frame becomes
    /// readable.
    ready_after: u32,
    polls: u32,
    fault: Fault,
    /// Frames queued for upcoming data-read selectors, ACK first.
    pending: VecDeque<Vec<u8>>,
    next_is_status: bool,
}

impl SimulatedPn532 {
    pub fn new(ready_after: u32) -> Self {
        Self::with_fault(ready_after, Fault::None)
    }

    pub fn with_fault(ready_after: u32, fault: Fault) -> Self {
        Self {
            ready_after,
            polls: 0,
            fault,
            pending: VecDeque::new(),
            next_is_status: false,
        }
    }

    /// Validate an incoming frame exactly as the chip would and queue the
    /// ACK plus a response. Invalid frames are dropped: the driver then
    /// times out, which matches a real chip staying silent.
    fn accept_frame(&mut self, body: &[u8]) {
        let valid = body.len() >= 9
            && body[0] == frame::PREAMBLE
            && body[1] == frame::STARTCODE1
            && body[2] == frame::STARTCODE2
            && body[3].wrapping_add(body[4]) == 0
            && body[5] == frame::HOST_TO_PN532;
        if !valid {
            warn!("sim: malformed frame header, staying silent");
            return;
        }
        let len = body[3] as usize;
        if len < 2 || body.len() < 6 + len + 1 {
            warn!("sim: frame shorter than its LEN byte, staying silent");
            return;
        }
        let cmd = &body[6..5 + len];
        let checksum = body[5 + len];
        let sum = cmd
            .iter()
            .fold(frame::HOST_TO_PN532, |acc, &b| acc.wrapping_add(b));
        if sum.wrapping_add(checksum) != 0 {
            warn!("sim: bad data checksum, staying silent");
            return;
        }

        let opcode = cmd[0];
        debug!("sim: accepted command {opcode:#04X} ({} payload bytes)", cmd.len() - 1);
        self.polls = 0;

        let ack = match self.fault {
            Fault::CorruptAck => vec![0x00, 0x00, 0xFF, 0x00, 0xFF, 0xAA],
            _ => frame::ACK_FRAME.to_vec(),
        };
        self.pending.push_back(ack);

        let payload = match opcode {
            commands::GET_FIRMWARE_VERSION => SIMULATED_FIRMWARE.to_be_bytes().to_vec(),
            _ => Vec::new(),
        };
        let mut response = self.response_frame(opcode, &payload);
        if self.fault == Fault::CorruptHeader {
            response[2] = 0xFE;
        }
        if self.fault == Fault::TruncatedResponse {
            response.truncate(5);
        }
        self.pending.push_back(response);
    }

    /// Frame a response the way the chip does: header, response code
    /// (command code + 1), payload, data checksum, postamble.
    fn response_frame(&self, opcode: u8, payload: &[u8]) -> Vec<u8> {
        let len = (payload.len() + 2) as u8;
        let response_code = opcode.wrapping_add(1);
        let mut out = vec![
            frame::PREAMBLE,
            frame::STARTCODE1,
            frame::STARTCODE2,
            len,
            len.wrapping_neg(),
            frame::PN532_TO_HOST,
            response_code,
        ];
        out.extend_from_slice(payload);
        let sum = payload.iter().fold(
            frame::PN532_TO_HOST.wrapping_add(response_code),
            |acc, &b| acc.wrapping_add(b),
        );
        out.push(sum.wrapping_neg());
        out.push(frame::POSTAMBLE);
        out
    }
}

impl BusTransport for SimulatedPn532 {
    type Error = SimulatedBusError;

    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.next_is_status = false;
        match bytes.first() {
            Some(&frame::SPI_STATREAD) if bytes.len() == 1 => self.next_is_status = true,
            Some(&frame::SPI_DATAREAD) if bytes.len() == 1 => {}
            Some(&frame::SPI_DATAWRITE) => self.accept_frame(&bytes[1..]),
            _ => warn!("sim: unknown selector {bytes:02X?}"),
        }
        Ok(())
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), Self::Error> {
        if self.next_is_status {
            if buf.len() != 1 {
                return Err(SimulatedBusError("status read wants one byte"));
            }
            self.polls += 1;
            let ready = self.fault != Fault::NeverReady
                && !self.pending.is_empty()
                && self.polls > self.ready_after;
            buf[0] = if ready { frame::SPI_READY } else { 0x00 };
            return Ok(());
        }
        let data = self
            .pending
            .pop_front()
            .ok_or(SimulatedBusError("nothing queued to read"))?;
        if data.len() < buf.len() {
            return Err(SimulatedBusError("read past end of queued frame"));
        }
        buf.copy_from_slice(&data[..buf.len()]);
        Ok(())
    }
}
