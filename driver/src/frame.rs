//! PN532 wire format: constants, frame construction, header patterns.
//!
//! Commands travel in a checksummed, delimited frame:
//!
//! ```text
//! [dir][0x00][0x00][0xFF][LEN][LEN_CKS][0xD4][cmd...][CKS][0x00]
//! ```
//!
//! `dir` is an SPI selector byte consumed by the bus itself, not part of
//! the peripheral's framing. `LEN` counts the direction byte plus the
//! command bytes; both checksums are wrapping negations so the covered
//! bytes sum to zero mod 256. Compatibility depends on this exact layout.

use crate::error::FrameTooLarge;

/// Command sequence start, byte 1/3.
pub const PREAMBLE: u8 = 0x00;
/// Command sequence start, byte 2/3.
pub const STARTCODE1: u8 = 0x00;
/// Command sequence start, byte 3/3.
pub const STARTCODE2: u8 = 0xFF;
/// End of data.
pub const POSTAMBLE: u8 = 0x00;

/// Frame direction: host to PN532.
pub const HOST_TO_PN532: u8 = 0xD4;
/// Frame direction: PN532 to host.
pub const PN532_TO_HOST: u8 = 0xD5;

/// Wakes the chip out of power-down.
pub const WAKEUP: u8 = 0x55;

/// SPI selector: query the status byte.
pub const SPI_STATREAD: u8 = 0x02;
/// SPI selector: host is about to write a frame.
pub const SPI_DATAWRITE: u8 = 0x01;
/// SPI selector: host is about to read a frame.
pub const SPI_DATAREAD: u8 = 0x03;
/// Status byte value once the chip has a frame ready.
pub const SPI_READY: u8 = 0x01;

/// Fixed acknowledgement frame echoed after every accepted command.
pub const ACK_FRAME: [u8; 6] = [0x00, 0x00, 0xFF, 0x00, 0xFF, 0x00];

/// Most command bytes (opcode + payload) one frame can carry: `LEN` is a
/// single byte and also counts the direction byte.
pub const MAX_COMMAND_LEN: usize = 254;

/// Longest possible frame: selector, delimiters and checksums add nine
/// bytes around the command bytes.
pub const MAX_FRAME_LEN: usize = MAX_COMMAND_LEN + 9;

/// One serialized frame, bounded by [`MAX_FRAME_LEN`].
pub type FrameBuf = heapless::Vec<u8, MAX_FRAME_LEN>;

/// Serialize a command into a checksummed wire frame, prefixed with the
/// data-write SPI selector.
///
/// Construction is deterministic and all-or-nothing: an oversized command
/// fails with [`FrameTooLarge`] before anything is emitted. An empty
/// payload is valid (opcode-only commands).
pub fn build_frame(opcode: u8, payload: &[u8]) -> Result<FrameBuf, FrameTooLarge> {
    let cmd_len = 1 + payload.len();
    if cmd_len > MAX_COMMAND_LEN {
        return Err(FrameTooLarge(cmd_len));
    }
    let len = (cmd_len + 1) as u8; // +1 for the direction byte

    let mut buf = [0u8; MAX_FRAME_LEN];
    buf[0] = SPI_DATAWRITE;
    buf[1] = PREAMBLE;
    buf[2] = STARTCODE1;
    buf[3] = STARTCODE2;
    buf[4] = len;
    buf[5] = len.wrapping_neg();
    buf[6] = HOST_TO_PN532;
    buf[7] = opcode;
    let mut sum = HOST_TO_PN532.wrapping_add(opcode);
    for (i, &b) in payload.iter().enumerate() {
        buf[8 + i] = b;
        sum = sum.wrapping_add(b);
    }
    buf[8 + payload.len()] = sum.wrapping_neg();
    buf[9 + payload.len()] = POSTAMBLE;

    FrameBuf::from_slice(&buf[..9 + cmd_len]).map_err(|_| FrameTooLarge(cmd_len))
}

/// Expected leading bytes of a response frame whose `LEN` byte is `len`
/// (direction byte + response code + payload).
///
/// Used to reject corrupted or mismatched reads before trusting any
/// offset into the buffer.
pub fn response_header(len: u8) -> [u8; 6] {
    [
        PREAMBLE,
        STARTCODE1,
        STARTCODE2,
        len,
        len.wrapping_neg(),
        PN532_TO_HOST,
    ]
}
