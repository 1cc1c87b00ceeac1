//! End-to-end exchange tests against a scripted fake bus.
//!
//! The fake reports ready after a configurable number of status polls and
//! serves queued frames for each data-read selector; the recording delay
//! makes the timeout window exactly observable without real sleeps.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use tagstation_driver::frame::{self, build_frame};
use tagstation_driver::pn532::commands;
use tagstation_driver::{
    BusTransport, Delay, FirmwareVersion, Pn532, PollStrategy, ProtocolError,
};

const FIRMWARE_RESPONSE: [u8; 13] = [
    0x00, 0x00, 0xFF, 0x06, 0xFA, 0xD5, 0x03, 0x32, 0x01, 0x06, 0x07, 0xE8, 0x00,
];

#[derive(Debug, PartialEq, Eq)]
struct BusError(&'static str);

struct FakeBus {
    /// Status polls answered "not ready" before reporting ready.
    ready_after: u32,
    polls: u32,
    reads: VecDeque<Vec<u8>>,
    written: Vec<Vec<u8>>,
    next_is_status: bool,
}

impl FakeBus {
    fn new(ready_after: u32, reads: &[&[u8]]) -> Self {
        Self {
            ready_after,
            polls: 0,
            reads: reads.iter().map(|r| r.to_vec()).collect(),
            written: Vec::new(),
            next_is_status: false,
        }
    }
}

impl BusTransport for FakeBus {
    type Error = BusError;

    fn write(&mut self, bytes: &[u8]) -> Result<(), BusError> {
        self.next_is_status = bytes == [frame::SPI_STATREAD];
        self.written.push(bytes.to_vec());
        Ok(())
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), BusError> {
        if self.next_is_status {
            self.polls += 1;
            buf[0] = if self.polls > self.ready_after {
                frame::SPI_READY
            } else {
                0x00
            };
            return Ok(());
        }
        let data = self.reads.pop_front().ok_or(BusError("no queued read"))?;
        if data.len() < buf.len() {
            return Err(BusError("short read"));
        }
        buf.copy_from_slice(&data[..buf.len()]);
        Ok(())
    }
}

/// Records the total time the driver asked to pause.
#[derive(Clone, Default)]
struct RecordingDelay(Rc<RefCell<Duration>>);

impl RecordingDelay {
    fn slept(&self) -> Duration {
        *self.0.borrow()
    }
}

impl Delay for RecordingDelay {
    fn delay(&mut self, interval: Duration) {
        *self.0.borrow_mut() += interval;
    }
}

fn driver(bus: FakeBus) -> (Pn532<FakeBus, RecordingDelay>, RecordingDelay) {
    let delay = RecordingDelay::default();
    let pn532 = Pn532::with_parts(bus, delay.clone(), PollStrategy::default());
    (pn532, delay)
}

#[test]
fn firmware_version_round_trip() {
    let bus = FakeBus::new(2, &[&frame::ACK_FRAME, &FIRMWARE_RESPONSE]);
    let (mut pn532, _) = driver(bus);

    let version = pn532.firmware_version(Duration::from_millis(100)).unwrap();
    assert_eq!(
        version,
        FirmwareVersion {
            ic: 0x32,
            ver: 0x01,
            rev: 0x06,
            support: 0x07,
        }
    );

    // First bus write is the fully framed query, selector byte included.
    let bus = pn532.release();
    assert_eq!(
        bus.written[0],
        vec![0x01, 0x00, 0x00, 0xFF, 0x02, 0xFE, 0xD4, 0x02, 0x2A, 0x00]
    );
}

#[test]
fn timeout_fires_inside_the_documented_window() {
    let interval = PollStrategy::default().interval;
    let timeout = Duration::from_millis(25);
    let bus = FakeBus::new(u32::MAX, &[]);
    let (mut pn532, delay) = driver(bus);

    let err = pn532
        .send_command_check_ack(commands::GET_FIRMWARE_VERSION, &[], timeout)
        .unwrap_err();
    assert_eq!(err, ProtocolError::Timeout);

    // Total wait lands in [timeout, timeout + interval), never earlier.
    assert!(delay.slept() >= timeout);
    assert!(delay.slept() < timeout + interval);
}

#[test]
fn zero_timeout_polls_until_ready() {
    let bus = FakeBus::new(17, &[&frame::ACK_FRAME, &FIRMWARE_RESPONSE]);
    let (mut pn532, _) = driver(bus);

    let version = pn532.firmware_version(Duration::ZERO).unwrap();
    assert_eq!(version.ic, 0x32);

    let bus = pn532.release();
    assert!(bus.polls > 17);
}

#[test]
fn any_wrong_ack_is_rejected() {
    let bad_acks: &[&[u8]] = &[
        &[0x00, 0x00, 0xFF, 0x00, 0xFF, 0x01],
        &[0x01, 0x00, 0xFF, 0x00, 0xFF, 0x00],
        &[0x00, 0x00, 0xFF, 0xFF, 0x00, 0x00],
        &[0xFF; 6],
        &[0x00; 6],
    ];
    for &bad in bad_acks {
        let bus = FakeBus::new(0, &[bad]);
        let (mut pn532, _) = driver(bus);
        let err = pn532
            .send_command_check_ack(commands::GET_FIRMWARE_VERSION, &[], Duration::from_millis(50))
            .unwrap_err();
        assert_eq!(err, ProtocolError::NoAck, "ack {bad:02X?}");
    }
}

#[test]
fn truncated_response_surfaces_transport_error() {
    // Five bytes queued where six are requested for the ACK read.
    let bus = FakeBus::new(0, &[&frame::ACK_FRAME[..5]]);
    let (mut pn532, _) = driver(bus);

    let err = pn532
        .send_command_check_ack(commands::GET_FIRMWARE_VERSION, &[], Duration::from_millis(50))
        .unwrap_err();
    assert_eq!(err, ProtocolError::Transport(BusError("short read")));
}

#[test]
fn truncated_firmware_response_never_decodes() {
    let bus = FakeBus::new(0, &[&frame::ACK_FRAME, &FIRMWARE_RESPONSE[..12]]);
    let (mut pn532, _) = driver(bus);

    let err = pn532
        .firmware_version(Duration::from_millis(50))
        .unwrap_err();
    assert_eq!(err, ProtocolError::Transport(BusError("short read")));
}

#[test]
fn corrupted_response_header_is_rejected() {
    let mut corrupted = FIRMWARE_RESPONSE;
    corrupted[3] = 0x07;
    let bus = FakeBus::new(0, &[&frame::ACK_FRAME, &corrupted]);
    let (mut pn532, _) = driver(bus);

    let err = pn532
        .firmware_version(Duration::from_millis(50))
        .unwrap_err();
    assert_eq!(err, ProtocolError::UnexpectedResponse);
}

#[test]
fn process_validates_the_response_code() {
    let mut response = FIRMWARE_RESPONSE;
    response[6] = 0x05; // valid header, wrong response code
    let bus = FakeBus::new(0, &[&frame::ACK_FRAME, &response]);
    let (mut pn532, _) = driver(bus);

    let mut buf = [0u8; FIRMWARE_RESPONSE.len()];
    let err = pn532
        .process(
            commands::GET_FIRMWARE_VERSION,
            &[],
            &mut buf,
            Duration::from_millis(50),
        )
        .unwrap_err();
    assert_eq!(err, ProtocolError::UnexpectedResponse);
}

#[test]
fn oversized_command_fails_before_any_bus_traffic() {
    let payload = [0u8; frame::MAX_COMMAND_LEN];
    let bus = FakeBus::new(0, &[]);
    let (mut pn532, delay) = driver(bus);

    let err = pn532
        .send_command_check_ack(commands::IN_DATA_EXCHANGE, &payload, Duration::from_millis(50))
        .unwrap_err();
    assert!(matches!(err, ProtocolError::FrameTooLarge(_)));
    assert_eq!(delay.slept(), Duration::ZERO);

    let bus = pn532.release();
    assert!(bus.written.is_empty());
}

#[test]
fn built_frames_checksum_to_zero() {
    let frame = build_frame(commands::SAM_CONFIGURATION, &[0x01, 0x14, 0x01]).unwrap();
    let sum = frame[6..frame.len() - 1]
        .iter()
        .fold(0u8, |acc, &b| acc.wrapping_add(b));
    assert_eq!(sum, 0);
    assert_eq!(frame[4].wrapping_add(frame[5]), 0);
}
