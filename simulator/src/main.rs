//! TagStation PC Simulator
//!
//! Drive the PN532 frame transport against a behavioral peripheral
//! emulation — no hardware required. Runs the firmware-version exchange,
//! then walks the failure taxonomy under injected faults.
//!
//! # Usage
//! ```bash
//! cargo run -p tagstation-simulator
//!
//! # Frame-level tracing
//! RUST_LOG=trace cargo run -p tagstation-simulator
//! ```

mod peripheral;

use std::time::Duration;

use log::{info, warn};
use tagstation_driver::{Pn532, PollStrategy, ProtocolError, ThreadDelay};

use crate::peripheral::{Fault, SimulatedPn532};

/// Readiness appears after this many status polls, like a chip that needs
/// a few control-loop ticks to process a command.
const READY_AFTER_POLLS: u32 = 3;

const EXCHANGE_TIMEOUT: Duration = Duration::from_millis(100);

fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("TagStation Simulator - PN532 frame transport");

    // Healthy exchange: the firmware-version query end to end.
    let bus = SimulatedPn532::new(READY_AFTER_POLLS);
    let mut pn532 = Pn532::new(bus);
    let version = pn532.firmware_version(EXCHANGE_TIMEOUT)?;
    info!(
        "firmware: IC {:#04X}, v{}.{}, support {:#04X}",
        version.ic, version.ver, version.rev, version.support
    );

    // Fault walk: each injected fault must map to its own error, with no
    // partially decoded value leaking out.
    run_fault(Fault::NeverReady, "chip never ready");
    run_fault(Fault::CorruptAck, "garbled acknowledgement");
    run_fault(Fault::TruncatedResponse, "truncated response");
    run_fault(Fault::CorruptHeader, "corrupted response header");

    info!("simulation complete");
    Ok(())
}

fn run_fault(fault: Fault, label: &str) {
    let bus = SimulatedPn532::with_fault(READY_AFTER_POLLS, fault);
    let mut pn532 = Pn532::with_parts(bus, ThreadDelay, PollStrategy::default());
    match pn532.firmware_version(EXCHANGE_TIMEOUT) {
        Ok(version) => warn!("{label}: unexpectedly decoded {version:?}"),
        Err(ProtocolError::Timeout) => info!("{label} -> Timeout"),
        Err(ProtocolError::NoAck) => info!("{label} -> NoAck"),
        Err(ProtocolError::Transport(e)) => info!("{label} -> Transport({e:?})"),
        Err(ProtocolError::UnexpectedResponse) => info!("{label} -> UnexpectedResponse"),
        Err(e) => warn!("{label}: unexpected failure {e}"),
    }
}
