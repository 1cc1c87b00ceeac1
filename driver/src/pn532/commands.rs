//! PN532 command codes (NXP user manual UM0701-02).
//!
//! Only [`GET_FIRMWARE_VERSION`] is wired to a typed operation; the rest
//! are carried for callers driving their own exchanges through
//! [`Pn532::process`](super::Pn532::process).

pub const DIAGNOSE: u8 = 0x00;
pub const GET_FIRMWARE_VERSION: u8 = 0x02;
pub const GET_GENERAL_STATUS: u8 = 0x04;
pub const READ_REGISTER: u8 = 0x06;
pub const WRITE_REGISTER: u8 = 0x08;
pub const READ_GPIO: u8 = 0x0C;
pub const WRITE_GPIO: u8 = 0x0E;
pub const SET_SERIAL_BAUD_RATE: u8 = 0x10;
pub const SET_PARAMETERS: u8 = 0x12;
pub const SAM_CONFIGURATION: u8 = 0x14;
pub const POWER_DOWN: u8 = 0x16;
pub const RF_CONFIGURATION: u8 = 0x32;
pub const RF_REGULATION_TEST: u8 = 0x58;
pub const IN_JUMP_FOR_DEP: u8 = 0x56;
pub const IN_JUMP_FOR_PSL: u8 = 0x46;
pub const IN_LIST_PASSIVE_TARGET: u8 = 0x4A;
pub const IN_ATR: u8 = 0x50;
pub const IN_PSL: u8 = 0x4E;
pub const IN_DATA_EXCHANGE: u8 = 0x40;
pub const IN_COMMUNICATE_THRU: u8 = 0x42;
pub const IN_DESELECT: u8 = 0x44;
pub const IN_RELEASE: u8 = 0x52;
pub const IN_SELECT: u8 = 0x54;
pub const IN_AUTO_POLL: u8 = 0x60;
pub const TG_INIT_AS_TARGET: u8 = 0x8C;
pub const TG_SET_GENERAL_BYTES: u8 = 0x92;
pub const TG_GET_DATA: u8 = 0x86;
pub const TG_SET_DATA: u8 = 0x8E;
pub const TG_SET_METADATA: u8 = 0x94;
pub const TG_GET_INITIATOR_COMMAND: u8 = 0x88;
pub const TG_RESPONSE_TO_INITIATOR: u8 = 0x90;
pub const TG_GET_TARGET_STATUS: u8 = 0x8A;

/// Response code for `IN_DATA_EXCHANGE`.
pub const RESPONSE_IN_DATA_EXCHANGE: u8 = 0x41;
/// Response code for `IN_LIST_PASSIVE_TARGET`.
pub const RESPONSE_IN_LIST_PASSIVE_TARGET: u8 = 0x4B;

/// ISO 14443A baud/modulation selector for `IN_LIST_PASSIVE_TARGET`.
pub const MIFARE_ISO14443A: u8 = 0x00;

/// MIFARE card commands, tunneled through `IN_DATA_EXCHANGE`.
pub mod mifare {
    pub const AUTH_A: u8 = 0x60;
    pub const AUTH_B: u8 = 0x61;
    pub const READ: u8 = 0x30;
    pub const WRITE: u8 = 0xA0;
    pub const TRANSFER: u8 = 0xB0;
    pub const DECREMENT: u8 = 0xC0;
    pub const INCREMENT: u8 = 0xC1;
    pub const STORE: u8 = 0xC2;
    /// Write (MIFARE Ultralight).
    pub const ULTRALIGHT_WRITE: u8 = 0xA2;
}
