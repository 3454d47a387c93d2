//! Command codes understood by the YHY523U
//!
//! Command codes are divided into two namespaces:
//! - Reader management (`0x01xx`): baud rate, node number, firmware, beep,
//!   LED, antenna power
//! - Card protocol: ISO14443A / NTAG21x commands relayed to the card
//!
//! Values are taken verbatim from the vendor command table. Only REQA,
//! ANTICOLLISION and SELECT are interpreted by the driver; everything else is
//! passed through as an opaque code.

// Reader management
pub const SET_BAUDRATE: u16 = 0x0101;
pub const SET_NODE_NUMBER: u16 = 0x0102;
pub const READ_NODE_NUMBER: u16 = 0x0103;
pub const READ_FW_VERSION: u16 = 0x0104;
pub const BEEP: u16 = 0x0106;
pub const LED: u16 = 0x0107;
/// Unused according to the vendor API reference
pub const RFU: u16 = 0x0108;
/// Same code as [`RFU`]
pub const WORKING_STATUS: u16 = 0x0108;
pub const ANTENNA_POWER: u16 = 0x010C;

// NTAG21x card protocol
pub const NTAG_GET_VERSION: u16 = 0x60;
pub const NTAG_REQA: u16 = 0x26;
pub const NTAG_WUPA: u16 = 0x52;
pub const NTAG_ANTICOLLISION_CL1: u16 = 0x9320;
pub const NTAG_SELECT_CL1: u16 = 0x9370;
pub const NTAG_ANTICOLLISION_CL2: u16 = 0x9520;
pub const NTAG_SELECT_CL2: u16 = 0x9570;
/// Anticollision code used by the selection handshake (cascade level 2 value)
pub const NTAG_ANTICOLLISION: u16 = 0x9520;
/// Select code used by the selection handshake (cascade level 2 value)
pub const NTAG_SELECT: u16 = 0x9570;
pub const NTAG_READ: u16 = 0x30;
pub const NTAG_FAST_READ: u16 = 0x3A;
pub const NTAG_WRITE: u16 = 0xA2;
pub const NTAG_COMPATIBILITY_WRITE: u16 = 0xA0;
/// Argument 0x02 addresses the NFC counter
pub const NTAG_READ_CNT: u16 = 0x39;
pub const NTAG_PWD_AUTH: u16 = 0x1B;
pub const NTAG_READ_SIG: u16 = 0x3C;

/// Which part of the command table a code belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Namespace {
    /// Handled by the reader module itself
    Reader,
    /// Relayed to the card in the field
    Card,
}

impl Namespace {
    /// Classify a command code
    pub fn of(command: u16) -> Self {
        if command >> 8 == 0x01 {
            Namespace::Reader
        } else {
            Namespace::Card
        }
    }
}

/// Human readable name of a known command code
pub fn name(command: u16) -> Option<&'static str> {
    let name = match command {
        SET_BAUDRATE => "SET_BAUDRATE",
        SET_NODE_NUMBER => "SET_NODE_NUMBER",
        READ_NODE_NUMBER => "READ_NODE_NUMBER",
        READ_FW_VERSION => "READ_FW_VERSION",
        BEEP => "BEEP",
        LED => "LED",
        WORKING_STATUS => "WORKING_STATUS",
        ANTENNA_POWER => "ANTENNA_POWER",
        NTAG_GET_VERSION => "GET_VERSION",
        NTAG_REQA => "REQA",
        NTAG_WUPA => "WUPA",
        NTAG_ANTICOLLISION_CL1 => "ANTICOLLISION_CL1",
        NTAG_SELECT_CL1 => "SELECT_CL1",
        NTAG_ANTICOLLISION_CL2 => "ANTICOLLISION_CL2",
        NTAG_SELECT_CL2 => "SELECT_CL2",
        NTAG_READ => "READ",
        NTAG_FAST_READ => "FAST_READ",
        NTAG_WRITE => "WRITE",
        NTAG_COMPATIBILITY_WRITE => "COMPATIBILITY_WRITE",
        NTAG_READ_CNT => "READ_CNT",
        NTAG_PWD_AUTH => "PWD_AUTH",
        NTAG_READ_SIG => "READ_SIG",
        _ => return None,
    };
    Some(name)
}
