//! Card identity returned by the selection handshake

use heapless::Vec;

/// Longest ISO14443A UID (triple cascade level)
pub const MAX_SERIAL_LEN: usize = 10;

/// Card type, the REQA answer (ATQA) read big-endian
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CardType(pub u16);

impl CardType {
    /// NTAG213 as reported by the YHY523U
    pub const NTAG213: CardType = CardType(0x4400);

    /// Parse the data of a REQA response
    ///
    /// Returns `None` unless exactly two bytes were answered.
    pub fn from_atqa(data: &[u8]) -> Option<Self> {
        match data {
            [hi, lo] => Some(CardType(u16::from_be_bytes([*hi, *lo]))),
            _ => None,
        }
    }

    /// Raw 16-bit value
    pub fn raw(self) -> u16 {
        self.0
    }
}

/// ISO14443A cascade level implied by the UID length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CascadeLevel {
    /// 4-byte UID
    Single,
    /// 7-byte UID
    Double,
    /// 10-byte UID
    Triple,
}

/// Card serial number (UID) as answered to anticollision
///
/// Treated as opaque bytes; the selection handshake sends it back verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Serial(Vec<u8, MAX_SERIAL_LEN>);

impl Serial {
    /// Copy a serial out of response data
    ///
    /// Returns `None` for an empty serial or one longer than
    /// [`MAX_SERIAL_LEN`].
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        if bytes.is_empty() {
            return None;
        }
        Vec::from_slice(bytes).ok().map(Serial)
    }

    /// Serial bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Number of serial bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a parsed serial
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Cascade level for a standard UID length
    ///
    /// Only single-level selection is performed by the driver.
    pub fn cascade_level(&self) -> Option<CascadeLevel> {
        match self.0.len() {
            4 => Some(CascadeLevel::Single),
            7 => Some(CascadeLevel::Double),
            10 => Some(CascadeLevel::Triple),
            _ => None,
        }
    }
}

impl AsRef<[u8]> for Serial {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// A card that completed REQA, anticollision and select
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SelectedCard {
    /// Card type from REQA
    pub card_type: CardType,
    /// Serial from anticollision
    pub serial: Serial,
}
