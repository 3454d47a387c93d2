//! Status codes reported by the reader
//!
//! Every response starts with a status byte. Zero means success; anything
//! else is one of the codes below.

/// Status byte for a successful command
pub const STATUS_OK: u8 = 0x00;

// Wire format values
const ERR_BAUD_RATE: u8 = 1;
const ERR_PORT_OR_DISCONNECT: u8 = 2;
const ERR_GENERAL: u8 = 10;
const ERR_UNDEFINED: u8 = 11;
const ERR_COMMAND_PARAMETER: u8 = 12;
const ERR_NO_CARD: u8 = 13;
const ERR_REQUEST_FAILURE: u8 = 20;
const ERR_RESET_FAILURE: u8 = 21;
const ERR_AUTHENTICATE_FAILURE: u8 = 22;
const ERR_READ_BLOCK_FAILURE: u8 = 23;
const ERR_WRITE_BLOCK_FAILURE: u8 = 24;
const ERR_READ_ADDRESS_FAILURE: u8 = 25;
const ERR_WRITE_ADDRESS_FAILURE: u8 = 26;

/// Non-zero status reported by the reader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceStatus {
    /// Unsupported baud rate
    BaudRate,
    /// Port error or reader disconnected
    PortOrDisconnect,
    /// General failure
    General,
    /// Command not defined by the firmware
    UndefinedCommand,
    /// Bad command parameter
    CommandParameter,
    /// No card in the field
    NoCard,
    /// Card request failed
    RequestFailure,
    /// Card reset failed
    ResetFailure,
    /// Authentication failed
    AuthenticateFailure,
    /// Reading a block failed
    ReadBlockFailure,
    /// Writing a block failed
    WriteBlockFailure,
    /// Reading an address failed
    ReadAddressFailure,
    /// Writing an address failed
    WriteAddressFailure,
    /// Code not listed in the vendor table
    Unknown(u8),
}

impl DeviceStatus {
    /// Parse a status byte
    ///
    /// Returns `None` for [`STATUS_OK`].
    pub fn from_byte(byte: u8) -> Option<Self> {
        let status = match byte {
            STATUS_OK => return None,
            ERR_BAUD_RATE => DeviceStatus::BaudRate,
            ERR_PORT_OR_DISCONNECT => DeviceStatus::PortOrDisconnect,
            ERR_GENERAL => DeviceStatus::General,
            ERR_UNDEFINED => DeviceStatus::UndefinedCommand,
            ERR_COMMAND_PARAMETER => DeviceStatus::CommandParameter,
            ERR_NO_CARD => DeviceStatus::NoCard,
            ERR_REQUEST_FAILURE => DeviceStatus::RequestFailure,
            ERR_RESET_FAILURE => DeviceStatus::ResetFailure,
            ERR_AUTHENTICATE_FAILURE => DeviceStatus::AuthenticateFailure,
            ERR_READ_BLOCK_FAILURE => DeviceStatus::ReadBlockFailure,
            ERR_WRITE_BLOCK_FAILURE => DeviceStatus::WriteBlockFailure,
            ERR_READ_ADDRESS_FAILURE => DeviceStatus::ReadAddressFailure,
            ERR_WRITE_ADDRESS_FAILURE => DeviceStatus::WriteAddressFailure,
            other => DeviceStatus::Unknown(other),
        };
        Some(status)
    }

    /// Convert to wire format byte
    pub fn to_byte(self) -> u8 {
        match self {
            DeviceStatus::BaudRate => ERR_BAUD_RATE,
            DeviceStatus::PortOrDisconnect => ERR_PORT_OR_DISCONNECT,
            DeviceStatus::General => ERR_GENERAL,
            DeviceStatus::UndefinedCommand => ERR_UNDEFINED,
            DeviceStatus::CommandParameter => ERR_COMMAND_PARAMETER,
            DeviceStatus::NoCard => ERR_NO_CARD,
            DeviceStatus::RequestFailure => ERR_REQUEST_FAILURE,
            DeviceStatus::ResetFailure => ERR_RESET_FAILURE,
            DeviceStatus::AuthenticateFailure => ERR_AUTHENTICATE_FAILURE,
            DeviceStatus::ReadBlockFailure => ERR_READ_BLOCK_FAILURE,
            DeviceStatus::WriteBlockFailure => ERR_WRITE_BLOCK_FAILURE,
            DeviceStatus::ReadAddressFailure => ERR_READ_ADDRESS_FAILURE,
            DeviceStatus::WriteAddressFailure => ERR_WRITE_ADDRESS_FAILURE,
            DeviceStatus::Unknown(code) => code,
        }
    }

    /// Turn a status byte into a result
    pub fn check(byte: u8) -> Result<(), Self> {
        match Self::from_byte(byte) {
            None => Ok(()),
            Some(status) => Err(status),
        }
    }

    /// Returns true for failures that concern the card rather than the reader
    pub fn is_card_error(&self) -> bool {
        matches!(
            self,
            DeviceStatus::NoCard
                | DeviceStatus::RequestFailure
                | DeviceStatus::ResetFailure
                | DeviceStatus::AuthenticateFailure
                | DeviceStatus::ReadBlockFailure
                | DeviceStatus::WriteBlockFailure
                | DeviceStatus::ReadAddressFailure
                | DeviceStatus::WriteAddressFailure
        )
    }
}
