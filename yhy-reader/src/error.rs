//! Errors returned by a reader session

use core::fmt;

use yhy_protocol::{DeviceStatus, FrameError};

/// Why a response frame could not be assembled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FramingError {
    /// Channel closed before a complete frame arrived
    ChannelClosed,
    /// Declared length too short for a frame
    InvalidLength,
}

/// Errors from reader operations
///
/// `E` is the error type of the underlying channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReaderError<E> {
    /// Channel read/write failed
    Io(E),
    /// Payload too large to frame
    Encoding,
    /// Response frame could not be assembled
    Framing(FramingError),
    /// Success response failed checksum verification
    Checksum,
    /// Response echoed a different command than the one sent
    ProtocolMismatch { sent: u16, received: u16 },
    /// Response carried no status byte
    MissingStatus { command: u16 },
    /// Response data has an unexpected shape
    MalformedResponse { command: u16 },
    /// Reader reported a non-zero status
    Device(DeviceStatus),
    /// REQA was not answered successfully
    NoCard(DeviceStatus),
    /// Anticollision was not answered successfully
    Anticollision(DeviceStatus),
}

impl<E> From<FrameError> for ReaderError<E> {
    fn from(e: FrameError) -> Self {
        match e {
            FrameError::PayloadTooLarge => ReaderError::Encoding,
            FrameError::InvalidChecksum => ReaderError::Checksum,
            FrameError::InvalidLength => ReaderError::Framing(FramingError::InvalidLength),
            FrameError::Incomplete => ReaderError::Framing(FramingError::ChannelClosed),
        }
    }
}

impl<E> ReaderError<E> {
    /// Device status carried by this error, if any
    pub fn device_status(&self) -> Option<DeviceStatus> {
        match self {
            ReaderError::Device(status)
            | ReaderError::NoCard(status)
            | ReaderError::Anticollision(status) => Some(*status),
            _ => None,
        }
    }
}

impl<E: fmt::Debug> fmt::Display for ReaderError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReaderError::Io(e) => write!(f, "channel error: {:?}", e),
            ReaderError::Encoding => f.write_str("payload too large to frame"),
            ReaderError::Framing(FramingError::ChannelClosed) => {
                f.write_str("channel closed before a complete frame")
            }
            ReaderError::Framing(FramingError::InvalidLength) => {
                f.write_str("frame length too short")
            }
            ReaderError::Checksum => f.write_str("bad checksum"),
            ReaderError::ProtocolMismatch { sent, received } => write!(
                f,
                "answered command {:#06x} to request {:#06x}",
                received, sent
            ),
            ReaderError::MissingStatus { command } => {
                write!(f, "response to {:#06x} has no status byte", command)
            }
            ReaderError::MalformedResponse { command } => {
                write!(f, "malformed response to {:#06x}", command)
            }
            ReaderError::Device(status) => write!(f, "reader error: {:?}", status),
            ReaderError::NoCard(status) => write!(f, "no card found: {:?}", status),
            ReaderError::Anticollision(status) => {
                write!(f, "error in anticollision: {:?}", status)
            }
        }
    }
}

#[cfg(feature = "std")]
impl<E: fmt::Debug> std::error::Error for ReaderError<E> {}
