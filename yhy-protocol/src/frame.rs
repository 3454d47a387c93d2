//! Frame encoding and decoding for the YHY523U protocol.
//!
//! Frame format:
//! - HEADER (2 bytes): 0xAA 0xBB synchronization pattern
//! - LENGTH (2 bytes, LE): RESERVED + COMMAND + DATA + CHECKSUM, before stuffing
//! - RESERVED (2 bytes): 0xFF 0xFF when sent by the host
//! - COMMAND (2 bytes, LE): command code
//! - DATA (0-65530 bytes): command argument or response
//! - CHECKSUM (1 byte): XOR of the stuffed RESERVED, COMMAND and DATA bytes
//!
//! The length field and the checksum are never stuffed.

use alloc::vec::Vec;

use crate::status::STATUS_OK;

/// Frame synchronization pattern
pub const HEADER: [u8; 2] = [0xAA, 0xBB];

/// Byte that is always followed by [`STUFF_BYTE`] inside a frame body
pub const SENTINEL: u8 = 0xAA;

/// Byte inserted after every [`SENTINEL`] inside a frame body
pub const STUFF_BYTE: u8 = 0x00;

/// Reserved field sent by the host.
///
/// `0x0000` is what the vendor API reference documents, but only the YHY632
/// accepts it. `0xFFFF` works on every module.
pub const RESERVED: u16 = 0xFFFF;

/// RESERVED + COMMAND + CHECKSUM
pub const FRAME_OVERHEAD: usize = 2 + 2 + 1;

/// Maximum data size that still fits the 16-bit length field
pub const MAX_PAYLOAD_SIZE: usize = u16::MAX as usize - FRAME_OVERHEAD;

/// Errors that can occur during frame parsing or encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Payload exceeds maximum allowed size
    PayloadTooLarge,
    /// Checksum mismatch on a success-status frame
    InvalidChecksum,
    /// Declared length is too short to hold reserved, command and checksum
    InvalidLength,
    /// Frame is incomplete (need more bytes)
    Incomplete,
}

/// XOR checksum over a sequence of bytes
///
/// Stuffing only inserts `0x00` bytes, so the checksum of a stuffed body is
/// the same as the checksum of the unstuffed one.
pub fn checksum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0, |acc, &b| acc ^ b)
}

/// Encode a command and its argument into a ready-to-write frame
pub fn encode(command: u16, payload: &[u8]) -> Result<Vec<u8>, FrameError> {
    let mut out = Vec::new();
    encode_parts(RESERVED, command, payload, &mut out)?;
    Ok(out)
}

/// Decode the first complete frame found in `bytes`
///
/// Leading junk is skipped. Returns [`FrameError::Incomplete`] if the slice
/// ends before a frame does.
pub fn decode(bytes: &[u8]) -> Result<Frame, FrameError> {
    FrameParser::new()
        .feed_bytes(bytes)?
        .ok_or(FrameError::Incomplete)
}

fn encode_parts(
    reserved: u16,
    command: u16,
    payload: &[u8],
    out: &mut Vec<u8>,
) -> Result<usize, FrameError> {
    if payload.len() > MAX_PAYLOAD_SIZE {
        return Err(FrameError::PayloadTooLarge);
    }
    // Length must be taken from the unstuffed body
    let length = (FRAME_OVERHEAD + payload.len()) as u16;

    let start = out.len();
    out.reserve(HEADER.len() + 2 + length as usize + 4);
    out.extend_from_slice(&HEADER);
    out.extend_from_slice(&length.to_le_bytes());

    let mut sum = 0u8;
    stuff_into(&reserved.to_le_bytes(), &mut sum, out);
    stuff_into(&command.to_le_bytes(), &mut sum, out);
    stuff_into(payload, &mut sum, out);
    out.push(sum);

    Ok(out.len() - start)
}

/// Append `bytes` to `out` with stuffing applied, folding them into `sum`
fn stuff_into(bytes: &[u8], sum: &mut u8, out: &mut Vec<u8>) {
    for &byte in bytes {
        out.push(byte);
        *sum ^= byte;
        if byte == SENTINEL {
            out.push(STUFF_BYTE);
        }
    }
}

/// A parsed or constructed frame
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    /// Reserved field (0xFFFF when built by the host)
    pub reserved: u16,
    /// Command code
    pub command: u16,
    /// Command argument, or status byte followed by response data
    pub payload: Vec<u8>,
}

impl Frame {
    /// Create a new frame with the given command and payload
    pub fn new(command: u16, payload: &[u8]) -> Result<Self, FrameError> {
        if payload.len() > MAX_PAYLOAD_SIZE {
            return Err(FrameError::PayloadTooLarge);
        }

        Ok(Self {
            reserved: RESERVED,
            command,
            payload: payload.to_vec(),
        })
    }

    /// Create a frame with no payload
    pub fn empty(command: u16) -> Self {
        Self {
            reserved: RESERVED,
            command,
            payload: Vec::new(),
        }
    }

    /// Status byte of a response frame, if it has one
    pub fn status(&self) -> Option<u8> {
        self.payload.first().copied()
    }

    /// Response data following the status byte
    pub fn data(&self) -> &[u8] {
        self.payload.get(1..).unwrap_or(&[])
    }

    /// Append the encoded frame to `out`
    ///
    /// Returns the number of bytes written
    pub fn encode(&self, out: &mut Vec<u8>) -> Result<usize, FrameError> {
        encode_parts(self.reserved, self.command, &self.payload, out)
    }

    /// Encode this frame into a new Vec
    pub fn encode_to_vec(&self) -> Result<Vec<u8>, FrameError> {
        let mut out = Vec::new();
        self.encode(&mut out)?;
        Ok(out)
    }
}

/// State machine for parsing incoming frames
///
/// Bytes can be fed in chunks of any size; stuffing that straddles two
/// chunks is undone exactly like contiguous bytes.
#[derive(Debug, Clone)]
pub struct FrameParser {
    state: ParseState,
    buffer: Vec<u8>,
    length_low: u8,
    body_length: usize,
    checksum: u8,
    escape_pending: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Waiting for the first header byte
    WaitingForHeader,
    /// Got 0xAA, waiting for 0xBB
    WaitingForHeaderEnd,
    /// Waiting for the low length byte
    WaitingForLengthLow,
    /// Waiting for the high length byte
    WaitingForLengthHigh,
    /// Reading (and unstuffing) reserved, command and data bytes
    ///
    /// A sentinel followed by anything but the stuff byte is taken as is, so
    /// a corrupted escape fails the checksum instead of the framing.
    ReadingBody,
    /// Waiting for CHECKSUM
    WaitingForChecksum,
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameParser {
    /// Create a new frame parser
    pub fn new() -> Self {
        Self {
            state: ParseState::WaitingForHeader,
            buffer: Vec::new(),
            length_low: 0,
            body_length: 0,
            checksum: 0,
            escape_pending: false,
        }
    }

    /// Reset the parser state
    pub fn reset(&mut self) {
        self.state = ParseState::WaitingForHeader;
        self.buffer.clear();
        self.length_low = 0;
        self.body_length = 0;
        self.checksum = 0;
        self.escape_pending = false;
    }

    /// True while the parser is still hunting for a header
    pub fn is_idle(&self) -> bool {
        matches!(
            self.state,
            ParseState::WaitingForHeader | ParseState::WaitingForHeaderEnd
        )
    }

    /// Number of bytes that can be read without running past the end of the
    /// frame currently being parsed
    ///
    /// Every logical byte takes at least one wire byte, so this is a lower
    /// bound on what is left of the frame even when a stuff byte is missing.
    /// It is always at least 1.
    pub fn wanted(&self) -> usize {
        match self.state {
            ParseState::WaitingForHeader => HEADER.len(),
            ParseState::WaitingForHeaderEnd => 1,
            ParseState::WaitingForLengthLow => 2,
            ParseState::WaitingForLengthHigh => 1,
            ParseState::ReadingBody => {
                self.body_length - self.buffer.len() + 1
            }
            ParseState::WaitingForChecksum => 1,
        }
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Ok(Some(frame))` when a complete valid frame is parsed,
    /// `Ok(None)` when more bytes are needed, or `Err` on parse error.
    /// The parser is reset after every error.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Frame>, FrameError> {
        match self.state {
            ParseState::WaitingForHeader => {
                if byte == HEADER[0] {
                    self.state = ParseState::WaitingForHeaderEnd;
                }
                // Silently ignore junk while waiting
                Ok(None)
            }
            ParseState::WaitingForHeaderEnd => {
                if byte == HEADER[1] {
                    self.state = ParseState::WaitingForLengthLow;
                } else if byte != HEADER[0] {
                    self.state = ParseState::WaitingForHeader;
                }
                Ok(None)
            }
            ParseState::WaitingForLengthLow => {
                self.length_low = byte;
                self.state = ParseState::WaitingForLengthHigh;
                Ok(None)
            }
            ParseState::WaitingForLengthHigh => {
                let length = u16::from_le_bytes([self.length_low, byte]) as usize;
                if length < FRAME_OVERHEAD {
                    self.reset();
                    return Err(FrameError::InvalidLength);
                }
                // Checksum is counted in LENGTH but read separately
                self.body_length = length - 1;
                self.buffer.clear();
                self.buffer.reserve(self.body_length);
                self.checksum = 0;
                self.state = ParseState::ReadingBody;
                Ok(None)
            }
            ParseState::ReadingBody => {
                if core::mem::take(&mut self.escape_pending) {
                    if byte == STUFF_BYTE {
                        if self.buffer.len() == self.body_length {
                            self.state = ParseState::WaitingForChecksum;
                        }
                        return Ok(None);
                    }
                    // Unstuffed sentinel: keep the byte so the checksum catches it
                    if self.buffer.len() == self.body_length {
                        return self.finish(byte);
                    }
                }

                self.checksum ^= byte;
                self.buffer.push(byte);
                if byte == SENTINEL {
                    self.escape_pending = true;
                } else if self.buffer.len() == self.body_length {
                    self.state = ParseState::WaitingForChecksum;
                }
                Ok(None)
            }
            ParseState::WaitingForChecksum => self.finish(byte),
        }
    }

    /// Check the received checksum against the body and hand out the frame
    fn finish(&mut self, received: u8) -> Result<Option<Frame>, FrameError> {
        let body = core::mem::take(&mut self.buffer);
        let expected = self.checksum;
        self.reset();

        let frame = Frame {
            reserved: u16::from_le_bytes([body[0], body[1]]),
            command: u16::from_le_bytes([body[2], body[3]]),
            payload: body[4..].to_vec(),
        };

        // The reader sends unreliable checksums with error statuses
        let verify = frame.status().map_or(true, |status| status == STATUS_OK);
        if verify && received != expected {
            return Err(FrameError::InvalidChecksum);
        }

        Ok(Some(frame))
    }

    /// Feed multiple bytes to the parser
    ///
    /// Returns the first complete frame found, if any.
    /// Remaining bytes after a complete frame are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<Option<Frame>, FrameError> {
        for &byte in bytes {
            if let Some(frame) = self.feed(byte)? {
                return Ok(Some(frame));
            }
        }
        Ok(None)
    }
}
