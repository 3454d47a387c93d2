//! Reader session
//!
//! A [`Session`] owns the channel to one reader for its whole lifetime and
//! runs strictly one request/response exchange at a time. Apart from the
//! outcome of the last card selection, no state is kept between exchanges;
//! a failed exchange drops whatever part of the response was read and the
//! next one starts from a fresh parser.
//!
//! There is no timeout at this layer. If the reader never answers, a receive
//! blocks for as long as the channel's own read does.

use alloc::vec::Vec;

use yhy_hal::{UartRx, UartTx};
use yhy_protocol::{command, encode, DeviceStatus, Frame, FrameParser};

use crate::card::{CardType, SelectedCard, Serial};
use crate::config::{Led, ReaderConfig};
use crate::error::{FramingError, ReaderError};
use crate::select::{SelectEvent, SelectState};

/// Buffer size for channel reads
const RX_BUF_SIZE: usize = 64;

/// Decoded answer to an exchange
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Response {
    /// Status byte (0 = success)
    pub status: u8,
    /// Data following the status byte
    pub data: Vec<u8>,
}

impl Response {
    /// Check if the reader reported success
    pub fn is_ok(&self) -> bool {
        self.status == yhy_protocol::status::STATUS_OK
    }

    /// Non-zero status as an error
    pub fn check(&self) -> Result<(), DeviceStatus> {
        DeviceStatus::check(self.status)
    }
}

/// Command session with one reader
pub struct Session<U> {
    uart: U,
    selection: SelectState,
}

impl<U> Session<U> {
    /// Create a session over an already opened channel
    pub fn new(uart: U) -> Self {
        Self {
            uart,
            selection: SelectState::Idle,
        }
    }

    /// Borrow the channel
    pub fn uart(&self) -> &U {
        &self.uart
    }

    /// Mutably borrow the channel
    ///
    /// Bytes read or written through this reference bypass the framing.
    pub fn uart_mut(&mut self) -> &mut U {
        &mut self.uart
    }

    /// Outcome of the last [`select_card`](Session::select_card) call
    ///
    /// `Failed(step)` names the handshake step that was aborted. `Idle` until
    /// a selection has been attempted.
    pub fn select_state(&self) -> SelectState {
        self.selection
    }

    /// Close the session and return the channel
    pub fn into_inner(self) -> U {
        self.uart
    }
}

impl<U, E> Session<U>
where
    U: UartTx<Error = E> + UartRx<Error = E>,
{
    /// Encode a command and write it to the channel
    ///
    /// Does not wait for an answer.
    pub fn send_command(&mut self, cmd: u16, payload: &[u8]) -> Result<(), ReaderError<E>> {
        let frame = encode(cmd, payload)?;
        trace!("TX: cmd {:#x}, {} bytes", cmd, frame.len());

        self.uart.write_blocking(&frame).map_err(ReaderError::Io)?;
        self.uart.flush().map_err(ReaderError::Io)
    }

    /// Block until a complete frame has been read from the channel
    ///
    /// Leading junk is discarded. Reads never go past the end of the frame,
    /// so bytes after it stay in the channel.
    pub fn receive_response(&mut self) -> Result<Frame, ReaderError<E>> {
        let mut parser = FrameParser::new();
        let mut buf = [0u8; RX_BUF_SIZE];

        loop {
            let want = parser.wanted().min(buf.len());
            let n = self
                .uart
                .read_blocking(&mut buf[..want])
                .map_err(ReaderError::Io)?;
            if n == 0 {
                warn!("Channel closed while waiting for a frame");
                return Err(ReaderError::Framing(FramingError::ChannelClosed));
            }

            if let Some(frame) = parser.feed_bytes(&buf[..n])? {
                trace!(
                    "RX: cmd {:#x}, {} payload bytes",
                    frame.command,
                    frame.payload.len()
                );
                return Ok(frame);
            }
        }
    }

    /// Send a command and wait for its answer
    ///
    /// The answer must echo the command code. A non-zero status is returned
    /// in the [`Response`], not as an error.
    pub fn exchange(&mut self, cmd: u16, payload: &[u8]) -> Result<Response, ReaderError<E>> {
        self.send_command(cmd, payload)?;
        let frame = self.receive_response()?;

        if frame.command != cmd {
            warn!(
                "Answer to {:#x} carried command {:#x}",
                cmd,
                frame.command
            );
            return Err(ReaderError::ProtocolMismatch {
                sent: cmd,
                received: frame.command,
            });
        }

        let mut payload = frame.payload;
        if payload.is_empty() {
            return Err(ReaderError::MissingStatus { command: cmd });
        }
        let status = payload.remove(0);
        debug!("cmd {:#x} -> status {}", cmd, status);

        Ok(Response {
            status,
            data: payload,
        })
    }

    /// Exchange and turn a non-zero status into [`ReaderError::Device`]
    fn command(&mut self, cmd: u16, payload: &[u8]) -> Result<Vec<u8>, ReaderError<E>> {
        let response = self.exchange(cmd, payload)?;
        response.check().map_err(ReaderError::Device)?;
        Ok(response.data)
    }

    /// Select the card in the field
    ///
    /// Runs REQA, anticollision and select, stopping at the first failure.
    /// Only single cascade level selection is performed: the serial returned
    /// by anticollision is sent to select as is, whatever its length.
    ///
    /// The step that failed is kept in [`select_state`](Session::select_state).
    pub fn select_card(&mut self) -> Result<SelectedCard, ReaderError<E>> {
        self.selection = self.selection.transition(SelectEvent::Reset);
        let result = self.run_selection();

        match &result {
            Ok(card) => debug!("Selected card type {:#x}", card.card_type.raw()),
            Err(_) => {
                self.selection = self.selection.transition(SelectEvent::Failure);
                warn!("Card selection failed: {:?}", self.selection);
            }
        }

        result
    }

    fn advance(&mut self, event: SelectEvent) {
        self.selection = self.selection.transition(event);
    }

    fn run_selection(&mut self) -> Result<SelectedCard, ReaderError<E>> {
        self.advance(SelectEvent::SendReqa);
        let reqa = self.exchange(command::NTAG_REQA, &[])?;
        reqa.check().map_err(ReaderError::NoCard)?;
        let card_type = CardType::from_atqa(&reqa.data).ok_or(ReaderError::MalformedResponse {
            command: command::NTAG_REQA,
        })?;

        self.advance(SelectEvent::CardAnswered);
        let anticollision = self.exchange(command::NTAG_ANTICOLLISION, &[])?;
        anticollision.check().map_err(ReaderError::Anticollision)?;
        let serial =
            Serial::from_slice(&anticollision.data).ok_or(ReaderError::MalformedResponse {
                command: command::NTAG_ANTICOLLISION,
            })?;

        self.advance(SelectEvent::SerialResolved);
        self.command(command::NTAG_SELECT, serial.as_bytes())?;

        self.advance(SelectEvent::SelectAcknowledged);
        Ok(SelectedCard { card_type, serial })
    }

    /// Read the firmware version string
    pub fn firmware_version(&mut self) -> Result<Vec<u8>, ReaderError<E>> {
        self.command(command::READ_FW_VERSION, &[])
    }

    /// Sound the buzzer for `duration` × 10 ms
    pub fn beep(&mut self, duration: u8) -> Result<(), ReaderError<E>> {
        self.command(command::BEEP, &[duration])?;
        Ok(())
    }

    /// Set the LED state
    pub fn set_led(&mut self, led: Led) -> Result<(), ReaderError<E>> {
        self.command(command::LED, &[led.to_byte()])?;
        Ok(())
    }

    /// Switch the RF antenna on or off
    pub fn set_antenna(&mut self, on: bool) -> Result<(), ReaderError<E>> {
        self.command(command::ANTENNA_POWER, &[u8::from(on)])?;
        Ok(())
    }

    /// Read the reader's node number
    pub fn read_node_number(&mut self) -> Result<u16, ReaderError<E>> {
        let data = self.command(command::READ_NODE_NUMBER, &[])?;
        match data.as_slice() {
            [lo, hi] => Ok(u16::from_le_bytes([*lo, *hi])),
            _ => Err(ReaderError::MalformedResponse {
                command: command::READ_NODE_NUMBER,
            }),
        }
    }

    /// Program the reader's node number
    pub fn set_node_number(&mut self, node: u16) -> Result<(), ReaderError<E>> {
        self.command(command::SET_NODE_NUMBER, &node.to_le_bytes())?;
        Ok(())
    }

    /// Apply startup settings
    ///
    /// Node number first, then antenna, LED and the optional beep.
    ///
    /// `config.uart` is not applied here: the line settings belong to the
    /// channel, so pass them to whatever opens the port before the session
    /// is created.
    pub fn apply_config(&mut self, config: &ReaderConfig) -> Result<(), ReaderError<E>> {
        debug!("Applying reader config");

        if let Some(node) = config.node_number {
            self.set_node_number(node)?;
        }
        self.set_antenna(config.antenna_on_start)?;
        self.set_led(config.led)?;
        if let Some(duration) = config.startup_beep {
            self.beep(duration)?;
        }
        Ok(())
    }
}
