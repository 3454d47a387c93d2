//! `std::io` backed UART
//!
//! Interrupted system calls are retried. Every other I/O failure is mapped
//! into [`UartBusError`]; in particular a port opened with an OS read timeout
//! reports [`UartBusError::TimedOut`] instead of retrying.

use std::io::{self, Read, Write};

use yhy_hal::{UartRx, UartTx};

/// Error from host UART operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UartBusError {
    /// Read or write timed out at the OS level
    TimedOut,
    /// Device was unplugged or the pipe was closed
    Disconnected,
    /// Port is busy or the operation would block
    Busy,
    /// Other error
    Other(io::ErrorKind),
}

#[cfg(feature = "defmt")]
impl defmt::Format for UartBusError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            UartBusError::TimedOut => defmt::write!(f, "TimedOut"),
            UartBusError::Disconnected => defmt::write!(f, "Disconnected"),
            UartBusError::Busy => defmt::write!(f, "Busy"),
            UartBusError::Other(_) => defmt::write!(f, "Other"),
        }
    }
}

impl From<io::Error> for UartBusError {
    fn from(e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::TimedOut => UartBusError::TimedOut,
            io::ErrorKind::BrokenPipe
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::NotConnected => UartBusError::Disconnected,
            io::ErrorKind::WouldBlock => UartBusError::Busy,
            kind => UartBusError::Other(kind),
        }
    }
}

/// UART over a `std::io` byte stream
#[derive(Debug)]
pub struct StdUart<T> {
    inner: T,
}

impl<T> StdUart<T> {
    /// Wrap an already opened stream
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    /// Borrow the underlying stream
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the wrapper and return the underlying stream
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: Write> UartTx for StdUart<T> {
    type Error = UartBusError;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.inner.write_all(data)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.inner.flush()?;
        Ok(())
    }
}

impl<T: Read> UartRx for StdUart<T> {
    type Error = UartBusError;

    fn read_blocking(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        loop {
            match self.inner.read(buf) {
                Ok(n) => return Ok(n),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }
}
