//! Host-side channel for the YHY523U reader driver
//!
//! Wraps anything that implements [`std::io::Read`] and [`std::io::Write`]
//! (an opened serial port, a pseudo terminal, a TCP bridge) so it can be
//! handed to a `yhy-reader` session through the `yhy-hal` traits.
//!
//! Opening and configuring the OS device is left to the caller; the
//! [`yhy_hal::UartConfig`] describes the settings the port must use.

#![deny(unsafe_code)]

pub mod uart;

pub use uart::{StdUart, UartBusError};

// Re-export shared types from yhy-hal
pub use yhy_hal::UartConfig;
