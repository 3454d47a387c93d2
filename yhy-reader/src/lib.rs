//! YHY523U reader driver
//!
//! Drives an Ehuoyan YHY523U (or compatible YHY632) RFID/NFC module over any
//! channel implementing the `yhy-hal` UART traits:
//!
//! - [`Session`] - request/response command exchange
//! - [`Session::select_card`] - REQA → anticollision → select handshake for
//!   NTAG21x cards, tracked by [`SelectState`]
//! - Reader management helpers (beep, LED, antenna, firmware version)
//! - [`ReaderConfig`] - startup settings applied with [`Session::apply_config`]
//!
//! Everything is blocking and single-threaded. One exchange is in flight at a
//! time; share a session between threads only behind a lock.

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod fmt;

pub mod card;
pub mod config;
pub mod error;
pub mod select;
pub mod session;

pub use card::{CardType, CascadeLevel, SelectedCard, Serial};
pub use config::{Led, ReaderConfig};
pub use error::{FramingError, ReaderError};
pub use select::{SelectEvent, SelectState, SelectStep};
pub use session::{Response, Session};
