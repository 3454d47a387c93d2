//! YHY523U serial protocol
//!
//! This crate defines the framing used between a host and the YHY523U
//! RFID/NFC reader module. Every request and response uses the same frame:
//! ```text
//! ┌────────┬────────┬──────────┬─────────┬───────────┬──────────┐
//! │ HEADER │ LENGTH │ RESERVED │ COMMAND │ DATA      │ CHECKSUM │
//! │ AA BB  │ 2B LE  │ 2B       │ 2B LE   │ 0–65530B  │ 1B       │
//! └────────┴────────┴──────────┴─────────┴───────────┴──────────┘
//! ```
//!
//! RESERVED, COMMAND and DATA are byte-stuffed: every `0xAA` is followed by
//! an inserted `0x00` so the header can never appear inside a frame. LENGTH
//! counts the unstuffed RESERVED + COMMAND + DATA + CHECKSUM bytes.
//!
//! Responses carry a status byte as the first DATA byte; see [`status`].

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

pub mod command;
pub mod frame;
pub mod status;

pub use command::Namespace;
pub use frame::{checksum, decode, encode, Frame, FrameError, FrameParser, HEADER, MAX_PAYLOAD_SIZE};
pub use status::DeviceStatus;
