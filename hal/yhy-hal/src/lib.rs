//! YHY523U channel abstraction layer
//!
//! The reader module talks over a plain byte-oriented duplex channel (in
//! practice a USB serial adapter). This crate defines the traits that the
//! protocol session needs from that channel, so the same driver code runs on
//! top of a host serial port, an embedded UART, or a scripted test double.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  yhy-reader (session, card selection)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  yhy-hal (this crate - traits)          │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  yhy-hal-std  │       │  board UART   │
//! │ (std::io port)│       │ (user impl)   │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`uart::UartTx`], [`uart::UartRx`] - Blocking serial communication

#![no_std]
#![deny(unsafe_code)]

pub mod uart;

pub use uart::{DataBits, Parity, StopBits, Uart, UartConfig, UartRx, UartTx};
