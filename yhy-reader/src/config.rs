//! Reader configuration
//!
//! Settings applied once after the channel is opened. With the `serde`
//! feature the struct can be loaded from TOML; missing keys take defaults.

use yhy_hal::UartConfig;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Reader LED state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Led {
    #[default]
    Off,
    Blue,
    Red,
    Both,
}

impl Led {
    /// LED command argument
    pub fn to_byte(self) -> u8 {
        match self {
            Led::Off => 0x00,
            Led::Blue => 0x01,
            Led::Red => 0x02,
            Led::Both => 0x03,
        }
    }
}

/// Startup configuration for a reader session
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReaderConfig {
    /// Serial settings the channel must be opened with
    ///
    /// Read by the caller when opening the port. `Session::apply_config`
    /// only sends reader commands and leaves these alone.
    pub uart: UartConfig,
    /// Switch the antenna on (true) or off (false)
    pub antenna_on_start: bool,
    /// LED state to set
    pub led: Led,
    /// Beep once, for this many 10 ms units
    pub startup_beep: Option<u8>,
    /// Node number to program into the reader
    pub node_number: Option<u16>,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            uart: UartConfig::default(),
            antenna_on_start: true,
            led: Led::Off,
            startup_beep: None,
            node_number: None,
        }
    }
}
