// src/serial/config.rs

//! Line configuration handed to the peripheral adapter at init time

use super::error::InitError;
use crate::constants::DEFAULT_BAUD_RATE;

/// Data bits per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordLength {
    Five,
    Six,
    Seven,
    Eight,
}

impl WordLength {
    /// Number of data bits
    pub const fn bits(&self) -> u8 {
        match self {
            WordLength::Five => 5,
            WordLength::Six => 6,
            WordLength::Seven => 7,
            WordLength::Eight => 8,
        }
    }
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    None,
    Odd,
    Even,
}

/// Stop bits per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopBits {
    One,
    Two,
}

/// Serial line configuration
///
/// Receive and transmit are always both enabled and hardware flow control is
/// always off; only the frame format and speed are configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerialConfig {
    /// Baud rate in bits per second
    pub baud_rate: u32,
    pub word_length: WordLength,
    pub parity: Parity,
    pub stop_bits: StopBits,
}

impl SerialConfig {
    /// 57600 baud, 8N1
    pub const fn new() -> Self {
        Self {
            baud_rate: DEFAULT_BAUD_RATE,
            word_length: WordLength::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }

    /// 115200 baud, 8N1
    pub const fn fast() -> Self {
        Self::new().with_baud_rate(115_200)
    }

    pub const fn with_baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    pub const fn with_word_length(mut self, word_length: WordLength) -> Self {
        self.word_length = word_length;
        self
    }

    pub const fn with_parity(mut self, parity: Parity) -> Self {
        self.parity = parity;
        self
    }

    pub const fn with_stop_bits(mut self, stop_bits: StopBits) -> Self {
        self.stop_bits = stop_bits;
        self
    }

    /// Reject settings no peripheral can honor
    ///
    /// Adapters still check their own limits (clock divisors and the like)
    /// in `configure`.
    pub const fn validate(&self) -> Result<(), InitError> {
        if self.baud_rate == 0 {
            return Err(InitError::InvalidBaudRate(self.baud_rate));
        }
        Ok(())
    }
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self::new()
    }
}
