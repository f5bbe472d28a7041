// src/serial/error.rs

//! Error types for serial channel operations
//!
//! Overflow is the only thing that can go wrong once a channel is running,
//! and it never reaches the caller as an error value (see
//! [`SerialChannel::has_error`](super::SerialChannel::has_error)). The types
//! here cover construction, configuration and binding.

use core::fmt;

/// Transfer direction of a channel buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Application to peripheral
    Tx,
    /// Peripheral to application
    Rx,
}

impl Direction {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Direction::Tx => "tx",
            Direction::Rx => "rx",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Channel construction failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelError {
    /// A buffer was declared with capacity zero
    ZeroCapacity { direction: Direction },
}

impl fmt::Display for ChannelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelError::ZeroCapacity { direction } => {
                write!(f, "{} buffer capacity must be greater than zero", direction)
            }
        }
    }
}

/// Peripheral initialization result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitError {
    /// Port already initialized
    AlreadyInitialized,
    /// Hardware not present or not responding
    PortNotPresent,
    /// Baud rate is zero or not reachable with the peripheral clock
    InvalidBaudRate(u32),
    /// Word length / parity / stop bit combination the peripheral cannot do
    UnsupportedFormat,
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitError::AlreadyInitialized => write!(f, "Serial port already initialized"),
            InitError::PortNotPresent => write!(f, "Serial port hardware not present"),
            InitError::InvalidBaudRate(baud) => write!(f, "Invalid baud rate: {}", baud),
            InitError::UnsupportedFormat => write!(f, "Unsupported serial frame format"),
        }
    }
}

/// Interrupt vector binding failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindError {
    /// A handler is already bound to this vector
    AlreadyBound,
}

impl fmt::Display for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindError::AlreadyBound => write!(f, "interrupt vector already bound"),
        }
    }
}
