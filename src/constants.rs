// src/constants.rs

//! Crate-wide configuration values

/// Baud rate used when no explicit configuration is given
pub const DEFAULT_BAUD_RATE: u32 = 57_600;

/// Default transmit buffer capacity in bytes
pub const DEFAULT_TX_CAPACITY: usize = 256;

/// Default receive buffer capacity in bytes
pub const DEFAULT_RX_CAPACITY: usize = 64;

/// Line terminator emitted by `send_crlf`
pub const LINE_TERMINATOR: &[u8] = b"\r\n";

/// Standard COM1 I/O base
pub const COM1_IO_PORT: u16 = 0x3F8;

/// Standard COM2 I/O base
pub const COM2_IO_PORT: u16 = 0x2F8;
