// src/serial/constants.rs

//! Constants and register definitions for 16550-compatible UARTs

/// Register offsets from base port
pub mod register_offset {
    pub const DATA: u16 = 0;
    pub const INTERRUPT_ENABLE: u16 = 1;
    /// Write: FIFO control, read: interrupt identification
    pub const FIFO_CONTROL: u16 = 2;
    pub const LINE_CONTROL: u16 = 3;
    pub const MODEM_CONTROL: u16 = 4;
    pub const LINE_STATUS: u16 = 5;
    pub const MODEM_STATUS: u16 = 6;
    pub const SCRATCH: u16 = 7;
}

/// Input clock divided down to the baud rate (1.8432 MHz / 16)
pub const UART_CLOCK_HZ: u32 = 115_200;

/// Patterns written to the scratch register to detect the part
pub const SCRATCH_TEST_PATTERNS: [u8; 3] = [0x55, 0xAA, 0x00];

/// FIFO enable, clear both FIFOs, 1-byte receive trigger
///
/// The handler moves one byte per interrupt, so the receive interrupt has to
/// fire for every byte rather than wait for a character timeout.
pub const FIFO_ENABLE_CLEAR: u8 = 0x07;

#[cfg(test)]
mod tests {
    use super::*;

    /// FCR bits 6-7, receive trigger level
    const FIFO_TRIGGER_MASK: u8 = 0xC0;

    #[test]
    fn test_fifo_triggers_on_every_byte() {
        assert_eq!(FIFO_ENABLE_CLEAR & FIFO_TRIGGER_MASK, 0);
        // enable, clear receive, clear transmit
        assert_eq!(FIFO_ENABLE_CLEAR & 0x07, 0x07);
    }
}
