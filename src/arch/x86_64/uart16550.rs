// src/arch/x86_64/uart16550.rs

//! 16550-compatible UART adapter over x86 port I/O
//!
//! Implements [`UartPeripheral`] for the PC serial ports (COM1 at 0x3F8 by
//! default). Every register access builds its `Port` on the spot from the
//! base address, so the adapter is a plain `u16` and can be shared by
//! reference between the foreground and the interrupt handler.

use bitflags::bitflags;
use log::debug;
use x86_64::instructions::port::Port;

use crate::constants::{COM1_IO_PORT, COM2_IO_PORT};
use crate::serial::constants::{
    register_offset, FIFO_ENABLE_CLEAR, SCRATCH_TEST_PATTERNS, UART_CLOCK_HZ,
};
use crate::serial::{
    InitError, InterruptKind, Parity, SerialConfig, StopBits, UartPeripheral, WordLength,
};
use crate::sync::interrupt::{InterruptController, X64InterruptController};

bitflags! {
    /// Interrupt Enable Register (IER)
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct InterruptEnable: u8 {
        const RECEIVED_DATA = 1 << 0;
        const TRANSMIT_EMPTY = 1 << 1;
        const LINE_STATUS = 1 << 2;
        const MODEM_STATUS = 1 << 3;
    }

    /// Line Status Register (LSR)
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct LineStatus: u8 {
        const DATA_READY = 1 << 0;
        const OVERRUN_ERROR = 1 << 1;
        const PARITY_ERROR = 1 << 2;
        const FRAMING_ERROR = 1 << 3;
        const BREAK_INTERRUPT = 1 << 4;
        const THR_EMPTY = 1 << 5;
        const TRANSMITTER_EMPTY = 1 << 6;
        const FIFO_ERROR = 1 << 7;
    }

    /// Line Control Register (LCR)
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct LineControl: u8 {
        const WORD_LENGTH_0 = 1 << 0;
        const WORD_LENGTH_1 = 1 << 1;
        const TWO_STOP_BITS = 1 << 2;
        const PARITY_ENABLE = 1 << 3;
        const EVEN_PARITY = 1 << 4;
        const STICK_PARITY = 1 << 5;
        const SET_BREAK = 1 << 6;
        const DLAB = 1 << 7;
    }

    /// Modem Control Register (MCR)
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ModemControl: u8 {
        const DTR = 1 << 0;
        const RTS = 1 << 1;
        const OUT1 = 1 << 2;
        /// Gates the UART interrupt line on PC hardware
        const OUT2 = 1 << 3;
        const LOOPBACK = 1 << 4;
    }
}

/// Registers that the adapter touches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Register {
    Data,
    InterruptEnable,
    FifoControl,
    LineControl,
    ModemControl,
    LineStatus,
    ModemStatus,
    Scratch,
}

impl Register {
    const fn offset(self) -> u16 {
        match self {
            Register::Data => register_offset::DATA,
            Register::InterruptEnable => register_offset::INTERRUPT_ENABLE,
            Register::FifoControl => register_offset::FIFO_CONTROL,
            Register::LineControl => register_offset::LINE_CONTROL,
            Register::ModemControl => register_offset::MODEM_CONTROL,
            Register::LineStatus => register_offset::LINE_STATUS,
            Register::ModemStatus => register_offset::MODEM_STATUS,
            Register::Scratch => register_offset::SCRATCH,
        }
    }
}

/// 16550 UART at a fixed I/O base
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Uart16550 {
    base: u16,
}

impl Uart16550 {
    /// Adapter for the UART at I/O base `base`
    pub const fn new(base: u16) -> Self {
        Self { base }
    }

    pub const fn com1() -> Self {
        Self::new(COM1_IO_PORT)
    }

    pub const fn com2() -> Self {
        Self::new(COM2_IO_PORT)
    }

    #[inline]
    pub const fn base(&self) -> u16 {
        self.base
    }

    /// Read the Line Status Register
    #[inline]
    pub fn line_status(&self) -> LineStatus {
        LineStatus::from_bits_retain(self.read(Register::LineStatus))
    }

    #[inline]
    fn interrupt_enable(&self) -> InterruptEnable {
        InterruptEnable::from_bits_retain(self.read(Register::InterruptEnable))
    }

    /// Scratch register write/read test
    ///
    /// The scratch register has no side effects; on systems without the
    /// part reads float to 0xFF.
    fn is_present(&self) -> bool {
        SCRATCH_TEST_PATTERNS.iter().all(|&pattern| {
            self.write(Register::Scratch, pattern);
            self.read(Register::Scratch) == pattern
        }) && self.read(Register::LineStatus) != 0xFF
    }

    #[inline]
    fn read(&self, register: Register) -> u8 {
        let mut port = Port::<u8>::new(self.base + register.offset());
        // SAFETY: `base` names a 16550 register block; register reads have
        // no memory side effects. The only state they change (clearing
        // data-ready on RBR) is what the caller asked for.
        unsafe { port.read() }
    }

    #[inline]
    fn write(&self, register: Register, value: u8) {
        let mut port = Port::<u8>::new(self.base + register.offset());
        // SAFETY: see `read`; writes only reach the UART's own registers.
        unsafe { port.write(value) }
    }
}

impl Default for Uart16550 {
    fn default() -> Self {
        Self::com1()
    }
}

/// Divisor latch value for `baud_rate`
///
/// The rate must divide the 115200 Hz reference exactly and the quotient
/// must fit the 16-bit latch.
pub const fn divisor_for(baud_rate: u32) -> Result<u16, InitError> {
    if baud_rate == 0 || baud_rate > UART_CLOCK_HZ || UART_CLOCK_HZ % baud_rate != 0 {
        return Err(InitError::InvalidBaudRate(baud_rate));
    }
    let divisor = UART_CLOCK_HZ / baud_rate;
    if divisor > u16::MAX as u32 {
        return Err(InitError::InvalidBaudRate(baud_rate));
    }
    Ok(divisor as u16)
}

/// LCR value (DLAB clear) for the frame format in `config`
pub fn line_control_for(config: &SerialConfig) -> Result<LineControl, InitError> {
    let mut lcr = match config.word_length {
        WordLength::Five => LineControl::empty(),
        WordLength::Six => LineControl::WORD_LENGTH_0,
        WordLength::Seven => LineControl::WORD_LENGTH_1,
        WordLength::Eight => LineControl::WORD_LENGTH_0 | LineControl::WORD_LENGTH_1,
    };

    match config.stop_bits {
        StopBits::One => {}
        // STB with 5-bit words means 1.5 stop bits on this part
        StopBits::Two if config.word_length == WordLength::Five => {
            return Err(InitError::UnsupportedFormat);
        }
        StopBits::Two => lcr |= LineControl::TWO_STOP_BITS,
    }

    match config.parity {
        Parity::None => {}
        Parity::Odd => lcr |= LineControl::PARITY_ENABLE,
        Parity::Even => lcr |= LineControl::PARITY_ENABLE | LineControl::EVEN_PARITY,
    }

    Ok(lcr)
}

impl UartPeripheral for Uart16550 {
    fn configure(&self, config: &SerialConfig) -> Result<(), InitError> {
        let divisor = divisor_for(config.baud_rate)?;
        let lcr = line_control_for(config)?;

        if !self.is_present() {
            return Err(InitError::PortNotPresent);
        }

        self.write(Register::InterruptEnable, 0x00);

        self.write(Register::LineControl, LineControl::DLAB.bits());
        self.write(Register::Data, (divisor & 0xFF) as u8);
        self.write(Register::InterruptEnable, (divisor >> 8) as u8);
        self.write(Register::LineControl, lcr.bits());

        self.write(Register::FifoControl, FIFO_ENABLE_CLEAR);
        self.write(
            Register::ModemControl,
            (ModemControl::DTR | ModemControl::RTS | ModemControl::OUT2).bits(),
        );

        // drop whatever was latched before configuration
        let _ = self.read(Register::Data);
        let _ = self.read(Register::LineStatus);

        self.write(
            Register::InterruptEnable,
            InterruptEnable::RECEIVED_DATA.bits(),
        );

        debug!(
            "uart16550@{:#x}: divisor {} lcr {:#04x}",
            self.base,
            divisor,
            lcr.bits()
        );
        Ok(())
    }

    fn is_pending(&self, kind: InterruptKind) -> bool {
        let lsr = self.line_status();
        match kind {
            InterruptKind::TransmitEmpty => {
                lsr.contains(LineStatus::THR_EMPTY)
                    && self
                        .interrupt_enable()
                        .contains(InterruptEnable::TRANSMIT_EMPTY)
            }
            InterruptKind::ReceiveNotEmpty => lsr.contains(LineStatus::DATA_READY),
        }
    }

    fn clear_pending(&self, _kind: InterruptKind) {
        // Reading RBR clears data-ready and writing THR clears THRE.
    }

    #[inline]
    fn write_data(&self, byte: u8) {
        self.write(Register::Data, byte);
    }

    #[inline]
    fn read_data(&self) -> u8 {
        self.read(Register::Data)
    }

    fn set_transmit_interrupt_enabled(&self, enabled: bool) {
        // IER read-modify-write must not interleave with the handler's own
        // update of the same register.
        X64InterruptController::without_interrupts(|| {
            let mut ier = self.interrupt_enable();
            ier.set(InterruptEnable::TRANSMIT_EMPTY, enabled);
            self.write(Register::InterruptEnable, ier.bits());
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_divisor_for_standard_rates() {
        assert_eq!(divisor_for(115_200), Ok(1));
        assert_eq!(divisor_for(57_600), Ok(2));
        assert_eq!(divisor_for(38_400), Ok(3));
        assert_eq!(divisor_for(9_600), Ok(12));
        assert_eq!(divisor_for(50), Ok(2304));
    }

    #[test]
    fn test_divisor_rejects_unreachable_rates() {
        assert_eq!(divisor_for(0), Err(InitError::InvalidBaudRate(0)));
        assert_eq!(
            divisor_for(230_400),
            Err(InitError::InvalidBaudRate(230_400))
        );
        assert_eq!(divisor_for(56_000), Err(InitError::InvalidBaudRate(56_000)));
    }

    #[test]
    fn test_divisor_rejects_latch_overflow() {
        assert_eq!(divisor_for(1), Err(InitError::InvalidBaudRate(1)));
        assert_eq!(divisor_for(2), Ok(57_600));
    }

    #[test]
    fn test_line_control_8n1() {
        let lcr = line_control_for(&SerialConfig::new()).unwrap();
        assert_eq!(lcr.bits(), 0x03);
    }

    #[test]
    fn test_line_control_7e2() {
        let config = SerialConfig::new()
            .with_word_length(WordLength::Seven)
            .with_parity(Parity::Even)
            .with_stop_bits(StopBits::Two);
        let lcr = line_control_for(&config).unwrap();
        assert_eq!(lcr.bits(), 0x02 | 0x04 | 0x08 | 0x10);
        assert!(!lcr.contains(LineControl::DLAB));
    }

    #[test]
    fn test_five_bit_two_stop_unsupported() {
        let config = SerialConfig::new()
            .with_word_length(WordLength::Five)
            .with_stop_bits(StopBits::Two);
        assert_eq!(line_control_for(&config), Err(InitError::UnsupportedFormat));
    }

    #[test]
    fn test_com_bases() {
        assert_eq!(Uart16550::com1().base(), 0x3F8);
        assert_eq!(Uart16550::com2().base(), 0x2F8);
        assert_eq!(Uart16550::default(), Uart16550::com1());
    }
}
