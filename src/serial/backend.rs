// src/serial/backend.rs

//! Hardware abstraction for the serial channel.
//!
//! The channel never touches registers itself. Everything it needs from the
//! UART goes through [`UartPeripheral`], so the buffering and interrupt
//! protocol can be reused across peripherals and driven by a mock in tests.

use super::config::SerialConfig;
use super::error::InitError;

/// Interrupt conditions the channel services
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterruptKind {
    /// Transmit data register is empty and can take the next byte
    TransmitEmpty,
    /// A received byte is waiting in the data register
    ReceiveNotEmpty,
}

/// Register-level access the channel needs from a UART
///
/// Methods take `&self`: the adapter is reached from both the foreground and
/// the interrupt context through a shared channel reference, and device
/// registers are interior-mutable by nature. Implementations backed by
/// memory-mapped or port I/O need no extra locking for that.
pub trait UartPeripheral {
    /// Program baud rate and frame format, enable receive and transmit,
    /// enable the receive interrupt and leave the transmit-empty interrupt
    /// disabled.
    fn configure(&self, config: &SerialConfig) -> Result<(), InitError>;

    /// Whether `kind` is currently pending (flag set and source enabled)
    fn is_pending(&self, kind: InterruptKind) -> bool;

    /// Acknowledge `kind`
    ///
    /// Required for [`InterruptKind::ReceiveNotEmpty`] on parts where reading
    /// the data register does not clear the flag. May be a no-op otherwise.
    fn clear_pending(&self, kind: InterruptKind);

    /// Write one byte to the data register
    fn write_data(&self, byte: u8);

    /// Read one byte from the data register
    fn read_data(&self) -> u8;

    /// Arm or disarm the transmit-empty interrupt source
    fn set_transmit_interrupt_enabled(&self, enabled: bool);
}

impl<P: UartPeripheral + ?Sized> UartPeripheral for &P {
    #[inline]
    fn configure(&self, config: &SerialConfig) -> Result<(), InitError> {
        (**self).configure(config)
    }

    #[inline]
    fn is_pending(&self, kind: InterruptKind) -> bool {
        (**self).is_pending(kind)
    }

    #[inline]
    fn clear_pending(&self, kind: InterruptKind) {
        (**self).clear_pending(kind)
    }

    #[inline]
    fn write_data(&self, byte: u8) {
        (**self).write_data(byte)
    }

    #[inline]
    fn read_data(&self) -> u8 {
        (**self).read_data()
    }

    #[inline]
    fn set_transmit_interrupt_enabled(&self, enabled: bool) {
        (**self).set_transmit_interrupt_enabled(enabled)
    }
}

#[cfg(all(target_arch = "x86_64", feature = "uart16550"))]
pub use crate::arch::x86_64::uart16550::Uart16550 as DefaultBackend;
