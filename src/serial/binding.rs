// src/serial/binding.rs

//! Glue between an interrupt vector and an explicitly constructed channel
//!
//! An interrupt vector is a free function with no arguments, so it needs a
//! `static` to find its channel. [`IrqBinding`] is that static: the channel
//! itself stays an ordinary value created and owned by initialization code,
//! and only a `&'static` reference to it is published here.
//!
//! # Example
//!
//! ```no_run
//! use irq_uart::serial::{IrqBinding, SerialChannel, SerialConfig};
//! # use irq_uart::serial::{InitError, InterruptKind, UartPeripheral};
//! # struct Uart;
//! # impl UartPeripheral for Uart {
//! #     fn configure(&self, _: &SerialConfig) -> Result<(), InitError> { Ok(()) }
//! #     fn is_pending(&self, _: InterruptKind) -> bool { false }
//! #     fn clear_pending(&self, _: InterruptKind) {}
//! #     fn write_data(&self, _: u8) {}
//! #     fn read_data(&self) -> u8 { 0 }
//! #     fn set_transmit_interrupt_enabled(&self, _: bool) {}
//! # }
//! # fn leak<T>(value: T) -> &'static T { Box::leak(Box::new(value)) }
//!
//! static UART1_IRQ: IrqBinding<SerialChannel<Uart, 64, 64>> = IrqBinding::new();
//!
//! fn uart1_vector() {
//!     UART1_IRQ.dispatch();
//! }
//!
//! let channel = leak(SerialChannel::new(Uart).expect("capacities"));
//! channel.init(&SerialConfig::new()).expect("uart init");
//! UART1_IRQ.bind(channel).expect("vector free");
//! ```

use log::debug;
use spin::Once;

use super::backend::UartPeripheral;
use super::channel::SerialChannel;
use super::error::BindError;

/// Anything an interrupt vector can forward to
pub trait InterruptHandler {
    /// Service one interrupt occurrence
    fn on_interrupt(&self);
}

impl<P: UartPeripheral, const TX: usize, const RX: usize> InterruptHandler
    for SerialChannel<P, TX, RX>
{
    #[inline]
    fn on_interrupt(&self) {
        SerialChannel::on_interrupt(self)
    }
}

/// Write-once slot holding the handler for one interrupt vector
pub struct IrqBinding<H: 'static> {
    handler: Once<&'static H>,
}

impl<H: InterruptHandler + 'static> IrqBinding<H> {
    pub const fn new() -> Self {
        Self {
            handler: Once::new(),
        }
    }

    /// Publish `handler` for this vector
    ///
    /// # Errors
    ///
    /// - `BindError::AlreadyBound` if a handler was bound before
    pub fn bind(&self, handler: &'static H) -> Result<(), BindError> {
        let mut installed = false;
        self.handler.call_once(|| {
            installed = true;
            handler
        });

        if installed {
            debug!("interrupt handler bound");
            Ok(())
        } else {
            Err(BindError::AlreadyBound)
        }
    }

    /// Forward one interrupt to the bound handler
    ///
    /// Returns `false` when nothing is bound yet (the interrupt fired before
    /// initialization finished).
    #[inline]
    pub fn dispatch(&self) -> bool {
        match self.handler.get() {
            Some(handler) => {
                handler.on_interrupt();
                true
            }
            None => false,
        }
    }

    /// The bound handler, if any
    #[inline]
    pub fn get(&self) -> Option<&'static H> {
        self.handler.get().copied()
    }

    #[inline]
    pub fn is_bound(&self) -> bool {
        self.handler.is_completed()
    }
}

impl<H: InterruptHandler + 'static> Default for IrqBinding<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: 'static> core::fmt::Debug for IrqBinding<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("IrqBinding")
            .field("bound", &self.handler.is_completed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::sync::atomic::{AtomicUsize, Ordering};

    struct Counter(AtomicUsize);

    impl InterruptHandler for Counter {
        fn on_interrupt(&self) {
            self.0.fetch_add(1, Ordering::Relaxed);
        }
    }

    static FIRST: Counter = Counter(AtomicUsize::new(0));
    static SECOND: Counter = Counter(AtomicUsize::new(0));

    #[test]
    fn test_dispatch_before_bind_is_ignored() {
        let binding: IrqBinding<Counter> = IrqBinding::new();
        assert!(!binding.is_bound());
        assert!(!binding.dispatch());
        assert!(binding.get().is_none());
    }

    #[test]
    fn test_second_bind_rejected() {
        let binding: IrqBinding<Counter> = IrqBinding::new();
        assert_eq!(binding.bind(&FIRST), Ok(()));
        assert_eq!(binding.bind(&SECOND), Err(BindError::AlreadyBound));

        assert!(binding.dispatch());
        assert!(binding.dispatch());
        assert_eq!(FIRST.0.load(Ordering::Relaxed), 2);
        assert_eq!(SECOND.0.load(Ordering::Relaxed), 0);
    }
}
