// src/serial/channel.rs

//! Interrupt-driven serial channel
//!
//! A channel owns one transmit and one receive [`RingBuffer`] for a single
//! UART and splits the work between two contexts:
//!
//! | Buffer | Writer                         | Reader                         |
//! |--------|--------------------------------|--------------------------------|
//! | TX     | foreground ([`tx_enqueue`])    | interrupt ([`tx_dequeue`])     |
//! | RX     | interrupt ([`rx_enqueue`])     | foreground ([`rx_dequeue`])    |
//!
//! Calling a method from the other context is not memory-unsafe (everything
//! is atomic) but breaks FIFO delivery.
//!
//! # Transmit backpressure
//!
//! The transmit-empty interrupt is armed on every [`tx_enqueue`] and
//! disarmed when [`tx_dequeue`] finds nothing left. The channel starts
//! quiescent (disarmed). A foreground enqueue racing the interrupt's disarm
//! costs at most one extra interrupt that finds the buffer empty.
//!
//! # Overflow
//!
//! Enqueueing into a full buffer discards the whole buffer (not only the new
//! byte), latches the sticky error flag and keeps going. Nothing is retried
//! and nothing blocks.
//!
//! [`tx_enqueue`]: SerialChannel::tx_enqueue
//! [`tx_dequeue`]: SerialChannel::tx_dequeue
//! [`rx_enqueue`]: SerialChannel::rx_enqueue
//! [`rx_dequeue`]: SerialChannel::rx_dequeue

use core::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info, warn};

use super::backend::{InterruptKind, UartPeripheral};
use super::config::SerialConfig;
use super::error::{ChannelError, Direction, InitError};
use super::ring::RingBuffer;
use super::stats::{ChannelDiagnostics, ChannelStats};

/// Buffered UART channel with `TX`/`RX` byte capacities
#[derive(Debug)]
pub struct SerialChannel<P, const TX: usize, const RX: usize> {
    peripheral: P,
    tx: RingBuffer<TX>,
    rx: RingBuffer<RX>,
    /// Sticky overflow latch, only `clear_error` resets it
    error: AtomicBool,
    initialized: AtomicBool,
    diagnostics: ChannelDiagnostics,
}

impl<P: UartPeripheral, const TX: usize, const RX: usize> SerialChannel<P, TX, RX> {
    /// Create a channel around `peripheral`
    ///
    /// The hardware is not touched until [`init`](Self::init).
    ///
    /// # Errors
    ///
    /// - `ChannelError::ZeroCapacity` if either buffer capacity is zero
    pub fn new(peripheral: P) -> Result<Self, ChannelError> {
        if TX == 0 {
            return Err(ChannelError::ZeroCapacity {
                direction: Direction::Tx,
            });
        }
        if RX == 0 {
            return Err(ChannelError::ZeroCapacity {
                direction: Direction::Rx,
            });
        }

        Ok(Self {
            peripheral,
            tx: RingBuffer::new(),
            rx: RingBuffer::new(),
            error: AtomicBool::new(false),
            initialized: AtomicBool::new(false),
            diagnostics: ChannelDiagnostics::new(),
        })
    }

    /// Configure the peripheral and leave the transmitter quiescent
    ///
    /// Must run once, before the interrupt vector is unmasked.
    ///
    /// # Errors
    ///
    /// - `InitError::AlreadyInitialized` on a second successful call
    /// - `InitError::InvalidBaudRate` for a zero baud rate
    /// - anything the adapter's `configure` reports
    pub fn init(&self, config: &SerialConfig) -> Result<(), InitError> {
        config.validate()?;

        if self
            .initialized
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(InitError::AlreadyInitialized);
        }

        if let Err(err) = self.peripheral.configure(config) {
            self.initialized.store(false, Ordering::Release);
            return Err(err);
        }
        self.peripheral.set_transmit_interrupt_enabled(false);

        info!(
            "serial channel up: {} baud, {} data bits, tx={} rx={}",
            config.baud_rate,
            config.word_length.bits(),
            TX,
            RX
        );
        Ok(())
    }

    /// Whether [`init`](Self::init) has completed
    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    /// Queue one byte for transmission (foreground context)
    ///
    /// On overflow the whole TX buffer is dropped along with `byte` and the
    /// error flag is set. The transmit-empty interrupt is re-armed either
    /// way.
    pub fn tx_enqueue(&self, byte: u8) {
        if !self.tx.enqueue(byte) {
            self.tx.clear();
            self.overflow(Direction::Tx);
        }

        self.peripheral.set_transmit_interrupt_enabled(true);
    }

    /// Take the next byte to transmit (interrupt context)
    ///
    /// Disarms the transmit-empty interrupt and returns `None` when there is
    /// nothing left.
    pub fn tx_dequeue(&self) -> Option<u8> {
        let byte = self.tx.dequeue();
        if byte.is_none() {
            self.peripheral.set_transmit_interrupt_enabled(false);
        }
        byte
    }

    /// Bytes waiting to be transmitted
    #[inline]
    pub fn tx_count(&self) -> usize {
        self.tx.item_count()
    }

    #[inline]
    pub fn tx_is_full(&self) -> bool {
        self.tx.is_full()
    }

    /// Store one received byte (interrupt context)
    ///
    /// On overflow every unread byte is dropped along with `byte` and the
    /// error flag is set.
    pub fn rx_enqueue(&self, byte: u8) {
        if !self.rx.enqueue(byte) {
            self.rx.clear();
            self.overflow(Direction::Rx);
        }
    }

    /// Take the next received byte (foreground context)
    #[inline]
    pub fn rx_dequeue(&self) -> Option<u8> {
        self.rx.dequeue()
    }

    /// Bytes received and not yet read
    #[inline]
    pub fn rx_count(&self) -> usize {
        self.rx.item_count()
    }

    #[inline]
    pub const fn tx_capacity(&self) -> usize {
        TX
    }

    #[inline]
    pub const fn rx_capacity(&self) -> usize {
        RX
    }

    /// Interrupt entry point, call on every occurrence of the UART interrupt
    ///
    /// Both conditions are checked on every call; one entry can service a
    /// transmit and a receive.
    pub fn on_interrupt(&self) {
        self.diagnostics.record_interrupt();

        if self.peripheral.is_pending(InterruptKind::TransmitEmpty) {
            // writing the data register acknowledges the condition
            match self.tx_dequeue() {
                Some(byte) => {
                    self.peripheral.write_data(byte);
                    self.diagnostics.record_transmitted();
                }
                None => self.diagnostics.record_idle_tx(),
            }
        }

        if self.peripheral.is_pending(InterruptKind::ReceiveNotEmpty) {
            let byte = self.peripheral.read_data();
            self.diagnostics.record_received();
            self.rx_enqueue(byte);
            self.peripheral.clear_pending(InterruptKind::ReceiveNotEmpty);
        }
    }

    /// Whether an overflow has happened since the last `clear_error`
    #[inline]
    #[must_use = "the overflow latch is the only report of lost data"]
    pub fn has_error(&self) -> bool {
        self.error.load(Ordering::Acquire)
    }

    /// Reset the overflow latch, returning its previous state
    pub fn clear_error(&self) -> bool {
        self.error.swap(false, Ordering::AcqRel)
    }

    /// Drop everything buffered in both directions and disarm transmit
    ///
    /// The error flag is left as is.
    pub fn reset(&self) {
        self.tx.clear();
        self.rx.clear();
        self.peripheral.set_transmit_interrupt_enabled(false);
        debug!("serial channel buffers reset");
    }

    /// Snapshot of the diagnostics counters
    pub fn stats(&self) -> ChannelStats {
        self.diagnostics.snapshot()
    }

    pub fn reset_stats(&self) {
        self.diagnostics.reset();
    }

    /// The underlying adapter
    #[inline]
    pub fn peripheral(&self) -> &P {
        &self.peripheral
    }

    fn overflow(&self, direction: Direction) {
        self.error.store(true, Ordering::Release);
        self.diagnostics.record_overflow(direction);
        warn!("serial {} overflow, buffer discarded", direction);
    }
}
