// tests/common/mod.rs

//! Mock peripheral shared by the integration tests

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use irq_uart::serial::{InitError, InterruptKind, SerialConfig, UartPeripheral};

/// Register-level model of a UART with a one-byte transmit holding register
#[derive(Debug, Default)]
pub struct MockUart {
    tx_irq_enabled: AtomicBool,
    tx_register_empty: AtomicBool,
    arm_calls: AtomicUsize,
    rx_acks: AtomicUsize,
    incoming: Mutex<VecDeque<u8>>,
    wire: Mutex<Vec<u8>>,
    configured: Mutex<Option<SerialConfig>>,
}

impl MockUart {
    pub fn new() -> Self {
        let uart = Self::default();
        uart.tx_register_empty.store(true, Ordering::SeqCst);
        uart
    }

    /// Bytes that arrive on the line, one per receive interrupt
    pub fn feed(&self, bytes: &[u8]) {
        self.incoming.lock().unwrap().extend(bytes.iter().copied());
    }

    /// Everything written to the data register so far
    pub fn wire(&self) -> Vec<u8> {
        self.wire.lock().unwrap().clone()
    }

    pub fn tx_irq_enabled(&self) -> bool {
        self.tx_irq_enabled.load(Ordering::SeqCst)
    }

    pub fn arm_calls(&self) -> usize {
        self.arm_calls.load(Ordering::SeqCst)
    }

    pub fn rx_acks(&self) -> usize {
        self.rx_acks.load(Ordering::SeqCst)
    }

    pub fn configured(&self) -> Option<SerialConfig> {
        *self.configured.lock().unwrap()
    }

    /// The shift register finished the last byte
    pub fn complete_transmit(&self) {
        self.tx_register_empty.store(true, Ordering::SeqCst);
    }

    /// Whether the hardware would assert the interrupt line right now
    pub fn irq_line(&self) -> bool {
        self.is_pending(InterruptKind::TransmitEmpty)
            || self.is_pending(InterruptKind::ReceiveNotEmpty)
    }
}

impl UartPeripheral for MockUart {
    fn configure(&self, config: &SerialConfig) -> Result<(), InitError> {
        *self.configured.lock().unwrap() = Some(*config);
        Ok(())
    }

    fn is_pending(&self, kind: InterruptKind) -> bool {
        match kind {
            InterruptKind::TransmitEmpty => {
                self.tx_irq_enabled.load(Ordering::SeqCst)
                    && self.tx_register_empty.load(Ordering::SeqCst)
            }
            InterruptKind::ReceiveNotEmpty => !self.incoming.lock().unwrap().is_empty(),
        }
    }

    fn clear_pending(&self, kind: InterruptKind) {
        if kind == InterruptKind::ReceiveNotEmpty {
            self.rx_acks.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn write_data(&self, byte: u8) {
        self.tx_register_empty.store(false, Ordering::SeqCst);
        self.wire.lock().unwrap().push(byte);
    }

    fn read_data(&self) -> u8 {
        self.incoming.lock().unwrap().pop_front().unwrap_or(0)
    }

    fn set_transmit_interrupt_enabled(&self, enabled: bool) {
        if enabled {
            self.arm_calls.fetch_add(1, Ordering::SeqCst);
        }
        self.tx_irq_enabled.store(enabled, Ordering::SeqCst);
    }
}
