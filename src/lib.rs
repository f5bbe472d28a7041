// src/lib.rs
//! irq_uart - 割り込み駆動シリアル転送
//!
//! The application talks to in-memory ring buffers only; the UART interrupt
//! moves one byte per condition between those buffers and the peripheral.
//!
//! ```no_run
//! # #[cfg(all(target_arch = "x86_64", feature = "uart16550"))]
//! # fn demo() -> Result<(), irq_uart::serial::InitError> {
//! use irq_uart::arch::x86_64::Uart16550;
//! use irq_uart::serial::{SerialChannel, SerialConfig};
//!
//! let com1 = SerialChannel::<_, 256, 64>::new(Uart16550::com1())
//!     .expect("non-zero capacities");
//! com1.init(&SerialConfig::fast())?;
//!
//! com1.send_str("hello");
//! com1.send_crlf();
//! while let Some(byte) = com1.rx_dequeue() {
//!     com1.tx_enqueue(byte);
//! }
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_op_in_unsafe_fn)]
#![deny(missing_debug_implementations)]
#![warn(rust_2018_idioms)]

pub mod arch;
pub mod constants;
pub mod serial;
pub mod sync;

pub use serial::{
    ChannelError, ChannelStats, InitError, InterruptKind, IrqBinding, RingBuffer, SerialChannel,
    SerialConfig, UartPeripheral,
};
