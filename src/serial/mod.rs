// src/serial/mod.rs

//! Interrupt-driven serial transport
//!
//! Provides buffered UART communication where:
//! - the application only ever touches in-memory ring buffers
//! - the interrupt handler moves bytes between those buffers and the
//!   peripheral, one byte per condition per interrupt
//! - the transmit-empty interrupt is armed only while there is something to
//!   send
//! - a full buffer is discarded and reported through a sticky error flag
//!   instead of blocking
//!
//! # Safety and Robustness
//!
//! No lock is shared between the two contexts. Each buffer has exactly one
//! writer context and one reader context (see [`channel`]), and the ring
//! cursors are atomics, so the interrupt can preempt the foreground at any
//! instruction without deadlock.

pub mod backend;
pub mod binding;
pub mod channel;
pub mod config;
#[cfg(all(target_arch = "x86_64", feature = "uart16550"))]
pub(crate) mod constants;
mod error;
pub mod ring;
pub mod stats;
pub mod writer;

pub use backend::{InterruptKind, UartPeripheral};
#[cfg(all(target_arch = "x86_64", feature = "uart16550"))]
pub use backend::DefaultBackend;
pub use binding::{InterruptHandler, IrqBinding};
pub use channel::SerialChannel;
pub use config::{Parity, SerialConfig, StopBits, WordLength};
pub use error::{BindError, ChannelError, Direction, InitError};
pub use ring::RingBuffer;
pub use stats::{ChannelDiagnostics, ChannelStats};
pub use writer::ChannelWriter;

/// Channel over the default backend with the default capacities
#[cfg(all(target_arch = "x86_64", feature = "uart16550"))]
pub type DefaultChannel = SerialChannel<
    DefaultBackend,
    { crate::constants::DEFAULT_TX_CAPACITY },
    { crate::constants::DEFAULT_RX_CAPACITY },
>;
