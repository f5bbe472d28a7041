// src/sync/mod.rs

//! Synchronization primitives
//!
//! The serial core itself is lock-free. The only critical sections are the
//! short register read-modify-write sequences inside peripheral adapters,
//! which mask interrupts through [`interrupt::InterruptController`] instead
//! of taking a lock the interrupt handler could also need.

pub mod interrupt;

pub use interrupt::{InterruptController, NoPreemption};
#[cfg(target_arch = "x86_64")]
pub use interrupt::X64InterruptController;
