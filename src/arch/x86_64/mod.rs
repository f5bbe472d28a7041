// src/arch/x86_64/mod.rs

#[cfg(feature = "uart16550")]
pub mod uart16550;

#[cfg(feature = "uart16550")]
pub use uart16550::Uart16550;
