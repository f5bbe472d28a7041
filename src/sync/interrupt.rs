// src/sync/interrupt.rs

//! Interrupt controller abstraction.

/// A trait for controlling CPU interrupts.
///
/// This trait abstracts over the hardware-specific details of enabling and
/// disabling interrupts around a short critical section.
pub trait InterruptController {
    /// Runs `f` with interrupts masked, restoring the previous state after.
    fn without_interrupts<F, R>(f: F) -> R
    where
        F: FnOnce() -> R;
}

/// An implementation of `InterruptController` for the x86_64 architecture.
#[cfg(target_arch = "x86_64")]
#[derive(Debug)]
pub struct X64InterruptController;

#[cfg(target_arch = "x86_64")]
impl InterruptController for X64InterruptController {
    fn without_interrupts<F, R>(f: F) -> R
    where
        F: FnOnce() -> R,
    {
        x86_64::instructions::interrupts::without_interrupts(f)
    }
}

/// Controller for contexts where nothing can preempt the caller
///
/// Host-side tests and single-context bring-up code.
#[derive(Debug)]
pub struct NoPreemption;

impl InterruptController for NoPreemption {
    #[inline]
    fn without_interrupts<F, R>(f: F) -> R
    where
        F: FnOnce() -> R,
    {
        f()
    }
}
