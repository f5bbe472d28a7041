// src/serial/ring.rs

//! Fixed-capacity FIFO ring buffer for bytes
//!
//! The buffer is shared between exactly one producer context and one
//! consumer context without a lock:
//! - only the producer stores to `tail`
//! - the consumer advances `head` with a compare-and-swap, so a `clear()`
//!   that races with an in-flight dequeue makes the dequeue retry instead of
//!   corrupting the occupancy
//! - slots are atomic bytes, a stale read is discarded by the failed swap
//!
//! Cursors run freely over `0..WRAP`, the largest multiple of `N` that fits
//! in a `usize`. `head == tail` means empty and a distance of `N` means full,
//! without a separate count field and for any `N`. A suspended dequeue can
//! only be fooled by its head coming back round after `WRAP` cursor steps,
//! which overflow-driven clears cannot reach in practice.
//!
//! Storage is an inline array, so a ring can live in a `static` and no
//! operation ever allocates.

use core::sync::atomic::{AtomicU8, AtomicUsize, Ordering};

/// Bounded single-producer/single-consumer byte queue
#[derive(Debug)]
pub struct RingBuffer<const N: usize> {
    slots: [AtomicU8; N],
    head: AtomicUsize,
    tail: AtomicUsize,
}

impl<const N: usize> RingBuffer<N> {
    /// Cursor modulus, a multiple of `N` so slot mapping stays contiguous
    const WRAP: usize = if N == 0 { 1 } else { N * (usize::MAX / N) };

    /// Create an empty ring buffer
    pub const fn new() -> Self {
        Self {
            slots: [const { AtomicU8::new(0) }; N],
            head: AtomicUsize::new(0),
            tail: AtomicUsize::new(0),
        }
    }

    /// Fixed capacity of the buffer
    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Append `item` at the tail
    ///
    /// Returns `false` and leaves the buffer untouched when it is full.
    /// Producer side only.
    pub fn enqueue(&self, item: u8) -> bool {
        let tail = self.tail.load(Ordering::Relaxed);
        let head = self.head.load(Ordering::Acquire);
        if Self::distance(head, tail) >= N {
            return false;
        }

        self.slots[Self::slot(tail)].store(item, Ordering::Relaxed);
        self.tail.store(Self::advance(tail), Ordering::Release);
        true
    }

    /// Remove and return the item at the head
    ///
    /// Returns `None` when the buffer is empty. Consumer side only.
    pub fn dequeue(&self) -> Option<u8> {
        let mut head = self.head.load(Ordering::Acquire);
        loop {
            let tail = self.tail.load(Ordering::Acquire);
            if head == tail {
                return None;
            }

            let item = self.slots[Self::slot(head)].load(Ordering::Relaxed);
            match self.head.compare_exchange_weak(
                head,
                Self::advance(head),
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return Some(item),
                // cleared (or spurious failure) underneath us, retry
                Err(current) => head = current,
            }
        }
    }

    /// Current occupancy, `0..=N`
    ///
    /// From the context that does not own the opposite cursor this is a
    /// snapshot that may already be stale.
    #[inline]
    pub fn item_count(&self) -> usize {
        let head = self.head.load(Ordering::Acquire);
        let tail = self.tail.load(Ordering::Acquire);
        Self::distance(head, tail).min(N)
    }

    /// Unclamped cursor distance
    #[cfg(test)]
    fn raw_distance(&self) -> usize {
        Self::distance(self.head.load(Ordering::Acquire), self.tail.load(Ordering::Acquire))
    }

    /// `true` when `item_count() == N`
    #[inline]
    pub fn is_full(&self) -> bool {
        self.item_count() == N
    }

    /// `true` when nothing is buffered
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.item_count() == 0
    }

    /// Discard every buffered item immediately
    ///
    /// Moves `head` forward to the current `tail`. The head is never moved
    /// backwards, so a clear racing with another clear cannot resurrect
    /// stale bytes.
    pub fn clear(&self) {
        let tail = self.tail.load(Ordering::Acquire);
        let mut head = self.head.load(Ordering::Acquire);
        while head != tail && Self::distance(head, tail) <= N {
            match self.head.compare_exchange_weak(
                head,
                tail,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => break,
                Err(current) => head = current,
            }
        }
    }

    #[inline]
    const fn distance(head: usize, tail: usize) -> usize {
        if tail >= head {
            tail - head
        } else {
            tail + (Self::WRAP - head)
        }
    }

    #[inline]
    const fn advance(cursor: usize) -> usize {
        if cursor + 1 == Self::WRAP { 0 } else { cursor + 1 }
    }

    #[inline]
    const fn slot(cursor: usize) -> usize {
        cursor % N
    }
}

impl<const N: usize> Default for RingBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
