// tests/ring_properties.rs

//! Laws of the ring buffer and the channel overflow policy

mod common;

use std::collections::VecDeque;
use std::sync::Arc;
use std::thread;

use common::MockUart;
use irq_uart::serial::{RingBuffer, SerialChannel};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Enqueue(u8),
    Dequeue,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![any::<u8>().prop_map(Op::Enqueue), Just(Op::Dequeue)]
}

proptest! {
    /// Occupancy and order match a reference queue for any op sequence
    #[test]
    fn fifo_law(ops in prop::collection::vec(op(), 0..256)) {
        let ring = RingBuffer::<7>::new();
        let mut model = VecDeque::new();

        for op in ops {
            match op {
                Op::Enqueue(byte) => {
                    let accepted = ring.enqueue(byte);
                    prop_assert_eq!(accepted, model.len() < 7);
                    if accepted {
                        model.push_back(byte);
                    }
                }
                Op::Dequeue => {
                    prop_assert_eq!(ring.dequeue(), model.pop_front());
                }
            }
            prop_assert_eq!(ring.item_count(), model.len());
            prop_assert_eq!(ring.is_full(), model.len() == 7);
        }
    }

    /// n <= C enqueues followed by n dequeues give back the input
    #[test]
    fn round_trip(bytes in prop::collection::vec(any::<u8>(), 0..=16)) {
        let ring = RingBuffer::<16>::new();
        for &byte in &bytes {
            prop_assert!(ring.enqueue(byte));
        }
        let out: Vec<u8> = std::iter::from_fn(|| ring.dequeue()).collect();
        prop_assert_eq!(out, bytes);
    }

    /// C + 1 enqueues: C succeed, the last clears the buffer and latches
    #[test]
    fn overflow_clears_and_latches(bytes in prop::collection::vec(any::<u8>(), 9..=9)) {
        let ch = SerialChannel::<_, 8, 1>::new(MockUart::new()).unwrap();
        for (i, &byte) in bytes.iter().enumerate() {
            ch.tx_enqueue(byte);
            if i < 8 {
                prop_assert_eq!(ch.tx_count(), i + 1);
                prop_assert!(!ch.has_error());
            }
        }
        prop_assert_eq!(ch.tx_count(), 0);
        prop_assert!(ch.has_error());
    }

    /// Observers never change state
    #[test]
    fn observers_are_pure(fill in 0usize..=5, reads in 1usize..20) {
        let ring = RingBuffer::<5>::new();
        for i in 0..fill {
            ring.enqueue(i as u8);
        }
        for _ in 0..reads {
            prop_assert_eq!(ring.item_count(), fill);
            prop_assert_eq!(ring.is_full(), fill == 5);
        }
        for i in 0..fill {
            prop_assert_eq!(ring.dequeue(), Some(i as u8));
        }
    }
}

/// One producer thread, one consumer thread, no lock: every byte arrives
/// exactly once and in order.
#[test]
fn spsc_threads_preserve_order() {
    const TOTAL: usize = 200_000;
    let ring = Arc::new(RingBuffer::<13>::new());

    let producer = {
        let ring = Arc::clone(&ring);
        thread::spawn(move || {
            for i in 0..TOTAL {
                while !ring.enqueue(i as u8) {
                    std::hint::spin_loop();
                }
            }
        })
    };

    let mut expected = 0usize;
    while expected < TOTAL {
        match ring.dequeue() {
            Some(byte) => {
                assert_eq!(byte, expected as u8);
                expected += 1;
            }
            None => std::hint::spin_loop(),
        }
    }

    producer.join().unwrap();
    assert!(ring.is_empty());
}

/// Producer-side clears racing a consumer never hand out more bytes than
/// were accepted, and the ring still accepts and drains afterwards.
#[test]
fn clear_racing_consumer_keeps_occupancy_sane() {
    const ROUNDS: usize = 50_000;
    let ring = Arc::new(RingBuffer::<4>::new());

    let producer = {
        let ring = Arc::clone(&ring);
        thread::spawn(move || {
            let mut accepted = 0usize;
            for i in 0..ROUNDS {
                if ring.enqueue(i as u8) {
                    accepted += 1;
                } else {
                    ring.clear();
                }
            }
            accepted
        })
    };

    let mut seen = 0usize;
    while !producer.is_finished() || !ring.is_empty() {
        if ring.dequeue().is_some() {
            seen += 1;
        }
    }

    let accepted = producer.join().unwrap();
    assert!(seen <= accepted);
    assert!(ring.is_empty());
    assert_eq!(ring.dequeue(), None);

    for byte in 0..4 {
        assert!(ring.enqueue(byte));
    }
    assert!(ring.is_full());
    assert!(!ring.enqueue(4));
    for byte in 0..4 {
        assert_eq!(ring.dequeue(), Some(byte));
    }
}
