//! Receive queue between the UART path and the control loop
//!
//! Bytes are produced by the UART receive path and consumed by the control
//! loop. The two sides share nothing but this single-producer,
//! single-consumer queue, so the line buffer itself is only ever touched by
//! the consumer.
//!
//! The queue never drops: when it is full the producer keeps the remaining
//! bytes and retries after the consumer has drained some.

use heapless::spsc::{Consumer, Producer, Queue};

/// Queue capacity in bytes (one slot is reserved by the ring buffer)
pub const RX_QUEUE_LEN: usize = 64;

/// Backing storage for the receive queue
pub type RxQueue = Queue<u8, RX_QUEUE_LEN>;

/// UART side of the receive queue
pub type RxProducer<'a> = Producer<'a, u8, RX_QUEUE_LEN>;

/// Control-loop side of the receive queue
pub type RxConsumer<'a> = Consumer<'a, u8, RX_QUEUE_LEN>;

/// Enqueue as many bytes as fit
///
/// Returns the number of bytes accepted; the caller must retry with
/// `&bytes[accepted..]` once the consumer has made room.
pub fn enqueue_available(producer: &mut RxProducer<'_>, bytes: &[u8]) -> usize {
    let mut accepted = 0;
    for &byte in bytes {
        if producer.enqueue(byte).is_err() {
            break;
        }
        accepted += 1;
    }
    accepted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enqueue_and_drain() {
        let mut queue = RxQueue::new();
        let (mut producer, mut consumer) = queue.split();

        assert_eq!(enqueue_available(&mut producer, b"METAL\n"), 6);
        let mut drained = heapless::Vec::<u8, 8>::new();
        while let Some(byte) = consumer.dequeue() {
            drained.push(byte).unwrap();
        }
        assert_eq!(&drained[..], b"METAL\n");
    }

    #[test]
    fn test_full_queue_reports_partial_accept() {
        let mut queue = RxQueue::new();
        let (mut producer, mut consumer) = queue.split();

        let data = [b'x'; RX_QUEUE_LEN + 8];
        let accepted = enqueue_available(&mut producer, &data);
        assert_eq!(accepted, RX_QUEUE_LEN - 1);

        // Nothing more fits until the consumer drains
        assert_eq!(enqueue_available(&mut producer, &data[accepted..]), 0);
        consumer.dequeue();
        assert_eq!(enqueue_available(&mut producer, &data[accepted..]), 1);
    }
}
