//! Host UART receive task
//!
//! Moves received bytes onto the receive queue for the control task. When
//! the queue is full the remaining bytes are held and retried; the UART
//! ring buffer absorbs new arrivals meanwhile.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embassy_time::Timer;
use embedded_io_async::Read;

use sortbin_core::rx::{enqueue_available, RxProducer};

use crate::channels::DATA_READY;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 32;

/// Wait before retrying a full queue (ms)
const QUEUE_RETRY_MS: u64 = 2;

/// Serial RX task - producer side of the receive queue
#[embassy_executor::task]
pub async fn serial_rx_task(mut rx: BufferedUartRx, mut producer: RxProducer<'static>) {
    info!("Serial RX task started");

    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                let mut pending = &buf[..n];
                loop {
                    let accepted = enqueue_available(&mut producer, pending);
                    pending = &pending[accepted..];
                    DATA_READY.signal(());

                    if pending.is_empty() {
                        break;
                    }

                    trace!("RX queue full, {} bytes waiting", pending.len());
                    Timer::after_millis(QUEUE_RETRY_MS).await;
                }
            }
            Ok(_) => {
                // No bytes read, continue
            }
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}
