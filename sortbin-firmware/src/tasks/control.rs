//! Control task
//!
//! Consumer side of the receive queue. Each iteration dispatches completed
//! lines one at a time, writing each acknowledgment to the UART before the
//! next line is examined, then checks whether the dwell has elapsed.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::uart::BufferedUartTx;
use embassy_time::Timer;
use embedded_io_async::Write;
use heapless::Vec;

use sortbin_core::rx::RxConsumer;
use sortbin_core::traits::Clock;
use sortbin_core::{Outcome, ReplySink, Sorter};
use sortbin_drivers::Servo;
use sortbin_hal_rp2040::pwm::RpServoPwm;
use sortbin_protocol::{Reply, REPLY_CAPACITY};

use crate::channels::DATA_READY;
use crate::clock::EmbassyClock;

/// Timer poll interval when no bytes arrive (ms)
const CONTROL_TICK_MS: u64 = 5;

/// Interval between diagnostic counter reports (ms)
const STATS_INTERVAL_MS: u64 = 60_000;

/// Outbound bytes buffered between flushes
const OUTBOX_LEN: usize = 2 * REPLY_CAPACITY;

/// The servo as wired on this board
pub type SelectorServo = Servo<RpServoPwm>;

/// Encoded replies waiting for the UART
struct Outbox {
    buf: Vec<u8, OUTBOX_LEN>,
}

impl Outbox {
    const fn new() -> Self {
        Self { buf: Vec::new() }
    }

    async fn flush(&mut self, tx: &mut BufferedUartTx) {
        if self.buf.is_empty() {
            return;
        }
        if let Err(e) = tx.write_all(&self.buf).await {
            warn!("UART write error: {:?}", e);
        }
        self.buf.clear();
    }
}

impl ReplySink for Outbox {
    fn send(&mut self, reply: Reply) {
        let line = reply.encode();
        if self.buf.extend_from_slice(line.as_bytes()).is_err() {
            warn!("Outbox full, dropping reply {:?}", reply);
        }
    }
}

/// Control task - owns the selector state
#[embassy_executor::task]
pub async fn control_task(
    mut sorter: Sorter<SelectorServo>,
    mut rx: RxConsumer<'static>,
    mut tx: BufferedUartTx,
) {
    info!("Control task started");

    let clock = EmbassyClock;
    let mut outbox = Outbox::new();

    sorter.start(&mut outbox);
    outbox.flush(&mut tx).await;
    info!("Parked at neutral ({} deg)", sorter.config().neutral().degrees());

    let mut last_report_ms = clock.now_ms();

    loop {
        while let Some(outcome) = sorter.service_rx(&mut rx, clock.now_ms(), &mut outbox) {
            log_outcome(outcome);
            outbox.flush(&mut tx).await;
        }

        if sorter.poll(clock.now_ms(), &mut outbox) {
            info!("Dwell elapsed, returned to neutral");
            outbox.flush(&mut tx).await;
        }

        let now_ms = clock.now_ms();
        if now_ms.saturating_sub(last_report_ms) >= STATS_INTERVAL_MS {
            debug!("Stats: {:?}", sorter.stats());
            last_report_ms = now_ms;
        }

        match select(DATA_READY.wait(), Timer::after_millis(CONTROL_TICK_MS)).await {
            Either::First(()) => {
                debug!("RX data ready, {} bytes pending", sorter.pending_bytes());
            }
            Either::Second(()) => {
                // Tick, poll the dwell
            }
        }
    }
}

fn log_outcome(outcome: Outcome) {
    match outcome {
        Outcome::Moved { material, position } => {
            info!("{:?} -> {} deg", material, position.degrees());
        }
        Outcome::Ignored { truncated: true } => {
            warn!("Line overflow, ignored");
        }
        Outcome::Ignored { truncated: false } => {
            warn!("Unrecognized command, ignored");
        }
    }
}
