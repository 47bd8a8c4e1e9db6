//! Millisecond clock backed by the embassy time driver

use embassy_time::Instant;
use sortbin_core::traits::Clock;

/// Uptime clock
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_ms(&self) -> u64 {
        Instant::now().as_millis()
    }
}
