//! Inter-task signals
//!
//! Received bytes travel through the SPSC queue in `sortbin_core::rx`; this
//! signal only wakes the control task when new bytes are available.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

/// Signal that bytes were pushed onto the receive queue
pub static DATA_READY: Signal<CriticalSectionRawMutex, ()> = Signal::new();
