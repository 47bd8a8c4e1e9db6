//! Embassy async tasks
//!
//! Each task runs independently and communicates via the receive queue and
//! signals.

pub mod control;
pub mod serial_rx;

pub use control::control_task;
pub use serial_rx::serial_rx_task;
