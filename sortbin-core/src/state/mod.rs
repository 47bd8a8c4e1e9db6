//! Return-to-neutral state machine
//!
//! The only timed behavior of the selector: after a move, wait out the
//! dwell and park at neutral again.

pub mod return_timer;

pub use return_timer::{ReturnTimer, TimerState};
