//! Board-agnostic core logic for the bin selector firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (actuator, clock)
//! - Return-to-neutral timer state machine
//! - Receive queue between the UART path and the control loop
//! - The control-loop context that dispatches commands
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod rx;
pub mod sorter;
pub mod state;
pub mod traits;

pub use sorter::{Outcome, ReplySink, Sorter, SorterStats};
