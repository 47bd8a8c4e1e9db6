//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in sortbin-core, written against the sortbin-hal output traits:
//!
//! - Servo: hobby servo on a 50 Hz PWM output

#![no_std]
#![deny(unsafe_code)]

pub mod servo;

pub use servo::{Servo, ServoConfig, ServoConfigError};
