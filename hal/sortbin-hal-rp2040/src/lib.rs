//! RP2040-specific HAL for the bin selector firmware
//!
//! This crate provides RP2040-specific implementations of the shared
//! `sortbin-hal` traits:
//!
//! - Servo pulse output on a PWM slice (implements `sortbin_hal::ServoPwm`)
//! - Pin-number to PWM slice/channel mapping for config-driven setup

#![no_std]

pub mod pwm;

// Re-export shared traits from sortbin-hal for convenience
pub use sortbin_hal::{PulseWidth, ServoPwm};
