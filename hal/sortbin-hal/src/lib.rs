//! Sortbin Hardware Abstraction Layer
//!
//! This crate defines hardware abstraction traits that can be implemented
//! by chip-specific HALs. The servo driver is written against these traits
//! so the same code runs on the RP2040 and in host tests.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (sortbin-firmware)         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  sortbin-drivers (servo)                │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  sortbin-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ sortbin-hal-  │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`pwm::ServoPwm`] - Fixed-frequency pulse output for hobby servos

#![no_std]
#![deny(unsafe_code)]

pub mod pwm;

pub use pwm::{PulseWidth, ServoPwm, SERVO_PERIOD_US};
