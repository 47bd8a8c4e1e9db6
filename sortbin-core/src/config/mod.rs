//! Configuration types
//!
//! Board-agnostic configuration structures. Values are fixed at build time;
//! nothing here is persisted.

pub mod types;

pub use types::*;
