//! Sortbin Serial Control Protocol
//!
//! This crate defines the text protocol between the classification host
//! (camera + AI pipeline) and the bin selector. The protocol is designed
//! for simplicity: one command per line, one acknowledgment per line.
//!
//! # Protocol Overview
//!
//! Both directions are ASCII lines terminated by `\n` at 9600 baud:
//! ```text
//! host  ──▶  PLASTICO\n
//! host  ◀──  OK\n
//! ...   (dwell elapses)
//! host  ◀──  NEUTRAL 90\n      (status, informational only)
//! ```
//!
//! Recognized commands are `PLASTICO`, `ORGANICO` and `METAL` (exact,
//! case-sensitive). Anything else is ignored but still acknowledged, so the
//! host can always treat `OK` as "ready for the next command".

#![no_std]
#![deny(unsafe_code)]

pub mod command;
pub mod line;
pub mod reply;

pub use command::{Command, Material};
pub use line::{Line, LineReceiver, LINE_CAPACITY, LINE_TERMINATOR};
pub use reply::{Reply, ACK_TOKEN, REPLY_CAPACITY};
