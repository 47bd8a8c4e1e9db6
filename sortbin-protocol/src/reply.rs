//! Outbound replies
//!
//! Only [`Reply::Ack`] is part of the protocol contract. Status lines are
//! informational; hosts must skip any line that is not the acknowledgment.

use core::fmt::Write;

use heapless::String;

/// Acknowledgment token, sent once per received line
pub const ACK_TOKEN: &str = "OK";

/// Maximum encoded reply length, terminator included
pub const REPLY_CAPACITY: usize = 32;

/// Lines sent from the selector to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reply {
    /// A command line was fully processed
    Ack,
    /// Startup complete, selector parked at `neutral`
    Ready { neutral: u8 },
    /// Dwell elapsed, selector returned to `angle`
    Returned { angle: u8 },
}

impl Reply {
    /// Encode this reply as one terminated line
    pub fn encode(&self) -> String<REPLY_CAPACITY> {
        let mut line = String::new();
        // Longest line is "READY neutral=255\n", well under capacity
        let _ = match self {
            Reply::Ack => writeln!(line, "{}", ACK_TOKEN),
            Reply::Ready { neutral } => writeln!(line, "READY neutral={}", neutral),
            Reply::Returned { angle } => writeln!(line, "NEUTRAL {}", angle),
        };
        line
    }

    /// Check whether a received line is the acknowledgment
    ///
    /// Surrounding whitespace (including a trailing `\r\n`) is ignored.
    pub fn is_ack(line: &str) -> bool {
        line.trim() == ACK_TOKEN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ack_encoding() {
        assert_eq!(Reply::Ack.encode().as_str(), "OK\n");
    }

    #[test]
    fn test_status_lines() {
        assert_eq!(Reply::Ready { neutral: 90 }.encode().as_str(), "READY neutral=90\n");
        assert_eq!(Reply::Returned { angle: 90 }.encode().as_str(), "NEUTRAL 90\n");
        assert_eq!(
            Reply::Ready { neutral: 255 }.encode().as_str(),
            "READY neutral=255\n"
        );
    }

    #[test]
    fn test_status_lines_are_not_acks() {
        assert!(!Reply::is_ack(Reply::Ready { neutral: 90 }.encode().as_str()));
        assert!(!Reply::is_ack(Reply::Returned { angle: 0 }.encode().as_str()));
    }

    #[test]
    fn test_is_ack_trims() {
        assert!(Reply::is_ack("OK"));
        assert!(Reply::is_ack("OK\r\n"));
        assert!(Reply::is_ack(Reply::Ack.encode().as_str()));
        assert!(!Reply::is_ack("ok"));
        assert!(!Reply::is_ack(""));
    }
}
