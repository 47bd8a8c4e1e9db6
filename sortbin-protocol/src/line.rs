//! Line accumulation for the serial control protocol.
//!
//! Bytes may arrive in arbitrary chunks (down to single bytes). The
//! [`LineReceiver`] buffers them until the terminator arrives and then
//! yields one [`Line`] with surrounding whitespace and control characters
//! stripped.
//!
//! Padding never counts toward capacity: leading padding is skipped and a
//! run of padding is only stored once more content follows it.
//!
//! Overflow: at most [`LINE_CAPACITY`] content bytes are kept. Anything
//! beyond is discarded, the line is marked truncated, and the terminator
//! still completes it. Truncated lines never decode to a recognized command.

use heapless::Vec;

use crate::command::Command;

/// Line terminator byte
pub const LINE_TERMINATOR: u8 = b'\n';

/// Maximum buffered line length in bytes
pub const LINE_CAPACITY: usize = 32;

/// A completed, trimmed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    bytes: Vec<u8, LINE_CAPACITY>,
    truncated: bool,
}

impl Line {
    /// Line content without terminator
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Check if the line content was longer than [`LINE_CAPACITY`]
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Check if the line has no content after trimming
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Decode the line into a command
    pub fn command(&self) -> Command {
        if self.truncated {
            return Command::Unrecognized;
        }
        Command::parse(&self.bytes)
    }
}

fn is_padding(byte: u8) -> bool {
    byte.is_ascii_whitespace() || byte.is_ascii_control()
}

/// Accumulates bytes into terminator-delimited lines
#[derive(Debug, Clone, Default)]
pub struct LineReceiver {
    /// Content so far, never starting or ending with padding
    buffer: Vec<u8, LINE_CAPACITY>,
    /// Padding seen after the last content byte
    gap: Vec<u8, LINE_CAPACITY>,
    /// The gap outgrew its own buffer
    gap_overflowed: bool,
    /// Content did not fit
    overflowed: bool,
}

impl LineReceiver {
    /// Create an empty receiver
    pub const fn new() -> Self {
        Self {
            buffer: Vec::new(),
            gap: Vec::new(),
            gap_overflowed: false,
            overflowed: false,
        }
    }

    /// Discard any partially received line
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.gap.clear();
        self.gap_overflowed = false;
        self.overflowed = false;
    }

    /// Number of bytes buffered for the current (unterminated) line
    pub fn pending(&self) -> usize {
        self.buffer.len() + self.gap.len()
    }

    /// Feed a single byte
    ///
    /// Returns `Some(line)` when `byte` is the terminator, `None` otherwise.
    pub fn feed(&mut self, byte: u8) -> Option<Line> {
        if byte == LINE_TERMINATOR {
            let line = Line {
                bytes: self.buffer.clone(),
                truncated: self.overflowed,
            };
            self.reset();
            return Some(line);
        }

        if is_padding(byte) {
            // Leading padding is dropped outright
            if !self.buffer.is_empty() && self.gap.push(byte).is_err() {
                self.gap_overflowed = true;
            }
            return None;
        }

        if !self.gap.is_empty() {
            // Interior padding is content; heapless rejects a partial extend
            if self.gap_overflowed || self.buffer.extend_from_slice(&self.gap).is_err() {
                self.overflowed = true;
            }
            self.gap.clear();
            self.gap_overflowed = false;
        }

        if self.buffer.push(byte).is_err() {
            self.overflowed = true;
        }
        None
    }

    /// Feed a chunk of bytes, calling `on_line` for every completed line
    pub fn feed_bytes(&mut self, bytes: &[u8], mut on_line: impl FnMut(Line)) {
        for &byte in bytes {
            if let Some(line) = self.feed(byte) {
                on_line(line);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Material;

    fn feed_all(rx: &mut LineReceiver, bytes: &[u8]) -> Vec<Line, 8> {
        let mut lines = Vec::new();
        rx.feed_bytes(bytes, |line| {
            lines.push(line).unwrap();
        });
        lines
    }

    #[test]
    fn test_single_line() {
        let mut rx = LineReceiver::new();
        let lines = feed_all(&mut rx, b"PLASTICO\n");

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].as_bytes(), b"PLASTICO");
        assert_eq!(lines[0].command(), Command::Sort(Material::Plastic));
        assert_eq!(rx.pending(), 0);
    }

    #[test]
    fn test_partial_line_stays_buffered() {
        let mut rx = LineReceiver::new();
        assert!(feed_all(&mut rx, b"PLAS").is_empty());
        assert_eq!(rx.pending(), 4);

        let lines = feed_all(&mut rx, b"TICO\n");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].as_bytes(), b"PLASTICO");
    }

    #[test]
    fn test_crlf_and_padding_stripped() {
        let mut rx = LineReceiver::new();
        let lines = feed_all(&mut rx, b"  METAL\t\r\n");

        assert_eq!(lines[0].as_bytes(), b"METAL");
        assert_eq!(lines[0].command(), Command::Sort(Material::Metal));
    }

    #[test]
    fn test_empty_line() {
        let mut rx = LineReceiver::new();
        let lines = feed_all(&mut rx, b"\n\r\n");

        assert_eq!(lines.len(), 2);
        assert!(lines[0].is_empty());
        assert!(lines[1].is_empty());
        assert_eq!(lines[0].command(), Command::Unrecognized);
    }

    #[test]
    fn test_multiple_lines_in_one_chunk() {
        let mut rx = LineReceiver::new();
        let lines = feed_all(&mut rx, b"METAL\nORGANICO\nfoo\n");

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].command(), Command::Sort(Material::Metal));
        assert_eq!(lines[1].command(), Command::Sort(Material::Organic));
        assert_eq!(lines[2].command(), Command::Unrecognized);
    }

    #[test]
    fn test_overflow_truncates_and_completes() {
        let mut rx = LineReceiver::new();
        let mut long = [b'X'; LINE_CAPACITY + 10];
        long[LINE_CAPACITY + 9] = LINE_TERMINATOR;

        let lines = feed_all(&mut rx, &long);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].is_truncated());
        assert_eq!(lines[0].as_bytes().len(), LINE_CAPACITY);
        assert_eq!(lines[0].command(), Command::Unrecognized);

        // Receiver is usable again after the overflowed line
        assert_eq!(rx.pending(), 0);
        let lines = feed_all(&mut rx, b"METAL\n");
        assert_eq!(lines[0].command(), Command::Sort(Material::Metal));
    }

    #[test]
    fn test_padding_does_not_count_toward_capacity() {
        let mut trailing = [b' '; 5 + 30 + 1];
        trailing[..5].copy_from_slice(b"METAL");
        trailing[35] = LINE_TERMINATOR;

        let mut leading = [b' '; 28 + 5 + 1];
        leading[28..].copy_from_slice(b"METAL\n");

        let mut carriage = [b'\r'; 5 + 28 + 1];
        carriage[..5].copy_from_slice(b"METAL");
        carriage[33] = LINE_TERMINATOR;

        for data in [&trailing[..], &leading[..], &carriage[..]] {
            let mut rx = LineReceiver::new();
            let lines = feed_all(&mut rx, data);

            assert_eq!(lines.len(), 1);
            assert_eq!(lines[0].as_bytes(), b"METAL");
            assert!(!lines[0].is_truncated());
            assert_eq!(lines[0].command(), Command::Sort(Material::Metal));
        }
    }

    #[test]
    fn test_interior_padding_is_kept() {
        let mut rx = LineReceiver::new();
        let lines = feed_all(&mut rx, b" ME TAL \n");

        assert_eq!(lines[0].as_bytes(), b"ME TAL");
        assert_eq!(lines[0].command(), Command::Unrecognized);
    }

    #[test]
    fn test_content_past_long_gap_overflows() {
        // Content on both sides of a wide gap does not fit
        let mut rx = LineReceiver::new();
        let mut data = [b' '; 5 + 40 + 2];
        data[..5].copy_from_slice(b"METAL");
        data[45] = b'X';
        data[46] = LINE_TERMINATOR;

        let lines = feed_all(&mut rx, &data);
        assert!(lines[0].is_truncated());
        assert_eq!(lines[0].command(), Command::Unrecognized);
    }

    #[test]
    fn test_reset_discards_partial_line() {
        let mut rx = LineReceiver::new();
        feed_all(&mut rx, b"garbage");
        rx.reset();

        let lines = feed_all(&mut rx, b"ORGANICO\n");
        assert_eq!(lines[0].as_bytes(), b"ORGANICO");
    }

    #[test]
    fn test_non_utf8_line() {
        let mut rx = LineReceiver::new();
        let lines = feed_all(&mut rx, &[0xC3, 0x28, LINE_TERMINATOR]);

        assert_eq!(lines[0].as_bytes(), &[0xC3, 0x28]);
        assert_eq!(lines[0].command(), Command::Unrecognized);
    }
}
