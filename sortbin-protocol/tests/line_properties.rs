//! Property tests for line accumulation.
//!
//! Runs on host only.

use proptest::prelude::*;
use sortbin_protocol::{Command, Line, LineReceiver, Material, LINE_TERMINATOR};

fn collect(chunks: &[&[u8]]) -> Vec<Line> {
    let mut rx = LineReceiver::new();
    let mut lines = Vec::new();
    for chunk in chunks {
        rx.feed_bytes(chunk, |line| lines.push(line));
    }
    lines
}

fn arb_line() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![
        Just(b"PLASTICO".to_vec()),
        Just(b"ORGANICO".to_vec()),
        Just(b"METAL".to_vec()),
        Just(b"METAL\r".to_vec()),
        Just(Vec::new()),
        // Anything without a terminator, including overlong lines
        proptest::collection::vec(any::<u8>().prop_filter("no terminator", |b| *b != LINE_TERMINATOR), 0..48),
    ]
}

proptest! {
    /// Splitting a stream at any point never changes the decoded lines.
    #[test]
    fn chunking_is_transparent(
        lines in proptest::collection::vec(arb_line(), 1..8),
        split in any::<prop::sample::Index>(),
    ) {
        let mut stream = Vec::new();
        for line in &lines {
            stream.extend_from_slice(line);
            stream.push(LINE_TERMINATOR);
        }

        let at = split.index(stream.len() + 1);
        let whole = collect(&[&stream[..]]);
        let chunked = collect(&[&stream[..at], &stream[at..]]);

        prop_assert_eq!(whole, chunked);
    }

    /// Byte-at-a-time delivery yields exactly one line per terminator.
    #[test]
    fn one_line_per_terminator(lines in proptest::collection::vec(arb_line(), 0..8)) {
        let mut stream = Vec::new();
        for line in &lines {
            stream.extend_from_slice(line);
            stream.push(LINE_TERMINATOR);
        }

        let singles: Vec<&[u8]> = stream.chunks(1).collect();
        let decoded = collect(&singles);

        prop_assert_eq!(decoded.len(), lines.len());
    }

    /// Only the three exact labels ever decode to a sort command.
    #[test]
    fn only_labels_are_recognized(line in proptest::collection::vec(any::<u8>(), 0..40)) {
        let mut framed = line.clone();
        framed.push(LINE_TERMINATOR);
        let decoded = collect(&[&framed[..]]);

        // An embedded terminator splits the input into several lines
        for decoded_line in decoded {
            match decoded_line.command() {
                Command::Sort(material) => {
                    prop_assert!(Material::ALL.contains(&material));
                    prop_assert_eq!(decoded_line.as_bytes(), material.label().as_bytes());
                    prop_assert!(!decoded_line.is_truncated());
                }
                Command::Unrecognized => {}
            }
        }
    }
}
