//! Deframer fuzzing: arbitrary bytes under arbitrary chunking must never
//! panic, and must emit exactly the frames a single contiguous feed
//! emits.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use mimic_core::Timestamp;
use mimic_framing::Deframer;

#[derive(Arbitrary, Debug)]
struct Input {
    stream: Vec<u8>,
    chunk_sizes: Vec<u8>,
}

fuzz_target!(|input: Input| {
    let mut whole = Deframer::new();
    let expected: Vec<_> = whole
        .feed_at(&input.stream, Timestamp::ZERO)
        .into_iter()
        .map(|f| (f.seq, f.payload))
        .collect();

    let mut chunked = Deframer::new();
    let mut got = Vec::new();
    let mut offset = 0;
    let mut i = 0;
    while offset < input.stream.len() {
        let raw = input
            .chunk_sizes
            .get(i % input.chunk_sizes.len().max(1))
            .copied()
            .unwrap_or(0);
        let size = (raw as usize % 64 + 1).min(input.stream.len() - offset);

        got.extend(
            chunked
                .feed_at(&input.stream[offset..offset + size], Timestamp::ZERO)
                .into_iter()
                .map(|f| (f.seq, f.payload)),
        );
        offset += size;
        i += 1;
    }

    assert_eq!(got, expected);
});
