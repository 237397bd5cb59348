//! Serial stream simulation
//!
//! Builds byte streams the way a flaky tracker device produces them:
//! valid frames interleaved with connection noise and torn partials.
//! Garbage and frame bodies never contain 0xFF, so the simulator knows
//! exactly which frames a correct deframer must emit.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use mimic_framing::{END_MARKER, START_MARKER};

/// Composable stream builder with a known expected outcome
pub struct StreamSimulator {
    rng: StdRng,
    stream: Vec<u8>,
    expected: Vec<Vec<u8>>,
}

impl StreamSimulator {
    pub fn with_seed(seed: u64) -> Self {
        StreamSimulator {
            rng: StdRng::seed_from_u64(seed),
            stream: Vec::new(),
            expected: Vec::new(),
        }
    }

    /// Append connection noise (never forms a marker)
    pub fn push_garbage(&mut self, len: usize) -> &mut Self {
        for _ in 0..len {
            self.stream.push(self.rng.gen_range(0x00..0xF0));
        }
        self
    }

    /// Append a complete frame with a random marker-free body
    pub fn push_frame(&mut self, body_len: usize) -> &mut Self {
        let mut frame = START_MARKER.to_vec();
        for _ in 0..body_len {
            frame.push(self.rng.gen_range(0x00..0xF0));
        }
        frame.extend_from_slice(&END_MARKER);

        self.stream.extend_from_slice(&frame);
        self.expected.push(frame);
        self
    }

    /// Append a torn frame: a start marker and body with no end marker,
    /// as if the device reset mid-transmission
    pub fn push_torn_frame(&mut self, body_len: usize) -> &mut Self {
        self.stream.extend_from_slice(&START_MARKER);
        for _ in 0..body_len {
            self.stream.push(self.rng.gen_range(0x00..0xF0));
        }
        self
    }

    /// The composed stream
    pub fn bytes(&self) -> &[u8] {
        &self.stream
    }

    /// Frames a correct deframer must emit, in order
    ///
    /// A torn frame swallows everything up to the next complete frame's
    /// end marker, so expectations only hold when no complete frame
    /// follows a torn one; the builder leaves that discipline to the
    /// test author.
    pub fn expected_frames(&self) -> &[Vec<u8>] {
        &self.expected
    }
}

/// Replays a byte stream in chunks
pub struct Chunker<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Chunker<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Chunker { bytes, offset: 0 }
    }

    /// Next chunk of at most `max` bytes, sized by `rng`
    pub fn next_random(&mut self, rng: &mut StdRng, max: usize) -> Option<&'a [u8]> {
        if self.offset >= self.bytes.len() {
            return None;
        }
        let size = rng.gen_range(1..=max).min(self.bytes.len() - self.offset);
        let chunk = &self.bytes[self.offset..self.offset + size];
        self.offset += size;
        Some(chunk)
    }

    /// Next chunk of exactly `size` bytes (less at the tail)
    pub fn next_fixed(&mut self, size: usize) -> Option<&'a [u8]> {
        if self.offset >= self.bytes.len() {
            return None;
        }
        let size = size.min(self.bytes.len() - self.offset);
        let chunk = &self.bytes[self.offset..self.offset + size];
        self.offset += size;
        Some(chunk)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mimic_core::Timestamp;
    use mimic_framing::Deframer;

    #[test]
    fn test_simulated_frames_are_recovered() {
        let mut sim = StreamSimulator::with_seed(7);
        sim.push_garbage(32)
            .push_frame(256)
            .push_garbage(5)
            .push_frame(64)
            .push_frame(0);

        let mut deframer = Deframer::new();
        let frames = deframer.feed_at(sim.bytes(), Timestamp::ZERO);

        let payloads: Vec<_> = frames.iter().map(|f| f.payload.to_vec()).collect();
        assert_eq!(payloads, sim.expected_frames());
    }

    #[test]
    fn test_chunker_covers_stream_exactly() {
        let mut sim = StreamSimulator::with_seed(11);
        sim.push_frame(100).push_garbage(10).push_frame(50);

        let mut rng = StdRng::seed_from_u64(3);
        let mut chunker = Chunker::new(sim.bytes());
        let mut reassembled = Vec::new();
        while let Some(chunk) = chunker.next_random(&mut rng, 13) {
            reassembled.extend_from_slice(chunk);
        }

        assert_eq!(reassembled, sim.bytes());
    }

    #[test]
    fn test_torn_frame_emits_nothing() {
        let mut sim = StreamSimulator::with_seed(23);
        sim.push_torn_frame(512);

        let mut deframer = Deframer::new();
        assert!(deframer.feed_at(sim.bytes(), Timestamp::ZERO).is_empty());
    }
}
