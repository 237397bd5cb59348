//! Stateful byte-stream scanner
//!
//! The deframer accumulates incoming serial bytes and extracts complete
//! frames. It never errors on malformed input: worst case is silent frame
//! loss and a buffer reset, matching a lossy real-time sensor feed.
//!
//! Extraction decisions depend only on the bytes seen so far, never on
//! how they were chunked. Two consequences for the scan rules:
//! - When no start marker is present, the last 2 bytes are retained
//!   instead of the whole buffer being dropped: they may be the prefix of
//!   a marker split across chunks.
//! - The overflow discard removes exactly `MAX_PENDING` bytes. A frame
//!   whose inclusive length exceeds the cap is discarded the same way
//!   even when its end marker is already buffered, because it could not
//!   have survived byte-at-a-time arrival.

use bytes::{Buf, BytesMut};

use mimic_core::{MonotonicClock, Timestamp};

use crate::{Frame, END_MARKER, MAX_PENDING, START_MARKER};

/// Gain of the exponential frame-rate average
const FPS_GAIN: f64 = 0.02;

/// Converts an arbitrarily-chunked byte stream into complete frames
///
/// Single-owner, synchronous: `feed` must not be invoked reentrantly.
/// The caller (an I/O loop or callback) drives it and owns the emitted
/// frames.
pub struct Deframer {
    /// Unconsumed stream bytes, in arrival order
    buf: BytesMut,
    /// Sequence number of the last emitted frame
    last_seq: u64,
    /// Emission time of the previous frame, for the fps estimate
    last_frame_at: Option<Timestamp>,
    /// Smoothed stream frame rate
    fps: f64,
    /// Clock used by the convenience `feed` entry point
    clock: MonotonicClock,
}

enum Scan {
    /// A complete frame was sliced out
    Emitted(Frame),
    /// Bytes were discarded; the remainder deserves another pass
    Rescan,
    /// Nothing more can be extracted until more data arrives
    Wait,
}

impl Deframer {
    pub fn new() -> Self {
        Deframer {
            buf: BytesMut::new(),
            last_seq: 0,
            last_frame_at: None,
            fps: 0.0,
            clock: MonotonicClock::new(),
        }
    }

    /// Append a chunk and extract every complete frame now available,
    /// stamping with the deframer's own monotonic clock
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<Frame> {
        let now = self.clock.now();
        self.feed_at(chunk, now)
    }

    /// Append a chunk and extract every complete frame now available,
    /// stamping emitted frames with an explicit timestamp
    pub fn feed_at(&mut self, chunk: &[u8], now: Timestamp) -> Vec<Frame> {
        self.buf.extend_from_slice(chunk);

        let mut frames = Vec::new();
        loop {
            match self.scan(now) {
                Scan::Emitted(frame) => frames.push(frame),
                Scan::Rescan => continue,
                Scan::Wait => break,
            }
        }
        frames
    }

    /// One extraction pass over the pending buffer
    fn scan(&mut self, now: Timestamp) -> Scan {
        let Some(start) = find(&self.buf, &START_MARKER) else {
            // Nothing before an unseen start marker can become a frame.
            // Retain the last 2 bytes: a marker prefix may be split
            // across chunks.
            let keep = self.buf.len().min(START_MARKER.len() - 1);
            self.buf.advance(self.buf.len() - keep);
            return Scan::Wait;
        };

        if start > 0 {
            // Garbage or partial tail from a previous frame
            self.buf.advance(start);
        }

        // Scan for the end marker from offset 3 so it never overlaps the
        // start marker
        match find(&self.buf[START_MARKER.len()..], &END_MARKER) {
            Some(rel) => {
                let frame_len = START_MARKER.len() + rel + END_MARKER.len();
                if frame_len > MAX_PENDING {
                    self.buf.advance(MAX_PENDING);
                    Scan::Rescan
                } else {
                    let payload = self.buf.split_to(frame_len).freeze();
                    Scan::Emitted(self.emit(payload, now))
                }
            }
            None if self.buf.len() >= MAX_PENDING => {
                // Runaway or corrupt stream; resume from the next start
                // marker in whatever follows
                self.buf.advance(MAX_PENDING);
                Scan::Rescan
            }
            None => Scan::Wait,
        }
    }

    fn emit(&mut self, payload: bytes::Bytes, now: Timestamp) -> Frame {
        self.last_seq += 1;

        if let Some(prev) = self.last_frame_at {
            let dt = now.seconds_since(prev);
            // Zero or negative deltas (same-feed siblings, clock trouble)
            // skip the update
            if dt > 0.0 {
                self.fps = FPS_GAIN * (1.0 / dt) + (1.0 - FPS_GAIN) * self.fps;
            }
        }
        self.last_frame_at = Some(now);

        Frame {
            payload,
            seq: self.last_seq,
            timestamp: now,
            fps: self.fps,
        }
    }

    /// Bytes currently buffered awaiting a complete frame
    pub fn pending_len(&self) -> usize {
        self.buf.len()
    }

    /// Total frames emitted since construction
    pub fn frames_emitted(&self) -> u64 {
        self.last_seq
    }

    /// Current smoothed stream frame rate
    pub fn fps(&self) -> f64 {
        self.fps
    }
}

impl Default for Deframer {
    fn default() -> Self {
        Self::new()
    }
}

/// First occurrence of `needle` in `haystack`
fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if haystack.len() < needle.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}
