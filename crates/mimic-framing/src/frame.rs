//! Decoded frame structure and stream delimiters

use bytes::Bytes;

use mimic_core::Timestamp;

/// JPEG start-of-image sequence delimiting the front of every frame
pub const START_MARKER: [u8; 3] = [0xFF, 0xD8, 0xFF];

/// JPEG end-of-image sequence delimiting the back of every frame
pub const END_MARKER: [u8; 2] = [0xFF, 0xD9];

/// Maximum bytes held without producing a frame before the buffer is
/// declared runaway and discarded
pub const MAX_PENDING: usize = 32 * 1024;

/// One complete image frame extracted from the stream
///
/// Owned exclusively by the deframer until emitted; the caller owns it
/// afterward. The payload is immutable and includes both markers.
#[derive(Clone, Debug)]
pub struct Frame {
    /// Full encoded image, start and end markers inclusive
    pub payload: Bytes,
    /// Monotonically increasing sequence number, 1-based
    pub seq: u64,
    /// Capture timestamp (the feed time of the chunk that completed it)
    pub timestamp: Timestamp,
    /// Exponentially smoothed stream frame rate at emission time
    pub fps: f64,
}

impl Frame {
    /// Payload length in bytes, markers inclusive
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}
