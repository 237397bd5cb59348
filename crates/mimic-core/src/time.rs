//! Time primitives for the MIMIC pipeline
//!
//! All core logic (deframer fps estimate, One-Euro dt) consumes explicit
//! [`Timestamp`] values rather than reading the wall clock, so behavior is
//! fully deterministic under test. [`MonotonicClock`] is the one place a
//! real clock is touched.

use std::time::{Duration, Instant};

/// A point in time, in seconds from an arbitrary monotonic origin
#[derive(Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Timestamp(pub f64);

impl Timestamp {
    pub const ZERO: Timestamp = Timestamp(0.0);

    #[inline]
    pub fn from_secs_f64(secs: f64) -> Self {
        Timestamp(secs)
    }

    #[inline]
    pub fn from_millis(millis: u64) -> Self {
        Timestamp(millis as f64 / 1_000.0)
    }

    #[inline]
    pub fn as_secs_f64(self) -> f64 {
        self.0
    }

    /// Seconds elapsed since `earlier`. Negative when `earlier` is in the
    /// future of `self` (non-monotonic input is a caller concern).
    #[inline]
    pub fn seconds_since(self, earlier: Timestamp) -> f64 {
        self.0 - earlier.0
    }
}

impl std::ops::Add<Duration> for Timestamp {
    type Output = Timestamp;

    #[inline]
    fn add(self, rhs: Duration) -> Self::Output {
        Timestamp(self.0 + rhs.as_secs_f64())
    }
}

impl std::fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "t+{:.3}s", self.0)
    }
}

/// Monotonic clock anchored at construction time
/// INVARIANT: values returned by `now` never decrease
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    /// Create a clock whose zero is the current instant
    pub fn new() -> Self {
        MonotonicClock {
            origin: Instant::now(),
        }
    }

    /// Current time relative to the clock origin
    pub fn now(&self) -> Timestamp {
        Timestamp(self.origin.elapsed().as_secs_f64())
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}
