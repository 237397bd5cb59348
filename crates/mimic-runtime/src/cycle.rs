//! Prediction cycle gating
//!
//! One prediction cycle (inference + filtering + send) runs at a time.
//! A frame arriving while a cycle is in flight is dropped, not queued:
//! queuing would let latency grow without bound on a slow inference
//! backend, and a newer frame is always on its way.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

/// Non-blocking busy flag with drop accounting
///
/// Clone the `Arc` into whatever task drives the loop; `try_begin` from
/// any of them, hold the guard across the downstream send.
#[derive(Debug, Default)]
pub struct CycleGate {
    busy: AtomicBool,
    started: AtomicU64,
    rejected: AtomicU64,
}

impl CycleGate {
    pub fn new() -> Arc<Self> {
        Arc::new(CycleGate::default())
    }

    /// Begin a cycle if none is in flight
    ///
    /// Returns `None` (and counts the rejection) when busy. The cycle
    /// ends when the returned guard drops.
    pub fn try_begin(self: &Arc<Self>) -> Option<CycleGuard> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            self.started.fetch_add(1, Ordering::Relaxed);
            Some(CycleGuard {
                gate: Arc::clone(self),
            })
        } else {
            self.rejected.fetch_add(1, Ordering::Relaxed);
            None
        }
    }

    /// True while a cycle is in flight
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Cycles begun since construction
    pub fn cycles_started(&self) -> u64 {
        self.started.load(Ordering::Relaxed)
    }

    /// Frames dropped because a cycle was in flight
    pub fn cycles_rejected(&self) -> u64 {
        self.rejected.load(Ordering::Relaxed)
    }
}

/// RAII token for one open cycle
pub struct CycleGuard {
    gate: Arc<CycleGate>,
}

impl Drop for CycleGuard {
    fn drop(&mut self) {
        self.gate.busy.store(false, Ordering::Release);
    }
}
