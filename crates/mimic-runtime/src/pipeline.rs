//! The frame-to-update pipeline
//!
//! Bytes in, named float updates out. Inference is an external
//! collaborator behind [`Predictor`]; a failing prediction skips the
//! cycle and the loop keeps running.

use std::sync::Arc;

use mimic_core::{AppConfig, ChannelUpdate, FilterParams, MimicResult, Timestamp, CHANNEL_COUNT};
use mimic_filter::{CalibrationTracker, FilterBank};
use mimic_framing::{Deframer, Frame};

use crate::CycleGate;

/// Opaque inference step: image frame in, one float per channel out
pub trait Predictor {
    fn predict(&mut self, frame: &Frame) -> MimicResult<Vec<f32>>;
}

/// Counters for the host's diagnostics surface
#[derive(Clone, Debug, Default)]
pub struct PipelineStats {
    pub frames_in: u64,
    pub cycles_run: u64,
    pub inference_failures: u64,
    pub length_mismatches: u64,
}

/// Owns the deframer, filter bank, and calibration tracker, and applies
/// the configured processing order to each frame
pub struct Pipeline {
    config: AppConfig,
    deframer: Deframer,
    bank: FilterBank,
    calibration: CalibrationTracker,
    gate: Arc<CycleGate>,
    stats: PipelineStats,
}

impl Pipeline {
    pub fn new(config: AppConfig) -> Self {
        let bank = FilterBank::new(config.filter_params);
        let calibration =
            CalibrationTracker::from_ranges(config.normalized_ranges(), config.calibrated);

        Pipeline {
            config,
            deframer: Deframer::new(),
            bank,
            calibration,
            gate: CycleGate::new(),
            stats: PipelineStats::default(),
        }
    }

    /// Feed raw serial bytes; returns every frame completed by them
    pub fn ingest(&mut self, chunk: &[u8]) -> Vec<Frame> {
        let frames = self.deframer.feed(chunk);
        self.stats.frames_in += frames.len() as u64;
        frames
    }

    /// `ingest` with an explicit timestamp (tests, replay)
    pub fn ingest_at(&mut self, chunk: &[u8], now: Timestamp) -> Vec<Frame> {
        let frames = self.deframer.feed_at(chunk, now);
        self.stats.frames_in += frames.len() as u64;
        frames
    }

    /// Run one prediction cycle over a frame
    ///
    /// Returns `None` when the cycle produced nothing to send: inference
    /// failed (logged, loop continues) or returned the wrong channel
    /// count. Gating against overlapping cycles is the caller's job via
    /// [`Pipeline::gate`]; hold the guard across the downstream send.
    pub fn process<P: Predictor>(
        &mut self,
        frame: &Frame,
        predictor: &mut P,
    ) -> Option<ChannelUpdate> {
        let raw = match predictor.predict(frame) {
            Ok(values) => values,
            Err(e) => {
                self.stats.inference_failures += 1;
                tracing::warn!(seq = frame.seq, error = %e, "inference failed, skipping cycle");
                return None;
            }
        };

        if raw.len() != CHANNEL_COUNT {
            self.stats.length_mismatches += 1;
            tracing::warn!(
                expected = CHANNEL_COUNT,
                actual = raw.len(),
                "prediction vector has wrong channel count, skipping cycle"
            );
            return None;
        }

        let values = if self.config.filter_enabled {
            self.bank.filter(&raw, frame.timestamp)
        } else {
            raw
        };

        // The calibration window observes the same quantity rescaling
        // will later receive
        self.calibration.observe(&values, frame.timestamp);

        let values = if self.config.calibration_scaling_enabled && self.calibration.is_calibrated()
        {
            self.calibration.rescale(&values)
        } else {
            values
        };

        self.stats.cycles_run += 1;
        Some(ChannelUpdate::new(values))
    }

    /// Replace filter parameters, discarding all per-channel history
    pub fn set_filter_params(&mut self, params: FilterParams) {
        self.config.filter_params = params;
        self.bank.reset(params);
    }

    /// Open a calibration window
    pub fn start_calibration(&mut self, now: Timestamp) {
        self.calibration.start(now);
    }

    /// Manually close the open calibration window
    pub fn stop_calibration(&mut self) {
        self.calibration.stop();
    }

    /// The busy gate for this pipeline's prediction cycles
    pub fn gate(&self) -> Arc<CycleGate> {
        Arc::clone(&self.gate)
    }

    pub fn calibration(&self) -> &CalibrationTracker {
        &self.calibration
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn stats(&self) -> &PipelineStats {
        &self.stats
    }

    /// Current smoothed stream frame rate
    pub fn stream_fps(&self) -> f64 {
        self.deframer.fps()
    }

    /// Snapshot the config with live calibration state folded in, for
    /// persistence
    pub fn export_config(&self) -> AppConfig {
        let mut config = self.config.clone();
        config.calibration_ranges = self.calibration.ranges().to_vec();
        config.calibrated = self.calibration.is_calibrated();
        config
    }
}
