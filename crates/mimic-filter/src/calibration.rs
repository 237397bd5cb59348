//! Calibration range tracker
//!
//! A timed window observes raw channel values and records per-channel
//! min/max; afterwards, outputs are rescaled through those ranges so a
//! user whose expressions span a narrow raw band still reaches the full
//! [0, 1] output range.

use std::time::Duration;

use mimic_core::{ChannelRange, Timestamp, CHANNEL_COUNT};

/// Default calibration window length
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(60);

/// Tracker phase
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CalibrationState {
    /// Ranges at defaults or restored from persisted config
    Idle,
    /// A window is open; every observed value folds into min/max
    Calibrating,
    /// Ranges frozen from the last completed window
    Calibrated,
}

/// Per-channel min/max tracker with a timed window
pub struct CalibrationTracker {
    state: CalibrationState,
    ranges: Vec<ChannelRange>,
    window: Duration,
    /// End of the open window, set while Calibrating
    deadline: Option<Timestamp>,
}

impl CalibrationTracker {
    pub fn new() -> Self {
        Self::with_window(DEFAULT_WINDOW)
    }

    pub fn with_window(window: Duration) -> Self {
        CalibrationTracker {
            state: CalibrationState::Idle,
            ranges: vec![ChannelRange::default(); CHANNEL_COUNT],
            window,
            deadline: None,
        }
    }

    /// Restore a tracker from persisted ranges
    pub fn from_ranges(ranges: Vec<ChannelRange>, calibrated: bool) -> Self {
        let mut tracker = Self::new();
        tracker.ranges = ranges;
        tracker.ranges.resize(CHANNEL_COUNT, ChannelRange::default());
        if calibrated {
            tracker.state = CalibrationState::Calibrated;
        }
        tracker
    }

    /// Open a calibration window at `now`, discarding previous ranges
    pub fn start(&mut self, now: Timestamp) {
        self.ranges = vec![
            ChannelRange {
                min: f32::INFINITY,
                max: f32::NEG_INFINITY,
            };
            self.ranges.len()
        ];
        self.deadline = Some(now + self.window);
        self.state = CalibrationState::Calibrating;
        tracing::info!(window_secs = self.window.as_secs(), "calibration started");
    }

    /// Manual stop trigger: freeze ranges immediately
    ///
    /// A no-op outside Calibrating, so a stop racing the window expiry
    /// fires the terminal transition at most once.
    pub fn stop(&mut self) {
        if self.state == CalibrationState::Calibrating {
            self.finish();
        }
    }

    /// Fold one raw value vector into the open window
    ///
    /// Also the cooperative expiry point: when `now` has passed the
    /// window deadline, the tracker freezes before observing.
    pub fn observe(&mut self, values: &[f32], now: Timestamp) {
        if self.state != CalibrationState::Calibrating {
            return;
        }
        if self.deadline.is_some_and(|d| now >= d) {
            self.finish();
            return;
        }

        for (range, &v) in self.ranges.iter_mut().zip(values.iter()) {
            range.min = range.min.min(v);
            range.max = range.max.max(v);
        }
    }

    fn finish(&mut self) {
        self.deadline = None;
        self.state = CalibrationState::Calibrated;
        tracing::info!("calibration complete");
    }

    /// Rescale a value vector through the calibrated ranges
    ///
    /// `output = clamp((v - min) / (max - min), 0, 1)` per channel; a
    /// degenerate channel (`max <= min`, including one never observed
    /// during the window) maps to 0 rather than dividing by zero.
    pub fn rescale(&self, values: &[f32]) -> Vec<f32> {
        values
            .iter()
            .zip(self.ranges.iter())
            .map(|(&v, range)| {
                if range.max <= range.min {
                    0.0
                } else {
                    ((v - range.min) / (range.max - range.min)).clamp(0.0, 1.0)
                }
            })
            .collect()
    }

    pub fn state(&self) -> CalibrationState {
        self.state
    }

    /// True once a window has completed and ranges are usable
    pub fn is_calibrated(&self) -> bool {
        self.state == CalibrationState::Calibrated
    }

    /// Current ranges, for persistence
    pub fn ranges(&self) -> &[ChannelRange] {
        &self.ranges
    }
}

impl Default for CalibrationTracker {
    fn default() -> Self {
        Self::new()
    }
}
