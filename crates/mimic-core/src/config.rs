//! Configuration structures
//!
//! The whole persisted surface of the app lives in [`AppConfig`]. Every
//! field has a documented default; a config file missing any key
//! deserializes to that default. Components receive the pieces they need
//! explicitly; nothing here is global state.

use serde::{Deserialize, Serialize};

use crate::CHANNEL_COUNT;

/// One-Euro filter parameters, process-wide
///
/// Changing any of these invalidates all per-channel filter state: the
/// filter bank is rebuilt wholesale, never reparameterized in place.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterParams {
    /// Minimum cutoff frequency in Hz
    pub min_cutoff: f64,
    /// Speed coefficient: how much signal velocity raises the cutoff
    pub beta: f64,
    /// Cutoff frequency for the derivative filter in Hz
    pub d_cutoff: f64,
}

impl Default for FilterParams {
    fn default() -> Self {
        FilterParams {
            min_cutoff: 3.0,
            beta: 0.9,
            d_cutoff: 1.0,
        }
    }
}

/// Per-channel calibrated output range
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelRange {
    pub min: f32,
    pub max: f32,
}

impl Default for ChannelRange {
    fn default() -> Self {
        ChannelRange { min: 0.0, max: 1.0 }
    }
}

/// Crop rectangle applied to frames before inference (external concern;
/// persisted here, consumed by the host)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Complete persisted application configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Filter bank parameters
    pub filter_params: FilterParams,
    /// Apply the One-Euro bank to inference output
    pub filter_enabled: bool,
    /// Rescale output through calibrated ranges when calibrated
    pub calibration_scaling_enabled: bool,
    /// Last calibrated per-channel ranges, `CHANNEL_COUNT` entries
    pub calibration_ranges: Vec<ChannelRange>,
    /// Whether a calibration window has ever completed
    pub calibrated: bool,
    /// Target prediction rate in frames per second
    pub target_fps: u32,
    /// Crop rectangle for the capture image
    pub crop: CropRect,
    /// Mirror the capture image horizontally
    pub flip_horizontal: bool,
    /// Mirror the capture image vertically
    pub flip_vertical: bool,
    /// Selected capture device identifier
    pub device: String,
    /// Destination UDP port for OSC output
    pub osc_port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            filter_params: FilterParams::default(),
            filter_enabled: true,
            calibration_scaling_enabled: true,
            calibration_ranges: vec![ChannelRange::default(); CHANNEL_COUNT],
            calibrated: false,
            target_fps: 90,
            crop: CropRect::default(),
            flip_horizontal: false,
            flip_vertical: false,
            device: String::new(),
            osc_port: 8883,
        }
    }
}

impl AppConfig {
    /// Ranges as persisted, padded or truncated to the channel count.
    /// A file written by an older build with a different table length
    /// must not poison the tracker.
    pub fn normalized_ranges(&self) -> Vec<ChannelRange> {
        let mut ranges = self.calibration_ranges.clone();
        ranges.resize(CHANNEL_COUNT, ChannelRange::default());
        ranges
    }
}
