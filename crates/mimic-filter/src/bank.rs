//! Multi-channel filter bank

use mimic_core::{FilterParams, Timestamp, CHANNEL_COUNT};

use crate::OneEuroFilter;

/// One independent One-Euro filter per blendshape channel
///
/// All channels share the sample timestamp. Parameter changes rebuild
/// the bank wholesale: per-channel history under the old parameters is
/// never mixed with smoothing under the new ones.
pub struct FilterBank {
    filters: Vec<OneEuroFilter>,
}

impl FilterBank {
    /// Bank over the full channel table
    pub fn new(params: FilterParams) -> Self {
        Self::with_channels(params, CHANNEL_COUNT)
    }

    /// Bank over an explicit channel count (tests, partial pipelines)
    pub fn with_channels(params: FilterParams, channels: usize) -> Self {
        FilterBank {
            filters: vec![OneEuroFilter::new(params); channels],
        }
    }

    /// Smooth one positional sample vector
    ///
    /// Values beyond the bank width are ignored; a short vector yields a
    /// short result. Length policing happens at the pipeline boundary.
    pub fn filter(&mut self, values: &[f32], timestamp: Timestamp) -> Vec<f32> {
        self.filters
            .iter_mut()
            .zip(values.iter())
            .map(|(f, &x)| f.filter(x as f64, timestamp) as f32)
            .collect()
    }

    /// Number of channels in the bank
    pub fn channels(&self) -> usize {
        self.filters.len()
    }

    /// Discard all per-channel history and adopt new parameters
    pub fn reset(&mut self, params: FilterParams) {
        let channels = self.filters.len();
        self.filters = vec![OneEuroFilter::new(params); channels];
    }
}
