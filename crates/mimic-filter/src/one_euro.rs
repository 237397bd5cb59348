//! One-Euro adaptive filter
//!
//! Two low-pass filters per channel: one over the raw signal, one over
//! its time-derivative. Signal speed raises the cutoff, trading lag for
//! jitter. `beta = 0` degenerates to a constant-cutoff low-pass.
//!
//! The smoothing law is the standard One-Euro formulation and must stay
//! formula-exact: `alpha(c, t) = r / (r + 1)` with `r = 2π·c·t`.

use std::f64::consts::PI;

use mimic_core::{FilterParams, Timestamp};

use crate::LowPassFilter;

/// Smoothing factor for cutoff `cutoff` at sample interval `dt`
#[inline]
fn smoothing_alpha(cutoff: f64, dt: f64) -> f64 {
    let r = 2.0 * PI * cutoff * dt;
    r / (r + 1.0)
}

/// Adaptive-cutoff filter for one scalar channel
#[derive(Clone, Debug)]
pub struct OneEuroFilter {
    params: FilterParams,
    x_filter: LowPassFilter,
    dx_filter: LowPassFilter,
    last_time: Option<Timestamp>,
}

impl OneEuroFilter {
    /// Sub-filter alphas are seeded at a nominal dt of one second; the
    /// real alpha is recomputed from the measured dt on every sample.
    pub fn new(params: FilterParams) -> Self {
        OneEuroFilter {
            params,
            x_filter: LowPassFilter::new(smoothing_alpha(params.min_cutoff, 1.0)),
            dx_filter: LowPassFilter::new(smoothing_alpha(params.d_cutoff, 1.0)),
            last_time: None,
        }
    }

    /// Smooth one sample observed at `timestamp`
    ///
    /// Out-of-order or duplicate timestamps return the input unmodified
    /// without touching filter state: non-monotonic clocks must not
    /// corrupt the derivative estimate.
    pub fn filter(&mut self, x: f64, timestamp: Timestamp) -> f64 {
        let Some(last) = self.last_time else {
            self.last_time = Some(timestamp);
            self.x_filter.filter(x);
            self.dx_filter.filter(0.0);
            return x;
        };

        let dt = timestamp.seconds_since(last);
        if dt <= 0.0 {
            return x;
        }
        self.last_time = Some(timestamp);

        // Derivative of the signal, against the previous filtered value
        let prev = self.x_filter.prev().unwrap_or(x);
        let dx = (x - prev) / dt;

        self.dx_filter
            .set_alpha(smoothing_alpha(self.params.d_cutoff, dt));
        let edx = self.dx_filter.filter(dx);

        // Faster signal -> higher cutoff -> less lag, more jitter
        let cutoff = self.params.min_cutoff + self.params.beta * edx.abs();

        self.x_filter.set_alpha(smoothing_alpha(cutoff, dt));
        self.x_filter.filter(x)
    }

    pub fn params(&self) -> FilterParams {
        self.params
    }
}
