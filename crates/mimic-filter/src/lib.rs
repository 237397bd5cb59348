//! MIMIC Filter - Signal conditioning for blendshape channels
//!
//! This crate implements the smoothing half of the pipeline:
//! - Low-pass filter primitive (exponential smoothing)
//! - One-Euro adaptive filter (velocity-dependent cutoff)
//! - Multi-channel filter bank (one independent filter per channel)
//! - Calibration range tracker (timed min/max window + rescaling)

pub mod bank;
pub mod calibration;
pub mod lowpass;
pub mod one_euro;

pub use bank::*;
pub use calibration::*;
pub use lowpass::*;
pub use one_euro::*;
