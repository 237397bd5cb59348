//! MIMIC Runtime - Pipeline orchestration
//!
//! This crate wires the core pieces into a host-drivable loop:
//! 1. Ingest serial bytes through the deframer
//! 2. Gate a prediction cycle (busy -> drop the frame, never queue)
//! 3. Run external inference over the frame
//! 4. Smooth the channel vector through the filter bank
//! 5. Fold into / rescale through the calibration tracker
//! 6. Hand the named update to the transport sink
//!
//! The host owns scheduling: nothing here spawns threads or installs
//! callbacks.

pub mod cycle;
pub mod pipeline;
pub mod store;
pub mod telemetry;

pub use cycle::*;
pub use pipeline::*;
pub use store::*;
pub use telemetry::*;
