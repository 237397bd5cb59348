//! MIMIC Test Harness - Stream simulation and end-to-end validation
//!
//! This crate provides:
//! - A seeded serial-stream simulator (frames interleaved with noise)
//! - Chunkers that replay a stream under arbitrary chunk boundaries
//! - A capturing sink for pipeline output
//! - End-to-end integration tests over the whole byte-to-OSC path

pub mod sink;
pub mod stream;

#[cfg(test)]
mod integration;

pub use sink::*;
pub use stream::*;
