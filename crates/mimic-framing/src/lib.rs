//! MIMIC Framing - Byte-stream deframing
//!
//! This crate turns an unbounded, arbitrarily-chunked serial byte stream
//! into discrete JPEG image frames:
//! - Frames are delimited by the JPEG SOI sequence `FF D8 FF` and the
//!   EOI sequence `FF D9`
//! - Garbage between frames is dropped silently
//! - A 32 KiB pending cap guards against runaway or corrupt streams
//!
//! Extraction is byte-arrival-equivalent: feeding the same stream in any
//! chunking (one byte at a time included) emits the same frames.

pub mod deframer;
pub mod frame;

pub use deframer::*;
pub use frame::*;
