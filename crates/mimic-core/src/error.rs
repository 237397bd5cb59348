//! Error types for the MIMIC pipeline
//!
//! Malformed stream bytes are NOT errors: the deframer and filter bank
//! silently drop corrupt input and keep running. These variants cover the
//! edges where failure is worth reporting: transport, configuration I/O,
//! and the external inference step.

use thiserror::Error;

/// Core MIMIC errors
#[derive(Error, Debug)]
pub enum MimicError {
    // Transport errors
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("OSC encoding failed: {0}")]
    Osc(String),

    #[error("Invalid target address: {0}")]
    InvalidAddress(String),

    // Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    // Inference boundary errors
    #[error("Inference failed: {0}")]
    Inference(String),

    #[error("Channel count mismatch: expected {expected}, got {actual}")]
    ChannelCountMismatch { expected: usize, actual: usize },
}

/// Result type for MIMIC operations
pub type MimicResult<T> = Result<T, MimicError>;
