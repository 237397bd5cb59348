//! MIMIC Transport - Shipping blendshape values to the consumer
//!
//! This crate provides:
//! - OSC message encoding for named float channels
//! - A persistent UDP sender bound once and reused across sends
//!
//! The filter/calibration core never touches this layer directly; the
//! runtime drives it through [`BlendshapeSink`], so an alternative
//! binding (e.g. a WebSocket tunnel on the receiving side) plugs in at
//! the same seam.

pub mod osc;
pub mod udp;

pub use osc::*;
pub use udp::*;

use mimic_core::{ChannelUpdate, MimicResult};

/// "Send named floats now": the one operation the pipeline needs from
/// any output binding
pub trait BlendshapeSink {
    fn send(
        &mut self,
        update: &ChannelUpdate,
        port: u16,
    ) -> impl std::future::Future<Output = MimicResult<()>> + Send;
}
