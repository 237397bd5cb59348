//! Capturing sink for pipeline output

use mimic_core::{ChannelUpdate, MimicResult};
use mimic_transport::BlendshapeSink;

/// Records every update instead of sending it anywhere
#[derive(Default)]
pub struct CaptureSink {
    pub sent: Vec<(u16, ChannelUpdate)>,
}

impl CaptureSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&ChannelUpdate> {
        self.sent.last().map(|(_, update)| update)
    }
}

impl BlendshapeSink for CaptureSink {
    async fn send(&mut self, update: &ChannelUpdate, port: u16) -> MimicResult<()> {
        self.sent.push((port, update.clone()));
        Ok(())
    }
}
