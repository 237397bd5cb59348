//! OSC encoding for channel values
//!
//! One OSC message per channel, address `/<channelName>`, single Float
//! argument. The bare-name address scheme matches the consumer this
//! bridge was built against; receivers expecting a prefixed scheme
//! (`/avatar/parameters/...`) remap on their side.

use rosc::{encoder, OscMessage, OscPacket, OscType};

use mimic_core::{ChannelUpdate, MimicError, MimicResult};

/// OSC address for a channel name
pub fn address_for(name: &str) -> String {
    format!("/{name}")
}

/// Encode a single channel value as an OSC message packet
pub fn encode_channel(name: &str, value: f32) -> MimicResult<Vec<u8>> {
    let msg = OscMessage {
        addr: address_for(name),
        args: vec![OscType::Float(value)],
    };

    encoder::encode(&OscPacket::Message(msg)).map_err(|e| MimicError::Osc(e.to_string()))
}

/// Encode a full update, one packet per channel in wire order
pub fn encode_update(update: &ChannelUpdate) -> MimicResult<Vec<Vec<u8>>> {
    update
        .iter_named()
        .map(|(name, value)| encode_channel(name, value))
        .collect()
}
