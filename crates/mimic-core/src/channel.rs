//! The blendshape channel table
//!
//! Every vector flowing through the pipeline (inference output, filter
//! bank input/output, calibration, OSC messages) is positional: index i
//! always refers to `CHANNEL_NAMES[i]`. The order below is the wire
//! contract and must never be reordered.

/// Number of blendshape channels produced per frame
pub const CHANNEL_COUNT: usize = 44;

/// Ordered channel names. Position defines the wire field name on output.
pub const CHANNEL_NAMES: [&str; CHANNEL_COUNT] = [
    "browDownLeft",
    "browDownRight",
    "browInnerUp",
    "browOuterUpLeft",
    "browOuterUpRight",
    "cheekPuff",
    "cheekSquintLeft",
    "cheekSquintRight",
    "eyeBlinkLeft",
    "eyeBlinkRight",
    "eyeSquintLeft",
    "eyeSquintRight",
    "eyeWideLeft",
    "eyeWideRight",
    "jawForward",
    "jawLeft",
    "jawOpen",
    "jawRight",
    "mouthClose",
    "mouthDimpleLeft",
    "mouthDimpleRight",
    "mouthFrownLeft",
    "mouthFrownRight",
    "mouthFunnel",
    "mouthLeft",
    "mouthLowerDownLeft",
    "mouthLowerDownRight",
    "mouthPressLeft",
    "mouthPressRight",
    "mouthPucker",
    "mouthRight",
    "mouthRollLower",
    "mouthRollUpper",
    "mouthShrugLower",
    "mouthShrugUpper",
    "mouthSmileLeft",
    "mouthSmileRight",
    "mouthStretchLeft",
    "mouthStretchRight",
    "mouthUpperUpLeft",
    "mouthUpperUpRight",
    "noseSneerLeft",
    "noseSneerRight",
    "tongueOut",
];

/// Get a channel name by position
#[inline]
pub fn channel_name(index: usize) -> Option<&'static str> {
    CHANNEL_NAMES.get(index).copied()
}

/// Find the position of a channel by name
pub fn channel_index(name: &str) -> Option<usize> {
    CHANNEL_NAMES.iter().position(|&n| n == name)
}

/// A full set of channel values paired with their names, in table order
#[derive(Clone, Debug, PartialEq)]
pub struct ChannelUpdate {
    /// One value per channel, in `CHANNEL_NAMES` order
    pub values: Vec<f32>,
}

impl ChannelUpdate {
    /// Wrap a positional value vector. Caller guarantees length via
    /// [`crate::MimicError::ChannelCountMismatch`] checks upstream.
    pub fn new(values: Vec<f32>) -> Self {
        debug_assert_eq!(values.len(), CHANNEL_COUNT);
        ChannelUpdate { values }
    }

    /// Iterate (name, value) pairs in wire order
    pub fn iter_named(&self) -> impl Iterator<Item = (&'static str, f32)> + '_ {
        CHANNEL_NAMES.iter().copied().zip(self.values.iter().copied())
    }

    /// Look up a single value by channel name
    pub fn get(&self, name: &str) -> Option<f32> {
        channel_index(name).and_then(|i| self.values.get(i).copied())
    }
}
