//! Flat buffer paired with its layout.

use boomsim_layout::ChannelLayout;
use boomsim_types::Channel;

use crate::codec::{self, check_buffer, decode_slots};
use crate::{ChannelSet, CodecError};

/// A flat buffer that always matches its layout's length.
#[derive(Debug, Clone, PartialEq)]
pub struct PackedVector {
    layout: ChannelLayout,
    data: Vec<f64>,
}

/// Buffer handed to the solver: controls, pump pressure, initial angles.
pub type InputVector = PackedVector;

/// Buffer assembled from sensor recordings and derived channels.
pub type OutputVector = PackedVector;

impl PackedVector {
    /// Encodes `channels` into a new buffer.
    pub fn encode(layout: ChannelLayout, channels: &ChannelSet) -> Result<Self, CodecError> {
        let data = codec::encode(&layout, channels)?;
        Ok(Self { layout, data })
    }

    /// All cells zero. Used as the starting point of output assembly.
    pub fn zeroed(layout: ChannelLayout) -> Self {
        let data = vec![0.0; layout.total_len()];
        Self { layout, data }
    }

    /// Wraps an existing buffer, e.g. one loaded from a stored artifact.
    pub fn from_parts(layout: ChannelLayout, data: Vec<f64>) -> Result<Self, CodecError> {
        check_buffer(&data, &layout)?;
        Ok(Self { layout, data })
    }

    pub fn layout(&self) -> &ChannelLayout {
        &self.layout
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Borrows the cells of one channel.
    pub fn channel(&self, channel: Channel) -> Result<&[f64], CodecError> {
        let slot = self.layout.slot(channel)?;
        Ok(&self.data[slot.range()])
    }

    /// Reads a single-cell channel such as an initial angle.
    pub fn scalar(&self, channel: Channel) -> Result<f64, CodecError> {
        let slot = self.layout.slot(channel)?;
        if slot.len != 1 {
            return Err(CodecError::ShapeMismatch {
                channel,
                expected: 1,
                actual: slot.len,
            });
        }
        Ok(self.data[slot.offset])
    }

    /// Writes one channel into its reserved slot.
    pub fn splice(&mut self, channel: Channel, values: &[f64]) -> Result<(), CodecError> {
        codec::splice(&mut self.data, &self.layout, channel, values)
    }

    /// Unpacks every named channel.
    pub fn decode(&self) -> ChannelSet {
        decode_slots(&self.data, &self.layout)
    }
}
