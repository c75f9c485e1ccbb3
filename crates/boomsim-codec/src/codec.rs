//! Flat buffer encode/decode.
//!
//! Both directions walk the layout slot by slot. Nothing is scaled or
//! converted: the codec moves numbers, consumers own units.

use boomsim_layout::{ChannelLayout, Slot, SlotKind};
use boomsim_types::{Channel, ChannelRole};

use crate::{ChannelSet, CodecError};

/// Packs named channels into a fresh buffer laid out by `layout`.
///
/// Every channel slot must be supplied, series with exactly the slot
/// length. Padding cells are zero. Channels in `channels` that the layout
/// does not name are ignored.
pub fn encode(layout: &ChannelLayout, channels: &ChannelSet) -> Result<Vec<f64>, CodecError> {
    let mut buffer = vec![0.0; layout.total_len()];

    for slot in layout.slots() {
        let SlotKind::Channel(channel) = slot.kind else {
            continue;
        };

        match channel.role() {
            ChannelRole::Series => {
                let values = channels
                    .series(channel)
                    .ok_or(CodecError::MissingChannel { channel })?;
                check_shape(channel, slot, values.len())?;
                buffer[slot.range()].copy_from_slice(values);
            }
            ChannelRole::Scalar => {
                let value = channels
                    .scalar(channel)
                    .ok_or(CodecError::MissingChannel { channel })?;
                buffer[slot.offset] = value;
            }
        }
    }

    tracing::debug!(
        side = %layout.side(),
        len = buffer.len(),
        channels = layout.channels().count(),
        "encoded buffer"
    );

    Ok(buffer)
}

/// Unpacks every channel slot of `buffer` into a [`ChannelSet`].
///
/// Pure: decoding the same buffer twice yields identical sets.
pub fn decode(buffer: &[f64], layout: &ChannelLayout) -> Result<ChannelSet, CodecError> {
    check_buffer(buffer, layout)?;
    Ok(decode_slots(buffer, layout))
}

/// Borrows the cells of one channel.
pub fn channel_view<'a>(
    buffer: &'a [f64],
    layout: &ChannelLayout,
    channel: Channel,
) -> Result<&'a [f64], CodecError> {
    check_buffer(buffer, layout)?;
    let slot = layout.slot(channel)?;
    Ok(&buffer[slot.range()])
}

/// Overwrites the cells of one channel in place.
pub fn splice(
    buffer: &mut [f64],
    layout: &ChannelLayout,
    channel: Channel,
    values: &[f64],
) -> Result<(), CodecError> {
    check_buffer(buffer, layout)?;
    let slot = layout.slot(channel)?;
    check_shape(channel, slot, values.len())?;
    buffer[slot.range()].copy_from_slice(values);
    Ok(())
}

/// Decodes a buffer whose length has already been checked.
pub(crate) fn decode_slots(buffer: &[f64], layout: &ChannelLayout) -> ChannelSet {
    debug_assert_eq!(buffer.len(), layout.total_len());

    let mut channels = ChannelSet::new();
    for slot in layout.slots() {
        let SlotKind::Channel(channel) = slot.kind else {
            continue;
        };
        match channel.role() {
            ChannelRole::Series => channels.insert_series(channel, &buffer[slot.range()]),
            ChannelRole::Scalar => channels.insert_scalar(channel, buffer[slot.offset]),
        }
    }
    channels
}

pub(crate) fn check_buffer(buffer: &[f64], layout: &ChannelLayout) -> Result<(), CodecError> {
    if buffer.len() == layout.total_len() {
        Ok(())
    } else {
        Err(CodecError::BufferLength {
            expected: layout.total_len(),
            actual: buffer.len(),
        })
    }
}

fn check_shape(channel: Channel, slot: &Slot, actual: usize) -> Result<(), CodecError> {
    if actual == slot.len {
        Ok(())
    } else {
        Err(CodecError::ShapeMismatch {
            channel,
            expected: slot.len,
            actual,
        })
    }
}
