//! Codec error types.

use boomsim_layout::LayoutError;
use boomsim_types::Channel;

/// Errors from encoding or decoding a flat buffer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// The requested channel is not part of the layout.
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// The layout requires a channel that was not supplied.
    #[error("no data supplied for required channel {channel}")]
    MissingChannel { channel: Channel },

    /// A supplied channel does not have the length its slot reserves.
    #[error("channel {channel} has {actual} values, its slot holds {expected}")]
    ShapeMismatch {
        channel: Channel,
        expected: usize,
        actual: usize,
    },

    /// The buffer length does not match the layout.
    #[error("buffer has {actual} cells, layout expects {expected}")]
    BufferLength { expected: usize, actual: usize },
}
