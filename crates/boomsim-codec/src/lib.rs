//! # boomsim-codec: Channel vector codec
//!
//! Converts between named channels ([`ChannelSet`]) and the flat `f64`
//! buffers the solver consumes and produces, using a
//! [`boomsim_layout::ChannelLayout`] for offsets.
//!
//! - [`encode`]: named series and scalars → flat buffer
//! - [`decode`]: flat buffer → named series and scalars
//! - [`splice`] / [`channel_view`]: write or borrow one channel in place
//! - [`PackedVector`]: a buffer that carries its layout
//!
//! Length checks are strict. A series whose length differs from its slot
//! fails with [`CodecError::ShapeMismatch`] instead of being truncated or
//! padded, and a buffer whose length differs from the layout fails with
//! [`CodecError::BufferLength`].
//!
//! All functions are pure and safe to call from several runs at once.

mod channels;
mod codec;
mod error;
mod packed;

pub use channels::ChannelSet;
pub use codec::{channel_view, decode, encode, splice};
pub use error::CodecError;
pub use packed::{InputVector, OutputVector, PackedVector};
