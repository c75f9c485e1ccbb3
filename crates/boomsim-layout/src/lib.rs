//! # boomsim-layout: Channel offset tables
//!
//! A [`ChannelLayout`] maps channel names to `(offset, len)` ranges of the
//! flat buffers exchanged with the solver. One layout exists per
//! `(N, mode, body, side)`; it is pure data with no dependency on the
//! solver.
//!
//! ```text
//! single-arm input   [ U | pP | θ1 ]                          2N + 1
//! dual-arm input     [ U1 | U2 | pP | reserved | θ1 … | θ2 … ]   6N
//! single-arm output  [ s | v | p1 | p2 | F | E | (ε σ) | angle | (ω δ) ]
//! dual-arm output    [ s1 s2 v1 v2 p1 p2 p3 p4 | (ε1 ε2 σ1 σ2) ]
//! ```
//!
//! Offsets are a stored format: every persisted run artifact is indexed
//! by them, so any change here breaks existing artifacts.

mod error;
mod layout;

pub use error::LayoutError;
pub use layout::{ChannelLayout, RunLayouts, Side, Slot, SlotKind};

#[cfg(test)]
mod tests;
