//! Layout error types.

use boomsim_types::{ArmMode, BodyModel, Channel, StepCount};

use crate::Side;

/// Errors from building or querying a [`crate::ChannelLayout`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// A layout needs at least one step.
    #[error("a run needs at least one step")]
    ZeroSteps,

    /// The buffer length for this step count does not fit in `usize`.
    #[error("step count {steps} overflows the buffer length")]
    TooManySteps { steps: StepCount },

    /// The channel exists, but not in this layout.
    #[error("channel {channel} is not part of the {side} layout for {mode} {body} runs")]
    UnknownChannel {
        channel: Channel,
        side: Side,
        mode: ArmMode,
        body: BodyModel,
    },

    /// The name does not match any channel at all.
    #[error("unknown channel name {name:?}")]
    UnknownName { name: String },
}
