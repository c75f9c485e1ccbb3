//! Channel offset tables.
//!
//! A [`ChannelLayout`] is derived once from `(N, mode, body)` and never
//! changes afterwards. Slots are stored in buffer order and always tile
//! `[0, total_len)`; gaps in the historical formats are represented by
//! explicit [`SlotKind::Padding`] slots rather than holes.

use std::fmt::{self, Display};
use std::ops::Range;

use boomsim_types::{ArmMode, BodyModel, Channel, ChannelRole, StepCount};
use serde::{Deserialize, Serialize};

use crate::LayoutError;

/// Widest layout, in multiples of `N` (dual-arm flexible output).
const MAX_WIDTH: usize = 12;

/// Which buffer a layout describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Side {
    /// Control histories, pump pressure and initial angles sent to the solver.
    Input,
    /// Sensor recordings and derived channels.
    Output,
}

impl Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Input => f.write_str("input"),
            Side::Output => f.write_str("output"),
        }
    }
}

/// Contents of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotKind {
    Channel(Channel),
    /// Unused cells kept for format compatibility. Always zero when encoded.
    Padding,
}

/// A contiguous `[offset, offset + len)` range of a flat buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot {
    pub kind: SlotKind,
    pub offset: usize,
    pub len: usize,
}

impl Slot {
    pub fn range(&self) -> Range<usize> {
        self.offset..self.end()
    }

    pub fn end(&self) -> usize {
        self.offset + self.len
    }

    /// Returns the channel stored in this slot, `None` for padding.
    pub fn channel(&self) -> Option<Channel> {
        match self.kind {
            SlotKind::Channel(channel) => Some(channel),
            SlotKind::Padding => None,
        }
    }
}

/// Ordered mapping from channel name to `(offset, len)` in a flat buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelLayout {
    side: Side,
    mode: ArmMode,
    body: BodyModel,
    steps: StepCount,
    slots: Vec<Slot>,
    total_len: usize,
}

/// The input and output layout of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunLayouts {
    pub input: ChannelLayout,
    pub output: ChannelLayout,
}

impl ChannelLayout {
    /// Derives both layouts of a run.
    pub fn for_run(
        steps: StepCount,
        mode: ArmMode,
        body: BodyModel,
    ) -> Result<RunLayouts, LayoutError> {
        Ok(RunLayouts {
            input: Self::input(steps, mode, body)?,
            output: Self::output(steps, mode, body)?,
        })
    }

    /// Input layout.
    ///
    /// Single arm: `[U, pP, theta1]`, `2N + 1` cells.
    ///
    /// Dual arm: `[U1, U2, pP, reserved, theta1 @ 4N, theta2 @ 5N]`, `6N`
    /// cells. The reserved block and the absolute offsets of the angles
    /// are part of the stored format and must not be compacted.
    pub fn input(steps: StepCount, mode: ArmMode, body: BodyModel) -> Result<Self, LayoutError> {
        let n = checked_steps(steps)?;
        let builder = LayoutBuilder::new(n);

        let builder = match mode {
            ArmMode::SingleArm => builder
                .channel(Channel::Control)
                .channel(Channel::PumpPressure)
                .channel(Channel::Theta1),
            ArmMode::DualArm => builder
                .channel(Channel::Control1)
                .channel(Channel::Control2)
                .channel(Channel::PumpPressure)
                .pad(n)
                .pad_to(4 * n)
                .channel(Channel::Theta1)
                .pad_to(5 * n)
                .channel(Channel::Theta2)
                .pad_to(6 * n),
        };

        Ok(builder.finish(Side::Input, mode, body, steps))
    }

    /// Output layout.
    ///
    /// Single arm rigid: `[s, v, p1, p2, F, E, angleDeg]`. Flexible runs
    /// insert `strain, stress` at `6N..8N` and append
    /// `angularVelocityDeg, deflection`.
    ///
    /// Dual arm: `[s1, s2, v1, v2, p1, p2, p3, p4]`, flexible runs append
    /// `strainF1, strainF2, stress1, stress2`.
    pub fn output(steps: StepCount, mode: ArmMode, body: BodyModel) -> Result<Self, LayoutError> {
        let n = checked_steps(steps)?;
        let mut builder = LayoutBuilder::new(n);

        match (mode, body) {
            (ArmMode::SingleArm, BodyModel::Rigid) => {
                builder = builder.channels(&[
                    Channel::Distance,
                    Channel::Velocity,
                    Channel::Pressure1,
                    Channel::Pressure2,
                    Channel::Force,
                    Channel::Energy,
                    Channel::AngleDeg,
                ]);
            }
            (ArmMode::SingleArm, BodyModel::Flexible) => {
                builder = builder.channels(&[
                    Channel::Distance,
                    Channel::Velocity,
                    Channel::Pressure1,
                    Channel::Pressure2,
                    Channel::Force,
                    Channel::Energy,
                    Channel::Strain,
                    Channel::Stress,
                    Channel::AngleDeg,
                    Channel::AngularVelocityDeg,
                    Channel::Deflection,
                ]);
            }
            (ArmMode::DualArm, body) => {
                builder = builder.channels(&[
                    Channel::Distance1,
                    Channel::Distance2,
                    Channel::Velocity1,
                    Channel::Velocity2,
                    Channel::Pressure1,
                    Channel::Pressure2,
                    Channel::Pressure3,
                    Channel::Pressure4,
                ]);
                if body.is_flexible() {
                    builder = builder.channels(&[
                        Channel::StrainF1,
                        Channel::StrainF2,
                        Channel::Stress1,
                        Channel::Stress2,
                    ]);
                }
            }
        }

        Ok(builder.finish(Side::Output, mode, body, steps))
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn mode(&self) -> ArmMode {
        self.mode
    }

    pub fn body(&self) -> BodyModel {
        self.body
    }

    pub fn steps(&self) -> StepCount {
        self.steps
    }

    /// Total buffer length in cells.
    pub fn total_len(&self) -> usize {
        self.total_len
    }

    /// All slots in buffer order, padding included.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Named channels in buffer order.
    pub fn channels(&self) -> impl Iterator<Item = Channel> + '_ {
        self.slots.iter().filter_map(Slot::channel)
    }

    pub fn contains(&self, channel: Channel) -> bool {
        self.channels().any(|c| c == channel)
    }

    /// Looks up the slot of a channel.
    pub fn slot(&self, channel: Channel) -> Result<&Slot, LayoutError> {
        self.slots
            .iter()
            .find(|slot| slot.channel() == Some(channel))
            .ok_or(LayoutError::UnknownChannel {
                channel,
                side: self.side,
                mode: self.mode,
                body: self.body,
            })
    }

    /// Looks up a slot by its textual channel name.
    pub fn lookup(&self, name: &str) -> Result<&Slot, LayoutError> {
        let channel = name
            .parse::<Channel>()
            .map_err(|_| LayoutError::UnknownName {
                name: name.to_string(),
            })?;
        self.slot(channel)
    }

    pub fn range(&self, channel: Channel) -> Result<Range<usize>, LayoutError> {
        self.slot(channel).map(Slot::range)
    }

    /// Returns `true` when the slots cover `[0, total_len)` exactly once.
    pub fn is_tiled(&self) -> bool {
        let mut cursor = 0;
        for slot in &self.slots {
            if slot.offset != cursor || slot.len == 0 {
                return false;
            }
            cursor = slot.end();
        }
        cursor == self.total_len
    }
}

fn checked_steps(steps: StepCount) -> Result<usize, LayoutError> {
    if steps.is_zero() {
        return Err(LayoutError::ZeroSteps);
    }
    let n = steps.as_usize();
    n.checked_mul(MAX_WIDTH)
        .ok_or(LayoutError::TooManySteps { steps })?;
    Ok(n)
}

/// Appends slots at a moving cursor.
struct LayoutBuilder {
    steps: usize,
    cursor: usize,
    slots: Vec<Slot>,
}

impl LayoutBuilder {
    fn new(steps: usize) -> Self {
        Self {
            steps,
            cursor: 0,
            slots: Vec::with_capacity(MAX_WIDTH),
        }
    }

    fn push(mut self, kind: SlotKind, len: usize) -> Self {
        if len > 0 {
            self.slots.push(Slot {
                kind,
                offset: self.cursor,
                len,
            });
            self.cursor += len;
        }
        self
    }

    fn channel(self, channel: Channel) -> Self {
        let len = match channel.role() {
            ChannelRole::Series => self.steps,
            ChannelRole::Scalar => 1,
        };
        self.push(SlotKind::Channel(channel), len)
    }

    fn channels(self, channels: &[Channel]) -> Self {
        channels
            .iter()
            .fold(self, |builder, &channel| builder.channel(channel))
    }

    fn pad(self, len: usize) -> Self {
        self.push(SlotKind::Padding, len)
    }

    /// Pads up to an absolute offset.
    fn pad_to(self, offset: usize) -> Self {
        debug_assert!(offset >= self.cursor, "pad_to moves backwards");
        let len = offset.saturating_sub(self.cursor);
        self.pad(len)
    }

    fn finish(self, side: Side, mode: ArmMode, body: BodyModel, steps: StepCount) -> ChannelLayout {
        let layout = ChannelLayout {
            side,
            mode,
            body,
            steps,
            total_len: self.cursor,
            slots: self.slots,
        };

        // Postcondition: slots tile the buffer without gaps or overlap
        debug_assert!(layout.is_tiled(), "layout slots do not tile the buffer");

        tracing::debug!(
            %side,
            %mode,
            %body,
            %steps,
            total_len = layout.total_len,
            "derived channel layout"
        );

        layout
    }
}
