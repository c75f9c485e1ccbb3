//! # boomsim-types: Core types for `boomsim`
//!
//! Shared vocabulary used across the workspace:
//! - Run shape ([`StepCount`], [`ArmMode`], [`BodyModel`])
//! - Model selection ([`BoomDesign`], [`ModelVariant`])
//! - Channel names ([`Channel`], [`ChannelRole`])
//!
//! Every flat buffer exchanged with the solver is addressed through these
//! names. Renaming a channel changes the persisted artifact format.

use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ============================================================================
// Run shape
// ============================================================================

/// Number of simulation steps `N` of a run.
///
/// Every time-series channel of a run has exactly this many values.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct StepCount(usize);

impl StepCount {
    pub fn new(steps: usize) -> Self {
        Self(steps)
    }

    /// Returns the step count as a `usize` for indexing.
    pub fn as_usize(self) -> usize {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl Display for StepCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for StepCount {
    fn from(value: usize) -> Self {
        Self(value)
    }
}

impl From<StepCount> for usize {
    fn from(steps: StepCount) -> Self {
        steps.0
    }
}

/// Number of boom arms driven by the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArmMode {
    /// One lift boom with one hydraulic cylinder.
    SingleArm,
    /// Lift and tilt boom (two cylinders).
    DualArm,
}

impl ArmMode {
    /// Number of hydraulic actuators, and therefore control channels.
    pub fn actuator_count(self) -> usize {
        match self {
            ArmMode::SingleArm => 1,
            ArmMode::DualArm => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ArmMode::SingleArm => "single-arm",
            ArmMode::DualArm => "dual-arm",
        }
    }
}

impl Display for ArmMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArmMode {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single-arm" => Ok(ArmMode::SingleArm),
            "dual-arm" => Ok(ArmMode::DualArm),
            other => Err(ParseNameError::new("arm mode", other)),
        }
    }
}

/// Whether bodies are rigid or carry flexible (modal) deformation.
///
/// Flexible runs record strain, stress and deflection channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BodyModel {
    Rigid,
    Flexible,
}

impl BodyModel {
    pub fn is_flexible(self) -> bool {
        matches!(self, BodyModel::Flexible)
    }
}

impl Display for BodyModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BodyModel::Rigid => f.write_str("rigid"),
            BodyModel::Flexible => f.write_str("flexible"),
        }
    }
}

// ============================================================================
// Model selection
// ============================================================================

/// Lift boom geometry used by single-arm runs.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "kebab-case")]
pub enum BoomDesign {
    #[default]
    Default,
    /// Lightweight (topology-optimised) lift boom.
    Optimised,
}

impl Display for BoomDesign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoomDesign::Default => f.write_str("default"),
            BoomDesign::Optimised => f.write_str("optimised"),
        }
    }
}

impl FromStr for BoomDesign {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(BoomDesign::Default),
            "optimised" | "optimized" => Ok(BoomDesign::Optimised),
            other => Err(ParseNameError::new("boom design", other)),
        }
    }
}

/// Closed set of model variants a run can be configured with.
///
/// Chosen once when the run is configured; the driver maps it to a
/// strategy and never branches on it again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ModelVariant {
    #[default]
    RigidDefault,
    RigidOptimised,
    Flexible {
        #[serde(default)]
        design: BoomDesign,
    },
}

impl ModelVariant {
    pub fn body_model(self) -> BodyModel {
        match self {
            ModelVariant::RigidDefault | ModelVariant::RigidOptimised => BodyModel::Rigid,
            ModelVariant::Flexible { .. } => BodyModel::Flexible,
        }
    }

    pub fn design(self) -> BoomDesign {
        match self {
            ModelVariant::RigidDefault => BoomDesign::Default,
            ModelVariant::RigidOptimised => BoomDesign::Optimised,
            ModelVariant::Flexible { design } => design,
        }
    }

    /// Short label used in logs and artifact file names.
    pub fn label(self) -> &'static str {
        match self {
            ModelVariant::RigidDefault => "rigid-default",
            ModelVariant::RigidOptimised => "rigid-optimised",
            ModelVariant::Flexible {
                design: BoomDesign::Default,
            } => "flexible-default",
            ModelVariant::Flexible {
                design: BoomDesign::Optimised,
            } => "flexible-optimised",
        }
    }
}

impl Display for ModelVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ModelVariant {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rigid-default" => Ok(ModelVariant::RigidDefault),
            "rigid-optimised" | "rigid-optimized" => Ok(ModelVariant::RigidOptimised),
            "flexible" | "flexible-default" => Ok(ModelVariant::Flexible {
                design: BoomDesign::Default,
            }),
            "flexible-optimised" | "flexible-optimized" => Ok(ModelVariant::Flexible {
                design: BoomDesign::Optimised,
            }),
            other => Err(ParseNameError::new("model variant", other)),
        }
    }
}

// ============================================================================
// Channels
// ============================================================================

/// Whether a channel holds one value per step or a single scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelRole {
    Series,
    Scalar,
}

/// Named channel of an input or output buffer.
///
/// The serialized names are part of the artifact format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Channel {
    // ---- inputs ----
    /// Control signal of the single actuator, V.
    #[serde(rename = "U")]
    Control,
    /// Control signal of the lift cylinder (dual arm), V.
    #[serde(rename = "U1")]
    Control1,
    /// Control signal of the tilt cylinder (dual arm), V.
    #[serde(rename = "U2")]
    Control2,
    /// Pump supply pressure, Pa.
    #[serde(rename = "pP")]
    PumpPressure,
    /// Initial lift boom angle, rad.
    #[serde(rename = "theta1")]
    Theta1,
    /// Initial tilt boom angle, rad.
    #[serde(rename = "theta2")]
    Theta2,

    // ---- single-arm outputs ----
    /// Cylinder stroke, m.
    #[serde(rename = "s")]
    Distance,
    /// Cylinder stroke velocity, m/s.
    #[serde(rename = "v")]
    Velocity,
    /// Piston-side pressure, Pa (dual arm: lift cylinder piston side).
    #[serde(rename = "p1")]
    Pressure1,
    /// Rod-side pressure, Pa (dual arm: lift cylinder rod side).
    #[serde(rename = "p2")]
    Pressure2,
    /// Actuator force derived from the pressures, N.
    #[serde(rename = "F")]
    Force,
    /// Cumulative actuator work, J.
    #[serde(rename = "E")]
    Energy,
    /// Strain at the monitored point.
    #[serde(rename = "strain")]
    Strain,
    /// Stress at the monitored point, Pa.
    #[serde(rename = "stress")]
    Stress,
    /// Lift boom angle, degrees.
    #[serde(rename = "angleDeg")]
    AngleDeg,
    /// Lift boom angular velocity, degrees per second.
    #[serde(rename = "angularVelocityDeg")]
    AngularVelocityDeg,
    /// Tip deflection, m.
    #[serde(rename = "deflection")]
    Deflection,

    // ---- dual-arm outputs ----
    #[serde(rename = "s1")]
    Distance1,
    #[serde(rename = "s2")]
    Distance2,
    #[serde(rename = "v1")]
    Velocity1,
    #[serde(rename = "v2")]
    Velocity2,
    /// Tilt cylinder piston-side pressure, Pa.
    #[serde(rename = "p3")]
    Pressure3,
    /// Tilt cylinder rod-side pressure, Pa.
    #[serde(rename = "p4")]
    Pressure4,
    #[serde(rename = "strainF1")]
    StrainF1,
    #[serde(rename = "strainF2")]
    StrainF2,
    #[serde(rename = "stress1")]
    Stress1,
    #[serde(rename = "stress2")]
    Stress2,
}

impl Channel {
    /// Every channel name known to the workspace.
    pub const ALL: [Channel; 27] = [
        Channel::Control,
        Channel::Control1,
        Channel::Control2,
        Channel::PumpPressure,
        Channel::Theta1,
        Channel::Theta2,
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
        Channel::Distance1,
        Channel::Distance2,
        Channel::Velocity1,
        Channel::Velocity2,
        Channel::Pressure3,
        Channel::Pressure4,
        Channel::StrainF1,
        Channel::StrainF2,
        Channel::Stress1,
        Channel::Stress2,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Channel::Control => "U",
            Channel::Control1 => "U1",
            Channel::Control2 => "U2",
            Channel::PumpPressure => "pP",
            Channel::Theta1 => "theta1",
            Channel::Theta2 => "theta2",
            Channel::Distance => "s",
            Channel::Velocity => "v",
            Channel::Pressure1 => "p1",
            Channel::Pressure2 => "p2",
            Channel::Force => "F",
            Channel::Energy => "E",
            Channel::Strain => "strain",
            Channel::Stress => "stress",
            Channel::AngleDeg => "angleDeg",
            Channel::AngularVelocityDeg => "angularVelocityDeg",
            Channel::Deflection => "deflection",
            Channel::Distance1 => "s1",
            Channel::Distance2 => "s2",
            Channel::Velocity1 => "v1",
            Channel::Velocity2 => "v2",
            Channel::Pressure3 => "p3",
            Channel::Pressure4 => "p4",
            Channel::StrainF1 => "strainF1",
            Channel::StrainF2 => "strainF2",
            Channel::Stress1 => "stress1",
            Channel::Stress2 => "stress2",
        }
    }

    pub fn role(self) -> ChannelRole {
        match self {
            Channel::Theta1 | Channel::Theta2 => ChannelRole::Scalar,
            _ => ChannelRole::Series,
        }
    }

    /// Physical unit of the stored values (solver-native).
    pub fn unit(self) -> &'static str {
        match self {
            Channel::Control | Channel::Control1 | Channel::Control2 => "V",
            Channel::PumpPressure
            | Channel::Pressure1
            | Channel::Pressure2
            | Channel::Pressure3
            | Channel::Pressure4
            | Channel::Stress
            | Channel::Stress1
            | Channel::Stress2 => "Pa",
            Channel::Theta1 | Channel::Theta2 => "rad",
            Channel::Distance
            | Channel::Distance1
            | Channel::Distance2
            | Channel::Deflection => "m",
            Channel::Velocity | Channel::Velocity1 | Channel::Velocity2 => "m/s",
            Channel::Force => "N",
            Channel::Energy => "J",
            Channel::Strain | Channel::StrainF1 | Channel::StrainF2 => "-",
            Channel::AngleDeg => "deg",
            Channel::AngularVelocityDeg => "deg/s",
        }
    }
}

impl Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Channel {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Channel::ALL
            .iter()
            .copied()
            .find(|channel| channel.as_str() == s)
            .ok_or_else(|| ParseNameError::new("channel", s))
    }
}

/// A textual name did not match any known value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} name: {name:?}")]
pub struct ParseNameError {
    pub kind: &'static str,
    pub name: String,
}

impl ParseNameError {
    fn new(kind: &'static str, name: &str) -> Self {
        Self {
            kind,
            name: name.to_string(),
        }
    }
}
