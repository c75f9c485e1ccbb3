//! Model strategies.
//!
//! Each [`ModelVariant`] maps to one strategy, chosen when a run is
//! configured. The strategy decides which multibody model the solver
//! builds and where each output channel is read from; the driver itself
//! never branches on the variant.

use std::f64::consts::PI;
use std::fmt;

use boomsim_types::{ArmMode, BodyModel, BoomDesign, Channel, ModelVariant};

use crate::{SensorId, SolverModel};

/// Unit conversion applied while reading a sensor column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    None,
    RadiansToDegrees,
}

impl Conversion {
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Conversion::None => value,
            Conversion::RadiansToDegrees => value * 180.0 / PI,
        }
    }
}

/// Where an output channel comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorBinding {
    pub channel: Channel,
    pub sensor: SensorId,
    pub column: usize,
    pub conversion: Conversion,
}

impl SensorBinding {
    const fn new(channel: Channel, sensor: SensorId, column: usize) -> Self {
        Self {
            channel,
            sensor,
            column,
            conversion: Conversion::None,
        }
    }

    const fn degrees(channel: Channel, sensor: SensorId, column: usize) -> Self {
        Self {
            channel,
            sensor,
            column,
            conversion: Conversion::RadiansToDegrees,
        }
    }
}

const SINGLE_ARM_RIGID: [SensorBinding; 5] = [
    SensorBinding::new(Channel::Distance, SensorId::Distance, 1),
    SensorBinding::new(Channel::Velocity, SensorId::Velocity, 1),
    SensorBinding::new(Channel::Pressure1, SensorId::Pressures, 1),
    SensorBinding::new(Channel::Pressure2, SensorId::Pressures, 2),
    SensorBinding::degrees(Channel::AngleDeg, SensorId::Angle, 3),
];

const SINGLE_ARM_FLEXIBLE: [SensorBinding; 4] = [
    SensorBinding::new(Channel::Strain, SensorId::StrainPoint, 6),
    SensorBinding::new(Channel::Stress, SensorId::StressPoint, 1),
    SensorBinding::degrees(Channel::AngularVelocityDeg, SensorId::AngularVelocity, 3),
    SensorBinding::new(Channel::Deflection, SensorId::Deflection, 2),
];

const DUAL_ARM_RIGID: [SensorBinding; 8] = [
    SensorBinding::new(Channel::Distance1, SensorId::Distance1, 1),
    SensorBinding::new(Channel::Distance2, SensorId::Distance2, 1),
    SensorBinding::new(Channel::Velocity1, SensorId::Velocity1, 1),
    SensorBinding::new(Channel::Velocity2, SensorId::Velocity2, 1),
    SensorBinding::new(Channel::Pressure1, SensorId::Pressures1, 1),
    SensorBinding::new(Channel::Pressure2, SensorId::Pressures1, 2),
    SensorBinding::new(Channel::Pressure3, SensorId::Pressures2, 1),
    SensorBinding::new(Channel::Pressure4, SensorId::Pressures2, 2),
];

const DUAL_ARM_FLEXIBLE: [SensorBinding; 4] = [
    SensorBinding::new(Channel::StrainF1, SensorId::StrainF1, 1),
    SensorBinding::new(Channel::StrainF2, SensorId::StrainF2, 1),
    SensorBinding::new(Channel::Stress1, SensorId::Stress1, 1),
    SensorBinding::new(Channel::Stress2, SensorId::Stress2, 1),
];

fn rigid_bindings(mode: ArmMode) -> Vec<SensorBinding> {
    match mode {
        ArmMode::SingleArm => SINGLE_ARM_RIGID.to_vec(),
        ArmMode::DualArm => DUAL_ARM_RIGID.to_vec(),
    }
}

fn solver_model(mode: ArmMode, design: BoomDesign) -> SolverModel {
    match mode {
        ArmMode::SingleArm => SolverModel::LiftBoom { design },
        ArmMode::DualArm => SolverModel::PatuCrane,
    }
}

/// Per-variant behaviour of a run.
pub trait ModelStrategy: fmt::Debug + Send + Sync {
    fn variant(&self) -> ModelVariant;

    fn body_model(&self) -> BodyModel {
        self.variant().body_model()
    }

    /// Whether the variant is modelled for `mode` at all.
    fn supports(&self, mode: ArmMode) -> bool;

    fn solver_model(&self, mode: ArmMode) -> SolverModel;

    /// Sensor columns of every recorded output channel, in no
    /// particular order.
    fn sensor_bindings(&self, mode: ArmMode) -> Vec<SensorBinding>;

    /// Whether force and work are derived after the solver returns.
    fn derives_energy(&self, mode: ArmMode) -> bool {
        mode == ArmMode::SingleArm
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RigidDefault;

impl ModelStrategy for RigidDefault {
    fn variant(&self) -> ModelVariant {
        ModelVariant::RigidDefault
    }

    fn supports(&self, _mode: ArmMode) -> bool {
        true
    }

    fn solver_model(&self, mode: ArmMode) -> SolverModel {
        solver_model(mode, BoomDesign::Default)
    }

    fn sensor_bindings(&self, mode: ArmMode) -> Vec<SensorBinding> {
        rigid_bindings(mode)
    }
}

/// Rigid run of the lightweight lift boom. Single arm only.
#[derive(Debug, Clone, Copy, Default)]
pub struct RigidOptimised;

impl ModelStrategy for RigidOptimised {
    fn variant(&self) -> ModelVariant {
        ModelVariant::RigidOptimised
    }

    fn supports(&self, mode: ArmMode) -> bool {
        mode == ArmMode::SingleArm
    }

    fn solver_model(&self, mode: ArmMode) -> SolverModel {
        solver_model(mode, BoomDesign::Optimised)
    }

    fn sensor_bindings(&self, mode: ArmMode) -> Vec<SensorBinding> {
        rigid_bindings(mode)
    }
}

/// Flexible-body run; records strain and stress on top of the rigid
/// channels.
#[derive(Debug, Clone, Copy, Default)]
pub struct Flexible {
    pub design: BoomDesign,
}

impl ModelStrategy for Flexible {
    fn variant(&self) -> ModelVariant {
        ModelVariant::Flexible {
            design: self.design,
        }
    }

    fn supports(&self, mode: ArmMode) -> bool {
        mode == ArmMode::SingleArm || self.design == BoomDesign::Default
    }

    fn solver_model(&self, mode: ArmMode) -> SolverModel {
        solver_model(mode, self.design)
    }

    fn sensor_bindings(&self, mode: ArmMode) -> Vec<SensorBinding> {
        let mut bindings = rigid_bindings(mode);
        match mode {
            ArmMode::SingleArm => bindings.extend_from_slice(&SINGLE_ARM_FLEXIBLE),
            ArmMode::DualArm => bindings.extend_from_slice(&DUAL_ARM_FLEXIBLE),
        }
        bindings
    }
}

/// The strategy for a variant.
pub fn strategy_for(variant: ModelVariant) -> Box<dyn ModelStrategy> {
    match variant {
        ModelVariant::RigidDefault => Box::new(RigidDefault),
        ModelVariant::RigidOptimised => Box::new(RigidOptimised),
        ModelVariant::Flexible { design } => Box::new(Flexible { design }),
    }
}
