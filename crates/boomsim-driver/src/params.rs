//! Run parameters.

use boomsim_energy::CylinderAreas;
use boomsim_types::{ArmMode, ModelVariant, StepCount};
use serde::{Deserialize, Serialize};

/// Initial boom angles, rad.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InitialAngles {
    /// Lift boom angle, `theta1`.
    pub lift: f64,
    /// Tilt boom angle, `theta2`. Ignored by single-arm runs.
    pub tilt: f64,
}

impl InitialAngles {
    pub fn from_degrees(lift: f64, tilt: f64) -> Self {
        Self {
            lift: lift.to_radians(),
            tilt: tilt.to_radians(),
        }
    }
}

/// Everything that fixes the shape and physics of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunParams {
    pub steps: StepCount,
    /// Simulated duration `T`, s.
    pub end_time: f64,
    pub mode: ArmMode,
    pub variant: ModelVariant,
    pub initial_angles: InitialAngles,
    /// Payload at the boom tip, kg.
    pub load_mass: f64,
    pub flexible_modes: u32,
    /// Initial chamber pressures `p1..p4`, Pa.
    pub initial_pressures: [f64; 4],
    /// Lift cylinder areas used for force and work.
    pub areas: CylinderAreas,
    pub solution_viewer: bool,
}

impl RunParams {
    /// Step count for a duration and step size, `trunc(T / dt)`.
    pub fn steps_for(end_time: f64, time_step: f64) -> StepCount {
        let ratio = end_time / time_step;
        if ratio.is_finite() && ratio >= 1.0 {
            StepCount::new(ratio as usize)
        } else {
            StepCount::new(0)
        }
    }

    /// Duration of one step, s.
    pub fn time_step(&self) -> f64 {
        self.end_time / self.steps.as_usize() as f64
    }
}
