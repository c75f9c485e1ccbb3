//! The solver seam.
//!
//! The multibody hydraulics solver is an external collaborator. The driver
//! hands it a fully decoded [`SolveRequest`] and receives a
//! [`SensorStore`]; nothing else crosses the boundary.

use boomsim_types::{BodyModel, BoomDesign, StepCount};
use serde::{Deserialize, Serialize};

use crate::{SensorStore, SolverError};

/// Multibody model the solver should build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SolverModel {
    /// Single lift boom driven by one cylinder.
    LiftBoom { design: BoomDesign },
    /// Lift and tilt boom, two cylinders.
    PatuCrane,
}

/// `(time, value)` rows of one control signal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ControlTable {
    rows: Vec<[f64; 2]>,
}

impl ControlTable {
    /// Pairs every sampling instant with its value. Extra entries on
    /// either side are dropped.
    pub fn from_samples(times: &[f64], values: &[f64]) -> Self {
        let rows = times
            .iter()
            .zip(values)
            .map(|(&t, &value)| [t, value])
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[[f64; 2]] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Everything the solver needs to run one simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveRequest {
    pub model: SolverModel,
    pub body: BodyModel,
    pub steps: StepCount,
    /// Simulated duration, s.
    pub end_time: f64,
    pub load_mass: f64,
    /// Flexible modes retained per flexible body.
    pub flexible_modes: u32,
    /// Initial lift angle, rad.
    pub theta1: f64,
    /// Initial tilt angle, rad. Only set for dual-arm runs.
    pub theta2: Option<f64>,
    /// Spool controls, one table per actuator.
    pub controls: Vec<ControlTable>,
    pub pump_pressure: ControlTable,
    /// Initial chamber pressures `p1..p4`, Pa.
    pub initial_pressures: [f64; 4],
}

/// An engine that runs a multibody hydraulics model and records sensors.
///
/// Implementations own any engine state; the driver calls [`Solver::solve`]
/// exactly once per run and [`Solver::show_solution`] only when the run
/// asks for the solution viewer.
pub trait Solver {
    fn solve(&mut self, request: &SolveRequest) -> Result<SensorStore, SolverError>;

    /// Opens an interactive viewer of the last solution.
    fn show_solution(&mut self) -> Result<(), SolverError> {
        Ok(())
    }
}

impl<S: Solver + ?Sized> Solver for Box<S> {
    fn solve(&mut self, request: &SolveRequest) -> Result<SensorStore, SolverError> {
        (**self).solve(request)
    }

    fn show_solution(&mut self) -> Result<(), SolverError> {
        (**self).show_solution()
    }
}
