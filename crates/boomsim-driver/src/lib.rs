//! # boomsim-driver: Simulation runs
//!
//! Orchestrates one boom simulation against an external multibody
//! hydraulics solver:
//!
//! 1. Derive the input and output [`ChannelLayout`](boomsim_layout::ChannelLayout)
//!    of the run.
//! 2. Sample the control [`Waveform`]s and encode the input buffer.
//! 3. Hand a decoded [`SolveRequest`] to the [`Solver`].
//! 4. Read the recorded [`SensorStore`] columns into the output buffer.
//! 5. Derive force and work with [`boomsim_energy::EnergyIntegrator`]
//!    (single-arm runs).
//!
//! The model variant is resolved once into a [`ModelStrategy`]. Which
//! multibody model is built and which sensor column feeds which channel is
//! decided there.
//!
//! # Example
//!
//! ```ignore
//! let driver = SimulationDriver::new(params, ControlPlan::standard(mode, STANDARD_PUMP_PRESSURE))?;
//! let artifact = driver.run(&mut ReplaySolver::from_path(path)?)?;
//! artifact.save(&out_dir.join(artifact.header().relative_path()))?;
//! ```

mod artifact;
mod cells;
mod compare;
mod driver;
mod error;
mod params;
mod replay;
mod sensor;
mod solver;
mod strategy;
mod waveform;

pub use artifact::{ArtifactHeader, ChannelSummary, RunArtifact};
pub use compare::{ComparisonReport, ComparisonRow, compare, compare_channel};
pub use driver::{RunPhase, SimulationDriver};
pub use error::{ArtifactError, DriverError, SolverError};
pub use params::{InitialAngles, RunParams};
pub use replay::ReplaySolver;
pub use sensor::{SensorId, SensorStore, SensorTable};
pub use solver::{ControlTable, SolveRequest, Solver, SolverModel};
pub use strategy::{
    Conversion, Flexible, ModelStrategy, RigidDefault, RigidOptimised, SensorBinding, strategy_for,
};
pub use waveform::{
    Constant, ControlPlan, PiecewiseConstant, STANDARD_PUMP_PRESSURE, Segment, Waveform,
    lift_boom_cycle, lift_lower_cycle, sample, sample_times, tilt_boom_cycle,
};
