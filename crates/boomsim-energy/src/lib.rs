//! # boomsim-energy: Actuator work accounting
//!
//! Derives the cylinder force `F` and the cumulative work `E` of a run from
//! the recorded stroke `s` and the two chamber pressures `p1` (piston side)
//! and `p2` (rod side):
//!
//! ```text
//! F[0] = 0                         E[0] = 0
//! F[i] = p1[i]·A1 − p2[i]·A2       E[i] = F[i]·(s[i] − s[i−1]) + E[i−1]
//! ```
//!
//! The work sum is left-type: the force at step `i` times the stroke
//! increment ending at `i`. Reference outputs depend on this exact
//! recurrence, so it is not replaced with a trapezoidal rule.
//!
//! NaN and infinite inputs propagate unchanged.

mod areas;
mod integrator;

pub use areas::CylinderAreas;
pub use integrator::{EnergyError, EnergyIntegrator, EnergyTrace};
