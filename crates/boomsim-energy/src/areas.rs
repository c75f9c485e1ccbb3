//! Effective piston areas of a hydraulic cylinder.

use std::f64::consts::FRAC_PI_4;

use serde::{Deserialize, Serialize};

/// Effective areas of a double-acting cylinder, m².
///
/// Fixed per physical rig and read-only for the lifetime of a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CylinderAreas {
    /// Piston-side area `A1`.
    pub piston: f64,
    /// Rod-side (annulus) area `A2`.
    pub annulus: f64,
}

impl CylinderAreas {
    pub fn new(piston: f64, annulus: f64) -> Self {
        Self { piston, annulus }
    }

    /// Areas from bore and rod diameters in metres.
    pub fn from_diameters(piston_diameter: f64, rod_diameter: f64) -> Self {
        let piston = FRAC_PI_4 * piston_diameter * piston_diameter;
        let rod = FRAC_PI_4 * rod_diameter * rod_diameter;
        Self {
            piston,
            annulus: piston - rod,
        }
    }

    /// Net force for one pair of chamber pressures.
    pub fn force(&self, p1: f64, p2: f64) -> f64 {
        p1 * self.piston - p2 * self.annulus
    }
}
