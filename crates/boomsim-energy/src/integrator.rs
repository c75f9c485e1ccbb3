//! Force and cumulative work recurrence.

use serde::{Deserialize, Serialize};

use crate::CylinderAreas;

/// Input channels of unequal length.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnergyError {
    #[error(
        "channel lengths differ: displacement {displacement}, piston pressure {piston_pressure}, rod pressure {rod_pressure}"
    )]
    ShapeMismatch {
        displacement: usize,
        piston_pressure: usize,
        rod_pressure: usize,
    },
}

/// Derived force and cumulative work, both one value per step.
///
/// Always produced together: `energy` is a function of `force`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyTrace {
    force: Vec<f64>,
    energy: Vec<f64>,
}

impl EnergyTrace {
    /// Actuator force per step, N.
    pub fn force(&self) -> &[f64] {
        &self.force
    }

    /// Cumulative work per step, J.
    pub fn energy(&self) -> &[f64] {
        &self.energy
    }

    pub fn len(&self) -> usize {
        self.force.len()
    }

    pub fn is_empty(&self) -> bool {
        self.force.is_empty()
    }

    /// Work accumulated over the whole run, J.
    pub fn total_work(&self) -> f64 {
        self.energy.last().copied().unwrap_or(0.0)
    }

    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.force, self.energy)
    }
}

/// Integrates actuator work for one cylinder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyIntegrator {
    areas: CylinderAreas,
}

impl EnergyIntegrator {
    pub fn new(areas: CylinderAreas) -> Self {
        Self { areas }
    }

    pub fn areas(&self) -> CylinderAreas {
        self.areas
    }

    /// Runs the recurrence over stroke `s` and chamber pressures `p1`, `p2`.
    ///
    /// Step 0 has no predecessor, so `F[0]` and `E[0]` stay zero. With fewer
    /// than two steps both channels are all zero.
    pub fn integrate(&self, s: &[f64], p1: &[f64], p2: &[f64]) -> Result<EnergyTrace, EnergyError> {
        let n = s.len();
        if p1.len() != n || p2.len() != n {
            return Err(EnergyError::ShapeMismatch {
                displacement: n,
                piston_pressure: p1.len(),
                rod_pressure: p2.len(),
            });
        }

        let mut force = vec![0.0; n];
        let mut energy = vec![0.0; n];

        for i in 1..n {
            force[i] = self.areas.force(p1[i], p2[i]);
            energy[i] = force[i] * (s[i] - s[i - 1]) + energy[i - 1];
        }

        // Postcondition: both channels match the input length
        debug_assert_eq!(force.len(), n);
        debug_assert_eq!(energy.len(), n);

        tracing::debug!(
            steps = n,
            total_work = energy.last().copied().unwrap_or(0.0),
            "integrated actuator work"
        );

        Ok(EnergyTrace { force, energy })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use test_case::test_case;

    fn unit_integrator() -> EnergyIntegrator {
        EnergyIntegrator::new(CylinderAreas::new(1.0, 1.0))
    }

    #[test]
    fn single_step_is_zero() {
        let trace = unit_integrator().integrate(&[0.3], &[5.0], &[1.0]).unwrap();
        assert_eq!(trace.force(), &[0.0]);
        assert_eq!(trace.energy(), &[0.0]);
    }

    #[test]
    fn empty_run_is_empty() {
        let trace = unit_integrator().integrate(&[], &[], &[]).unwrap();
        assert!(trace.is_empty());
        assert_eq!(trace.total_work(), 0.0);
    }

    #[test]
    fn constant_force_over_unit_strokes() {
        let trace = unit_integrator()
            .integrate(&[0.0, 1.0, 2.0], &[0.0, 10.0, 10.0], &[0.0, 0.0, 0.0])
            .unwrap();
        assert_eq!(trace.force(), &[0.0, 10.0, 10.0]);
        assert_eq!(trace.energy(), &[0.0, 10.0, 20.0]);
        assert_eq!(trace.total_work(), 20.0);
    }

    #[test]
    fn uses_force_at_end_of_increment() {
        // A trapezoidal rule would give 0.5·(10 + 30)·1 = 20 for the second step.
        let trace = unit_integrator()
            .integrate(&[0.0, 1.0, 2.0], &[0.0, 10.0, 30.0], &[0.0, 0.0, 0.0])
            .unwrap();
        assert_eq!(trace.energy(), &[0.0, 10.0, 40.0]);
    }

    #[test]
    fn first_step_force_is_ignored() {
        let trace = unit_integrator()
            .integrate(&[0.0, 1.0], &[1e9, 2.0], &[0.0, 0.0])
            .unwrap();
        assert_eq!(trace.force(), &[0.0, 2.0]);
    }

    #[test]
    fn retraction_does_negative_work() {
        let areas = CylinderAreas::new(2.0, 1.0);
        let trace = EnergyIntegrator::new(areas)
            .integrate(&[1.0, 0.5], &[3.0, 3.0], &[1.0, 1.0])
            .unwrap();
        assert_eq!(trace.force(), &[0.0, 5.0]);
        assert_eq!(trace.energy(), &[0.0, -2.5]);
    }

    #[test]
    fn nan_propagates() {
        let trace = unit_integrator()
            .integrate(&[0.0, 1.0, 2.0], &[0.0, f64::NAN, 1.0], &[0.0, 0.0, 0.0])
            .unwrap();
        assert!(trace.force()[1].is_nan());
        assert!(trace.energy()[1].is_nan());
        assert!(trace.energy()[2].is_nan());
    }

    #[test_case(2, 3, 3)]
    #[test_case(3, 2, 3)]
    #[test_case(3, 3, 2)]
    fn unequal_lengths_are_rejected(s: usize, p1: usize, p2: usize) {
        let err = unit_integrator()
            .integrate(&vec![0.0; s], &vec![0.0; p1], &vec![0.0; p2])
            .unwrap_err();
        assert_eq!(
            err,
            EnergyError::ShapeMismatch {
                displacement: s,
                piston_pressure: p1,
                rod_pressure: p2,
            }
        );
    }

    proptest! {
        #[test]
        fn no_motion_means_no_work(
            stroke in -2.0f64..2.0,
            pressures in prop::collection::vec((0.0f64..3e7, 0.0f64..3e7), 1..200),
        ) {
            let n = pressures.len();
            let s = vec![stroke; n];
            let p1: Vec<f64> = pressures.iter().map(|p| p.0).collect();
            let p2: Vec<f64> = pressures.iter().map(|p| p.1).collect();

            let trace = EnergyIntegrator::new(CylinderAreas::from_diameters(0.1, 0.056))
                .integrate(&s, &p1, &p2)
                .unwrap();

            prop_assert!(trace.energy().iter().all(|e| *e == 0.0));
        }

        #[test]
        fn energy_increments_match_recurrence(
            samples in prop::collection::vec((-1.0f64..1.0, 0.0f64..3e7, 0.0f64..3e7), 2..200),
        ) {
            let s: Vec<f64> = samples.iter().map(|x| x.0).collect();
            let p1: Vec<f64> = samples.iter().map(|x| x.1).collect();
            let p2: Vec<f64> = samples.iter().map(|x| x.2).collect();
            let areas = CylinderAreas::new(7.85e-3, 5.39e-3);

            let trace = EnergyIntegrator::new(areas).integrate(&s, &p1, &p2).unwrap();

            prop_assert_eq!(trace.force()[0], 0.0);
            prop_assert_eq!(trace.energy()[0], 0.0);
            for i in 1..s.len() {
                let force = p1[i] * areas.piston - p2[i] * areas.annulus;
                prop_assert_eq!(trace.force()[i], force);
                prop_assert_eq!(trace.energy()[i], force * (s[i] - s[i - 1]) + trace.energy()[i - 1]);
            }
        }
    }
}
