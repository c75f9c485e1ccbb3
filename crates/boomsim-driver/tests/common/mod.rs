#![allow(dead_code)]

use std::sync::Arc;

use boomsim_driver::{
    Constant, ControlPlan, InitialAngles, RunParams, SensorId, SensorStore, SensorTable,
    SolveRequest, Solver, SolverError,
};
use boomsim_energy::CylinderAreas;
use boomsim_types::{ArmMode, ModelVariant, StepCount};

pub const ALL_SENSORS: [SensorId; 18] = [
    SensorId::Distance,
    SensorId::Velocity,
    SensorId::Pressures,
    SensorId::Angle,
    SensorId::AngularVelocity,
    SensorId::StrainPoint,
    SensorId::StressPoint,
    SensorId::Deflection,
    SensorId::Distance1,
    SensorId::Distance2,
    SensorId::Velocity1,
    SensorId::Velocity2,
    SensorId::Pressures1,
    SensorId::Pressures2,
    SensorId::StrainF1,
    SensorId::StrainF2,
    SensorId::Stress1,
    SensorId::Stress2,
];

/// Value the scripted solver records for `(sensor, row, column)`.
pub fn cell(sensor: SensorId, row: usize, column: usize) -> f64 {
    let index = ALL_SENSORS.iter().position(|s| *s == sensor).unwrap();
    (index * 1000 + row * 10 + column) as f64
}

/// Records every sensor with `rows` rows and seven columns.
pub fn scripted_store(rows: usize, end_time: f64) -> SensorStore {
    let mut store = SensorStore::new();
    for sensor in ALL_SENSORS {
        let table = (0..rows)
            .map(|row| {
                let t = (row + 1) as f64 / rows as f64 * end_time;
                std::iter::once(t)
                    .chain((1..7).map(|column| cell(sensor, row, column)))
                    .collect()
            })
            .collect();
        store.insert(sensor, SensorTable::new(table));
    }
    store
}

/// Solver double that records requests and replays a fixed store.
#[derive(Debug, Default)]
pub struct ScriptedSolver {
    pub store: SensorStore,
    pub failure: Option<String>,
    pub requests: Vec<SolveRequest>,
    pub viewer_opened: bool,
}

impl ScriptedSolver {
    pub fn new(store: SensorStore) -> Self {
        Self {
            store,
            ..Self::default()
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }
}

impl Solver for ScriptedSolver {
    fn solve(&mut self, request: &SolveRequest) -> Result<SensorStore, SolverError> {
        self.requests.push(request.clone());
        match &self.failure {
            Some(message) => Err(SolverError::Failed(message.clone())),
            None => Ok(self.store.clone()),
        }
    }

    fn show_solution(&mut self) -> Result<(), SolverError> {
        self.viewer_opened = true;
        Ok(())
    }
}

pub fn params(steps: usize, mode: ArmMode, variant: ModelVariant) -> RunParams {
    RunParams {
        steps: StepCount::new(steps),
        end_time: 16.0,
        mode,
        variant,
        initial_angles: InitialAngles::from_degrees(14.6, -58.8),
        load_mass: 200.0,
        flexible_modes: 4,
        initial_pressures: [8e6; 4],
        areas: CylinderAreas::new(2.0, 1.0),
        solution_viewer: false,
    }
}

/// Constant control on every actuator.
pub fn constant_plan(mode: ArmMode, control: f64, pump: f64) -> ControlPlan {
    let actuators = (0..mode.actuator_count())
        .map(|_| Arc::new(Constant(control)) as Arc<dyn boomsim_driver::Waveform>)
        .collect();
    ControlPlan::new(actuators, Arc::new(Constant(pump)))
}
