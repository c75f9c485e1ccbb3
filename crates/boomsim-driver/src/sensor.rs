//! Recorded solver sensors.
//!
//! The solver records every sensor as a table of rows, one row per step,
//! in the solver's native units. Column `0` is usually simulated time;
//! which column carries a channel is fixed per sensor and lives in the
//! model strategies.

use std::collections::BTreeMap;
use std::fmt::{self, Display};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{SolverError, cells};

/// Sensors the multibody model records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SensorId {
    #[serde(rename = "sDistance")]
    Distance,
    #[serde(rename = "sVelocity")]
    Velocity,
    #[serde(rename = "sPressures")]
    Pressures,
    #[serde(rename = "sAngle")]
    Angle,
    #[serde(rename = "sAngVelocity")]
    AngularVelocity,
    #[serde(rename = "StrainPoint")]
    StrainPoint,
    #[serde(rename = "StressPoint")]
    StressPoint,
    #[serde(rename = "deltaY")]
    Deflection,
    #[serde(rename = "sDistance1")]
    Distance1,
    #[serde(rename = "sDistance2")]
    Distance2,
    #[serde(rename = "sVelocity1")]
    Velocity1,
    #[serde(rename = "sVelocity2")]
    Velocity2,
    #[serde(rename = "sPressures1")]
    Pressures1,
    #[serde(rename = "sPressures2")]
    Pressures2,
    #[serde(rename = "StrainF1")]
    StrainF1,
    #[serde(rename = "StrainF2")]
    StrainF2,
    #[serde(rename = "Stress1")]
    Stress1,
    #[serde(rename = "Stress2")]
    Stress2,
}

impl SensorId {
    pub fn as_str(self) -> &'static str {
        match self {
            SensorId::Distance => "sDistance",
            SensorId::Velocity => "sVelocity",
            SensorId::Pressures => "sPressures",
            SensorId::Angle => "sAngle",
            SensorId::AngularVelocity => "sAngVelocity",
            SensorId::StrainPoint => "StrainPoint",
            SensorId::StressPoint => "StressPoint",
            SensorId::Deflection => "deltaY",
            SensorId::Distance1 => "sDistance1",
            SensorId::Distance2 => "sDistance2",
            SensorId::Velocity1 => "sVelocity1",
            SensorId::Velocity2 => "sVelocity2",
            SensorId::Pressures1 => "sPressures1",
            SensorId::Pressures2 => "sPressures2",
            SensorId::StrainF1 => "StrainF1",
            SensorId::StrainF2 => "StrainF2",
            SensorId::Stress1 => "Stress1",
            SensorId::Stress2 => "Stress2",
        }
    }
}

impl Display for SensorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rows recorded by one sensor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SensorTable {
    #[serde(with = "cells::rows")]
    rows: Vec<Vec<f64>>,
}

impl SensorTable {
    pub fn new(rows: Vec<Vec<f64>>) -> Self {
        Self { rows }
    }

    /// Builds a table whose row `i` is `[time[i], columns[0][i], ...]`.
    ///
    /// Every column must have exactly one value per time instant.
    pub fn from_columns(time: &[f64], columns: &[&[f64]]) -> Result<Self, SolverError> {
        if let Some((index, column)) = columns
            .iter()
            .enumerate()
            .find(|(_, column)| column.len() != time.len())
        {
            return Err(SolverError::ColumnLength {
                column: index + 1,
                expected: time.len(),
                actual: column.len(),
            });
        }

        let rows = time
            .iter()
            .enumerate()
            .map(|(i, &t)| {
                std::iter::once(t)
                    .chain(columns.iter().map(|column| column[i]))
                    .collect()
            })
            .collect();
        Ok(Self { rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }
}

/// Everything the solver recorded during one run, keyed by sensor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SensorStore {
    tables: BTreeMap<SensorId, SensorTable>,
}

impl SensorStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, sensor: SensorId, table: SensorTable) -> Self {
        self.insert(sensor, table);
        self
    }

    pub fn insert(&mut self, sensor: SensorId, table: SensorTable) {
        self.tables.insert(sensor, table);
    }

    pub fn table(&self, sensor: SensorId) -> Result<&SensorTable, SolverError> {
        self.tables
            .get(&sensor)
            .ok_or(SolverError::MissingSensor { sensor })
    }

    pub fn sensors(&self) -> impl Iterator<Item = SensorId> + '_ {
        self.tables.keys().copied()
    }

    /// Reads `column` of the first `steps` rows of `sensor`.
    ///
    /// Fewer rows than `steps` is an error. Extra rows are dropped with a
    /// warning; solvers that record the initial state produce one more row
    /// than the run has steps.
    pub fn column(
        &self,
        sensor: SensorId,
        column: usize,
        steps: usize,
    ) -> Result<Vec<f64>, SolverError> {
        let table = self.table(sensor)?;

        if table.len() < steps {
            return Err(SolverError::ShortSensorStore {
                sensor,
                expected: steps,
                actual: table.len(),
            });
        }
        if table.len() > steps {
            tracing::warn!(
                %sensor,
                rows = table.len(),
                steps,
                "sensor recorded more rows than the run has steps, extra rows ignored"
            );
        }

        table.rows[..steps]
            .iter()
            .enumerate()
            .map(|(row, cells)| {
                cells
                    .get(column)
                    .copied()
                    .ok_or(SolverError::MissingColumn {
                        sensor,
                        row,
                        column,
                    })
            })
            .collect()
    }

    /// Loads a store previously written with [`SensorStore::save_json`].
    pub fn load_json(path: &Path) -> Result<Self, SolverError> {
        let content = fs::read_to_string(path).map_err(|source| SolverError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| SolverError::Decode {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save_json(&self, path: &Path) -> Result<(), SolverError> {
        let content = serde_json::to_string(self).map_err(|source| SolverError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, content).map_err(|source| SolverError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
