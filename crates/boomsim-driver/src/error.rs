//! Driver and solver error types.
//!
//! None of these are recovered from locally. The driver never retries a
//! solver call and never patches partial data; every error reaches the
//! caller as-is.

use std::path::PathBuf;

use boomsim_codec::CodecError;
use boomsim_energy::EnergyError;
use boomsim_layout::LayoutError;

use crate::sensor::SensorId;

/// Failures of the solver collaborator or of its recorded sensor store.
#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    /// The solver raised an error while running the model.
    #[error("solver failed: {0}")]
    Failed(String),

    /// A sensor needed for the output layout was not recorded.
    #[error("sensor {sensor} was not recorded")]
    MissingSensor { sensor: SensorId },

    /// A sensor recorded fewer rows than the run has steps.
    #[error("sensor {sensor} recorded {actual} rows, run has {expected} steps")]
    ShortSensorStore {
        sensor: SensorId,
        expected: usize,
        actual: usize,
    },

    /// A sensor column does not have one value per time instant.
    #[error("sensor column {column} has {actual} values, time axis has {expected}")]
    ColumnLength {
        column: usize,
        expected: usize,
        actual: usize,
    },

    /// A row does not contain the column a channel is read from.
    #[error("sensor {sensor} row {row} has no column {column}")]
    MissingColumn {
        sensor: SensorId,
        row: usize,
        column: usize,
    },

    /// A recorded sensor store could not be read.
    #[error("failed to read sensor store at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A recorded sensor store is not valid JSON.
    #[error("failed to parse sensor store at {path}: {source}")]
    Decode {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Failures while persisting or loading a run artifact.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("failed to access artifact at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to (de)serialize artifact at {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The stored buffers do not match the layout of the stored header.
    #[error("artifact at {path} does not match its layout: {source}")]
    Layout { path: PathBuf, source: CodecError },
}

/// Errors surfaced by a simulation run.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// Missing channel or shape mismatch while packing a buffer.
    #[error(transparent)]
    Codec(CodecError),

    #[error(transparent)]
    Solver(#[from] SolverError),

    #[error(transparent)]
    Energy(#[from] EnergyError),

    /// Run parameters that no layout or solver request can be built from.
    #[error("invalid run: {0}")]
    InvalidRun(String),

    #[error(transparent)]
    Artifact(#[from] ArtifactError),
}

impl From<CodecError> for DriverError {
    fn from(err: CodecError) -> Self {
        match err {
            CodecError::Layout(layout) => DriverError::Layout(layout),
            other => DriverError::Codec(other),
        }
    }
}
