//! A solver that replays recorded sensors.

use std::path::Path;

use crate::{SensorStore, SolveRequest, Solver, SolverError};

/// Returns a previously recorded [`SensorStore`] for every request.
///
/// Used to re-derive outputs from an earlier solver session without the
/// engine, and as the solver of the command line tool.
#[derive(Debug, Clone, Default)]
pub struct ReplaySolver {
    store: SensorStore,
    requests: usize,
}

impl ReplaySolver {
    pub fn new(store: SensorStore) -> Self {
        Self { store, requests: 0 }
    }

    pub fn from_path(path: &Path) -> Result<Self, SolverError> {
        let store = SensorStore::load_json(path)?;
        tracing::debug!(path = %path.display(), sensors = store.sensors().count(), "loaded sensor store");
        Ok(Self::new(store))
    }

    /// Number of requests answered so far.
    pub fn requests(&self) -> usize {
        self.requests
    }
}

impl Solver for ReplaySolver {
    fn solve(&mut self, request: &SolveRequest) -> Result<SensorStore, SolverError> {
        self.requests += 1;
        tracing::info!(
            model = ?request.model,
            body = %request.body,
            steps = %request.steps,
            "replaying recorded sensors"
        );
        Ok(self.store.clone())
    }
}
