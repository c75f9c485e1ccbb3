//! Comparison workflows.
//!
//! Runs of a comparison are data-independent: each owns its buffers and
//! its solver, so they execute in parallel on the rayon pool.

use boomsim_codec::CodecError;
use boomsim_types::Channel;
use rayon::prelude::*;

use crate::{ChannelSummary, DriverError, RunArtifact, RunParams, SimulationDriver, Solver};

/// Runs every driver with a fresh solver from `make_solver`.
///
/// Results keep the order of `drivers`. The first failing run fails the
/// whole comparison.
pub fn compare<S, F>(
    drivers: &[SimulationDriver],
    make_solver: F,
) -> Result<Vec<RunArtifact>, DriverError>
where
    S: Solver,
    F: Fn(&RunParams) -> Result<S, DriverError> + Sync,
{
    drivers
        .par_iter()
        .map(|driver| {
            let mut solver = make_solver(driver.params())?;
            driver.run(&mut solver)
        })
        .collect()
}

/// Per-step difference `candidate - baseline` of one channel.
pub fn compare_channel(
    baseline: &RunArtifact,
    candidate: &RunArtifact,
    channel: Channel,
) -> Result<Vec<f64>, DriverError> {
    let base = baseline.channel(channel)?;
    let cand = candidate.channel(channel)?;
    if base.len() != cand.len() {
        return Err(CodecError::ShapeMismatch {
            channel,
            expected: base.len(),
            actual: cand.len(),
        }
        .into());
    }
    Ok(cand.iter().zip(base).map(|(c, b)| c - b).collect())
}

/// One channel of two runs side by side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComparisonRow {
    pub channel: Channel,
    pub baseline: ChannelSummary,
    pub candidate: ChannelSummary,
}

impl ComparisonRow {
    /// `candidate.last - baseline.last`.
    pub fn final_delta(&self) -> f64 {
        self.candidate.last - self.baseline.last
    }

    /// Peak magnitude ratio, `None` when the baseline peak is zero.
    pub fn peak_ratio(&self) -> Option<f64> {
        let baseline = self.baseline.max.abs().max(self.baseline.min.abs());
        let candidate = self.candidate.max.abs().max(self.candidate.min.abs());
        (baseline != 0.0).then(|| candidate / baseline)
    }
}

/// Output channels two runs have in common, summarised per run.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonReport {
    pub baseline: String,
    pub candidate: String,
    pub rows: Vec<ComparisonRow>,
}

impl ComparisonReport {
    pub fn new(baseline: &RunArtifact, candidate: &RunArtifact) -> Self {
        let candidate_summaries = candidate.summaries();
        let rows = baseline
            .summaries()
            .into_iter()
            .filter_map(|base| {
                candidate_summaries
                    .iter()
                    .find(|summary| summary.channel == base.channel)
                    .map(|cand| ComparisonRow {
                        channel: base.channel,
                        baseline: base,
                        candidate: *cand,
                    })
            })
            .collect();

        Self {
            baseline: baseline.header().file_stem(),
            candidate: candidate.header().file_stem(),
            rows,
        }
    }

    pub fn row(&self, channel: Channel) -> Option<&ComparisonRow> {
        self.rows.iter().find(|row| row.channel == channel)
    }
}
