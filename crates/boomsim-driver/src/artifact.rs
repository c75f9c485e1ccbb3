//! Persisted run artifacts.
//!
//! The `(input, output)` buffer pair is the unit of persistence. Consumers
//! index into it purely by layout offsets, so the header stores exactly
//! what is needed to re-derive both layouts.

use std::fs;
use std::path::{Path, PathBuf};

use boomsim_codec::{CodecError, InputVector, OutputVector, PackedVector};
use boomsim_layout::ChannelLayout;
use boomsim_types::{ArmMode, Channel, ModelVariant, StepCount};
use serde::{Deserialize, Serialize};

use crate::{ArtifactError, cells};
use crate::waveform::sample_times;

/// Run identity stored alongside the buffers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArtifactHeader {
    pub mode: ArmMode,
    pub variant: ModelVariant,
    pub steps: StepCount,
    pub end_time: f64,
    pub load_mass: f64,
}

impl ArtifactHeader {
    /// File stem, e.g. `16-rigid-default-s3200Steps200Load`.
    pub fn file_stem(&self) -> String {
        format!(
            "{}-{}-s{}Steps{}Load",
            self.end_time, self.variant, self.steps, self.load_mass
        )
    }

    /// Artifact path relative to an output directory.
    pub fn relative_path(&self) -> PathBuf {
        let group = match self.mode {
            ArmMode::SingleArm => "OneArm",
            ArmMode::DualArm => "TwoArms",
        };
        Path::new(group).join(format!("{}.json", self.file_stem()))
    }
}

#[derive(Serialize, Deserialize)]
struct StoredArtifact {
    header: ArtifactHeader,
    #[serde(with = "cells::series")]
    input: Vec<f64>,
    #[serde(with = "cells::series")]
    output: Vec<f64>,
}

/// The input and output buffers of one completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunArtifact {
    header: ArtifactHeader,
    input: InputVector,
    output: OutputVector,
}

impl RunArtifact {
    pub fn new(header: ArtifactHeader, input: InputVector, output: OutputVector) -> Self {
        Self {
            header,
            input,
            output,
        }
    }

    pub fn header(&self) -> &ArtifactHeader {
        &self.header
    }

    pub fn input(&self) -> &InputVector {
        &self.input
    }

    pub fn output(&self) -> &OutputVector {
        &self.output
    }

    pub fn into_parts(self) -> (InputVector, OutputVector) {
        (self.input, self.output)
    }

    /// Borrows a channel from the output buffer, falling back to the input.
    pub fn channel(&self, channel: Channel) -> Result<&[f64], CodecError> {
        if self.output.layout().contains(channel) {
            self.output.channel(channel)
        } else {
            self.input.channel(channel)
        }
    }

    /// Sampling instants the buffers are indexed by.
    pub fn time_axis(&self) -> Vec<f64> {
        sample_times(self.header.steps, self.header.end_time)
    }

    /// Final cumulative work, `None` for runs without energy accounting.
    pub fn total_work(&self) -> Option<f64> {
        self.output
            .channel(Channel::Energy)
            .ok()
            .and_then(|energy| energy.last().copied())
    }

    /// Summaries of every output channel in buffer order.
    pub fn summaries(&self) -> Vec<ChannelSummary> {
        self.output
            .layout()
            .channels()
            .filter_map(|channel| {
                let values = self.output.channel(channel).ok()?;
                ChannelSummary::of(channel, values)
            })
            .collect()
    }

    /// Writes the artifact as JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ArtifactError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ArtifactError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let stored = StoredArtifact {
            header: self.header,
            input: self.input.as_slice().to_vec(),
            output: self.output.as_slice().to_vec(),
        };
        let content = serde_json::to_string(&stored).map_err(|source| ArtifactError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, content).map_err(|source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::info!(path = %path.display(), "run artifact saved");
        Ok(())
    }

    /// Loads an artifact and checks both buffers against their layouts.
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let content = fs::read_to_string(path).map_err(|source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let stored: StoredArtifact =
            serde_json::from_str(&content).map_err(|source| ArtifactError::Json {
                path: path.to_path_buf(),
                source,
            })?;

        let header = stored.header;
        let layout_err = |source: CodecError| ArtifactError::Layout {
            path: path.to_path_buf(),
            source,
        };
        let layouts = ChannelLayout::for_run(header.steps, header.mode, header.variant.body_model())
            .map_err(|err| layout_err(err.into()))?;

        let input = PackedVector::from_parts(layouts.input, stored.input).map_err(layout_err)?;
        let output = PackedVector::from_parts(layouts.output, stored.output).map_err(layout_err)?;

        Ok(Self::new(header, input, output))
    }
}

/// First, last and extreme values of one channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelSummary {
    pub channel: Channel,
    pub first: f64,
    pub last: f64,
    pub min: f64,
    pub max: f64,
}

impl ChannelSummary {
    /// `None` for an empty channel. NaN cells are skipped by `min`/`max`;
    /// both are NaN when every cell is NaN.
    pub fn of(channel: Channel, values: &[f64]) -> Option<Self> {
        let first = *values.first()?;
        let last = *values.last()?;
        let (min, max) = values
            .iter()
            .copied()
            .filter(|value| !value.is_nan())
            .fold(None, |range, value| match range {
                None => Some((value, value)),
                Some((min, max)) => Some((f64::min(min, value), f64::max(max, value))),
            })
            .unwrap_or((f64::NAN, f64::NAN));
        Some(Self {
            channel,
            first,
            last,
            min,
            max,
        })
    }
}
