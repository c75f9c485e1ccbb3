//! CLI command implementations.

pub mod compare;
pub mod input;
pub mod inspect;
pub mod layout;
pub mod run;

use std::path::PathBuf;

use anyhow::{Context, Result};
use boomsim_config::{BoomsimConfig, ConfigLoader};
use boomsim_types::{ArmMode, ModelVariant};
use clap::Args;

/// Where configuration comes from.
pub struct ConfigSource {
    /// Explicit file; skips the layered sources.
    pub file: Option<PathBuf>,
    pub project_dir: PathBuf,
}

/// Run settings that can be overridden on the command line.
#[derive(Debug, Clone, Default, Args)]
pub struct RunOverrides {
    /// Arm mode (single-arm, dual-arm).
    #[arg(short, long)]
    pub mode: Option<ArmMode>,

    /// Model variant (rigid-default, rigid-optimised, flexible, flexible-optimised).
    #[arg(short, long)]
    pub variant: Option<ModelVariant>,

    /// Step count; overrides end time / time step.
    #[arg(short = 'n', long)]
    pub steps: Option<usize>,

    /// Simulated duration in seconds.
    #[arg(long)]
    pub end_time: Option<f64>,

    /// Payload in kg.
    #[arg(long)]
    pub load_mass: Option<f64>,
}

impl RunOverrides {
    fn apply(&self, config: &mut BoomsimConfig) {
        if let Some(mode) = self.mode {
            config.run.mode = mode;
        }
        if let Some(variant) = self.variant {
            config.set_variant(variant);
        }
        if let Some(steps) = self.steps {
            config.run.steps = Some(steps);
        }
        if let Some(end_time) = self.end_time {
            config.run.end_time = end_time;
        }
        if let Some(load_mass) = self.load_mass {
            config.run.load_mass = load_mass;
        }
    }
}

/// Loads configuration, applies command line overrides on top, then
/// validates the result once.
pub fn load_config(source: &ConfigSource, overrides: &RunOverrides) -> Result<BoomsimConfig> {
    let mut config = match &source.file {
        Some(path) => BoomsimConfig::read_toml_file(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => ConfigLoader::new()
            .with_project_dir(&source.project_dir)
            .merge()
            .context("Failed to load configuration")?,
    };

    overrides.apply(&mut config);
    config.validate()?;

    tracing::debug!(
        mode = %config.run.mode,
        variant = %config.variant(),
        steps = %config.steps(),
        "configuration loaded"
    );
    Ok(config)
}
