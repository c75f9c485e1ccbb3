//! Run command - full pipeline against a recorded sensor store.

use std::path::Path;

use anyhow::{Context, Result};
use boomsim_driver::{ReplaySolver, SimulationDriver};

use super::{ConfigSource, RunOverrides, load_config};
use crate::style::{format_value, print_hint, print_info_table, print_path, print_success};

pub fn run(
    source: &ConfigSource,
    overrides: &RunOverrides,
    sensors: &Path,
    out: Option<&Path>,
) -> Result<()> {
    let config = load_config(source, overrides)?;
    let params = config.to_run_params()?;
    let driver = SimulationDriver::new(params, config.control_plan())?;

    let mut solver = ReplaySolver::from_path(sensors)
        .with_context(|| format!("Failed to load sensors from {}", sensors.display()))?;
    let artifact = driver.run(&mut solver)?;

    let path = match out {
        Some(path) => path.to_path_buf(),
        None => config
            .output
            .directory
            .join(artifact.header().relative_path()),
    };
    artifact.save(&path)?;

    let header = artifact.header();
    let mut entries = vec![
        ("mode", header.mode.to_string()),
        ("variant", header.variant.to_string()),
        ("steps", header.steps.to_string()),
        ("input cells", artifact.input().len().to_string()),
        ("output cells", artifact.output().len().to_string()),
    ];
    if let Some(work) = artifact.total_work() {
        entries.push(("total work", format!("{} J", format_value(work))));
    }
    print_info_table(&entries);

    print_success("Run complete");
    print_path("artifact", &path);
    print_hint(&format!("boomsim inspect {}", path.display()));

    Ok(())
}
