//! Input command - builds the solver input buffer from configuration.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use boomsim_driver::SimulationDriver;
use boomsim_types::ChannelRole;

use super::{ConfigSource, RunOverrides, load_config};
use crate::style::{format_value, print_data_table, print_info_table, print_success};

pub fn run(source: &ConfigSource, overrides: &RunOverrides, out: Option<&Path>) -> Result<()> {
    let config = load_config(source, overrides)?;
    let params = config.to_run_params()?;
    let driver = SimulationDriver::new(params, config.control_plan())?;
    let input = driver.build_input()?;

    print_info_table(&[
        ("mode", driver.params().mode.to_string()),
        ("variant", driver.params().variant.to_string()),
        ("steps", driver.params().steps.to_string()),
        ("end time", format!("{} s", driver.params().end_time)),
        ("cells", input.len().to_string()),
    ]);

    let decoded = input.decode();
    let mut rows = Vec::new();
    for channel in input.layout().channels() {
        let row = match channel.role() {
            ChannelRole::Series => {
                let values = decoded.series(channel).unwrap_or_default();
                let first = values.first().copied().unwrap_or_default();
                let last = values.last().copied().unwrap_or_default();
                vec![channel.to_string(), format_value(first), format_value(last)]
            }
            ChannelRole::Scalar => {
                let value = decoded.scalar(channel).unwrap_or_default();
                vec![channel.to_string(), format_value(value), String::new()]
            }
        };
        rows.push(row);
    }
    print_data_table(&["channel", "first", "last"], &rows);

    if let Some(path) = out {
        let json = serde_json::to_string(input.as_slice()).context("Failed to serialize input")?;
        fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        print_success(&format!("Wrote input buffer to {}", path.display()));
    }

    Ok(())
}
