//! Inspect command - channel summaries or values of a stored artifact.

use std::path::Path;

use anyhow::{Context, Result};
use boomsim_driver::RunArtifact;
use boomsim_types::{Channel, ChannelRole};

use crate::style::{format_value, print_data_table, print_info_table};

pub fn run(path: &Path, channel: Option<Channel>, limit: usize) -> Result<()> {
    let artifact = RunArtifact::load(path)
        .with_context(|| format!("Failed to load artifact {}", path.display()))?;
    let header = artifact.header();

    print_info_table(&[
        ("mode", header.mode.to_string()),
        ("variant", header.variant.to_string()),
        ("steps", header.steps.to_string()),
        ("end time", format!("{} s", header.end_time)),
        ("load", format!("{} kg", header.load_mass)),
    ]);

    match channel {
        Some(channel) => print_values(&artifact, channel, limit),
        None => {
            print_summaries(&artifact);
            Ok(())
        }
    }
}

fn print_summaries(artifact: &RunArtifact) {
    let rows: Vec<Vec<String>> = artifact
        .summaries()
        .iter()
        .map(|summary| {
            vec![
                summary.channel.to_string(),
                summary.channel.unit().to_string(),
                format_value(summary.first),
                format_value(summary.last),
                format_value(summary.min),
                format_value(summary.max),
            ]
        })
        .collect();
    print_data_table(&["channel", "unit", "first", "last", "min", "max"], &rows);
}

fn print_values(artifact: &RunArtifact, channel: Channel, limit: usize) -> Result<()> {
    let values = artifact.channel(channel)?;
    let times = artifact.time_axis();

    // Scalars have no time axis.
    let scalar = channel.role() == ChannelRole::Scalar;
    let rows: Vec<Vec<String>> = if scalar {
        values
            .iter()
            .map(|value| vec![String::new(), format_value(*value)])
            .collect()
    } else {
        times
            .iter()
            .zip(values)
            .take(limit)
            .map(|(t, value)| vec![format_value(*t), format_value(*value)])
            .collect()
    };

    let header = format!("{channel} [{}]", channel.unit());
    print_data_table(&["t [s]", header.as_str()], &rows);
    if !scalar && values.len() > limit {
        println!("({} of {} steps shown)", limit, values.len());
    }
    Ok(())
}
