//! Layout command - prints the offset tables of a run.

use anyhow::Result;
use boomsim_layout::{ChannelLayout, SlotKind};

use super::{ConfigSource, RunOverrides, load_config};
use crate::style::{colors::SemanticStyle, print_data_table, print_section};

pub fn run(source: &ConfigSource, overrides: &RunOverrides) -> Result<()> {
    let config = load_config(source, overrides)?;
    let layouts = ChannelLayout::for_run(
        config.steps(),
        config.run.mode,
        config.variant().body_model(),
    )?;

    println!(
        "{} {} {} run, N = {}",
        "Layout of a".muted(),
        config.run.mode,
        config.variant().body_model(),
        config.steps().code()
    );

    for layout in [&layouts.input, &layouts.output] {
        print_section(&format!(
            "{} buffer ({} cells)",
            layout.side(),
            layout.total_len()
        ));
        print_data_table(&["channel", "offset", "len", "end", "unit"], &rows(layout));
    }

    Ok(())
}

fn rows(layout: &ChannelLayout) -> Vec<Vec<String>> {
    layout
        .slots()
        .iter()
        .map(|slot| {
            let (name, unit) = match slot.kind {
                SlotKind::Channel(channel) => (channel.as_str().to_string(), channel.unit()),
                SlotKind::Padding => ("(reserved)".to_string(), ""),
            };
            vec![
                name,
                slot.offset.to_string(),
                slot.len.to_string(),
                slot.end().to_string(),
                unit.to_string(),
            ]
        })
        .collect()
}
