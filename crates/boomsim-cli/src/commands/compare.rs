//! Compare command - two artifacts side by side.

use std::path::Path;

use anyhow::{Context, Result};
use boomsim_driver::{ComparisonReport, RunArtifact};

use crate::style::{colors::SemanticStyle, format_value, print_data_table, print_warn};

pub fn run(baseline: &Path, candidate: &Path) -> Result<()> {
    let base = RunArtifact::load(baseline)
        .with_context(|| format!("Failed to load artifact {}", baseline.display()))?;
    let cand = RunArtifact::load(candidate)
        .with_context(|| format!("Failed to load artifact {}", candidate.display()))?;

    if base.header().steps != cand.header().steps {
        print_warn(&format!(
            "runs have different step counts ({} vs {}), per-step comparison is not meaningful",
            base.header().steps,
            cand.header().steps
        ));
    }

    let report = ComparisonReport::new(&base, &cand);
    println!("{} {}", "baseline: ".muted(), report.baseline.code());
    println!("{} {}", "candidate:".muted(), report.candidate.code());

    let rows: Vec<Vec<String>> = report
        .rows
        .iter()
        .map(|row| {
            vec![
                row.channel.to_string(),
                format_value(row.baseline.last),
                format_value(row.candidate.last),
                format_value(row.final_delta()),
                row.peak_ratio()
                    .map_or_else(|| "-".to_string(), |ratio| format!("{ratio:.3}")),
            ]
        })
        .collect();
    print_data_table(
        &["channel", "baseline last", "candidate last", "delta", "peak ratio"],
        &rows,
    );

    if let (Some(base_work), Some(cand_work)) = (base.total_work(), cand.total_work()) {
        println!(
            "{} {} J",
            "final energy delta:".header(),
            format_value(cand_work - base_work)
        );
    }

    Ok(())
}
