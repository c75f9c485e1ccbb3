//! boomsim command line tool.
//!
//! Builds solver input buffers, replays recorded solver sessions through
//! the output pipeline, and inspects or compares stored run artifacts.
//!
//! # Quick Start
//!
//! ```bash
//! # Offset tables of a flexible dual-arm run
//! boomsim layout --mode dual-arm --variant flexible --steps 4
//!
//! # Re-derive outputs from a recorded sensor store
//! boomsim run --sensors sensors.json
//!
//! # Compare two stored runs
//! boomsim compare solution/OneArm/a.json solution/OneArm/b.json
//! ```

mod commands;
mod style;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use boomsim_types::Channel;
use clap::{Parser, Subcommand};

use commands::{ConfigSource, RunOverrides};

/// boomsim - hydraulic boom simulation runs.
#[derive(Parser)]
#[command(name = "boomsim")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Read configuration from this file only.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding boomsim.toml and boomsim.local.toml.
    #[arg(short, long, global = true, default_value = ".")]
    project: PathBuf,

    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the input and output offset tables.
    Layout {
        #[command(flatten)]
        overrides: RunOverrides,
    },

    /// Build the solver input buffer.
    Input {
        #[command(flatten)]
        overrides: RunOverrides,

        /// Write the buffer as a JSON array.
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Run the pipeline against a recorded sensor store.
    Run {
        #[command(flatten)]
        overrides: RunOverrides,

        /// Sensor store recorded by the solver (JSON).
        #[arg(short, long)]
        sensors: PathBuf,

        /// Artifact path; defaults to the configured output directory.
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Show channel summaries of a stored artifact.
    Inspect {
        /// Artifact file.
        path: PathBuf,

        /// Print the values of one channel instead.
        #[arg(long)]
        channel: Option<Channel>,

        /// Maximum number of steps to print.
        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// Compare two stored artifacts channel by channel.
    Compare {
        /// Reference run.
        baseline: PathBuf,

        /// Run compared against the reference.
        candidate: PathBuf,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    style::set_no_color(cli.no_color || std::env::var_os("NO_COLOR").is_some());

    match dispatch(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            style::print_error(&format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}

fn dispatch(cli: Cli) -> Result<()> {
    let source = ConfigSource {
        file: cli.config,
        project_dir: cli.project,
    };

    match cli.command {
        Commands::Layout { overrides } => commands::layout::run(&source, &overrides),
        Commands::Input { overrides, out } => {
            commands::input::run(&source, &overrides, out.as_deref())
        }
        Commands::Run {
            overrides,
            sensors,
            out,
        } => commands::run::run(&source, &overrides, &sensors, out.as_deref()),
        Commands::Inspect {
            path,
            channel,
            limit,
        } => commands::inspect::run(&path, channel, limit),
        Commands::Compare {
            baseline,
            candidate,
        } => commands::compare::run(&baseline, &candidate),
    }
}
