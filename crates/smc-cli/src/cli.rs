//! Command-line argument definitions.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about = "Steady-state and reward analysis over a labeled state-transition graph", long_about = None)]
pub struct Cli {
    /// Path prefix used to glob graph shards (`{prefix}*nodes_*.pb`,
    /// `{prefix}*adjacency_lists_*.pb`). Required; checked manually in
    /// `run` rather than left to clap's own required-arg handling, so a
    /// missing value maps to exit code 1 instead of clap's exit code 2.
    #[arg(short = 's', long = "states")]
    pub states: Option<PathBuf>,

    /// Performance-model file (YAML or JSON). Omit for an empty model.
    #[arg(short = 'm', long = "perf")]
    pub perf: Option<PathBuf>,

    /// Logging level.
    #[arg(long, default_value = "info")]
    pub log_level: tracing::Level,
}
