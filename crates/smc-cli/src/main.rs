//! CLI entry point. See SPEC_FULL.md §6 for the interface contract.

mod cli;

use std::process::ExitCode;

use clap::Parser;
use cli::Cli;
use serde_json::Value;
use smc_algo::{analyze, build_matrices, initial_distribution, AnalyzerConfig};
use smc_core::{Graph, SmcError, SmcResult};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    match run(&cli) {
        Ok(()) => ExitCode::from(0),
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(exit_code_for(&err))
        }
    }
}

/// Build the logging filter with `--log-level` as the base directive, then
/// layer any `RUST_LOG` directives on top — per-target overrides from
/// `RUST_LOG` narrow or widen specific targets without silently discarding
/// the flag's level for everything else.
fn init_logging(level: tracing::Level) {
    let mut filter = EnvFilter::new(level.to_string());
    if let Ok(rust_log) = std::env::var(EnvFilter::DEFAULT_ENV) {
        for directive in rust_log.split(',').filter(|d| !d.is_empty()) {
            match directive.parse() {
                Ok(d) => filter = filter.add_directive(d),
                Err(e) => eprintln!("ignoring invalid RUST_LOG directive '{directive}': {e}"),
            }
        }
    }
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn exit_code_for(err: &SmcError) -> u8 {
    match err {
        SmcError::ArgError(_) => 1,
        SmcError::Io(_) | SmcError::DecodeError(_) | SmcError::SchemaError(_) => 2,
        SmcError::NumericError(_) => 3,
        SmcError::Other(_) => 2,
    }
}

fn run(cli: &Cli) -> SmcResult<()> {
    let states_prefix = cli
        .states
        .as_ref()
        .ok_or_else(|| SmcError::ArgError(
            "--states (the path prefix for the states data) is required".into(),
        ))?;

    let perf_model = smc_io::load_perf_model_optional(cli.perf.as_deref())?;
    let graph = smc_io::load_graph(&states_prefix.to_string_lossy())?;

    let built = build_matrices(&graph.links, &perf_model)?;
    let pi0 = initial_distribution(graph.state_count());
    let result = analyze(&built.p, &built.cost, &pi0, AnalyzerConfig::default())?;

    info!(
        iterations = result.iterations,
        stop_reason = ?result.stop_reason,
        "analysis complete"
    );

    print_stationary_distribution(&graph, &result.pi);

    let metrics_json = serde_json::to_string_pretty(&result.metrics)
        .map_err(|e| SmcError::Other(format!("serializing metrics: {e}")))?;
    println!("{metrics_json}");

    Ok(())
}

/// One line per non-negligible stationary entry: `<idx>: <probability>
/// <state-summary>`. See SPEC_FULL.md §6.
fn print_stationary_distribution(graph: &Graph, pi: &[f64]) {
    for (idx, &prob) in pi.iter().enumerate() {
        if prob > 1e-6 {
            let summary = graph
                .nodes
                .json
                .get(idx)
                .map(|s| state_summary(s))
                .unwrap_or_default();
            println!("{idx:4}: {prob:.8} {summary}");
        }
    }
}

/// Extract `process.globals` and `process.returns` from a node's opaque
/// JSON blob, matching the original `fmt.get_state_string` formatter.
fn state_summary(node_json: &str) -> String {
    let Ok(value) = serde_json::from_str::<Value>(node_json) else {
        return String::new();
    };
    let process = value.get("process");

    let mut out = String::new();
    if let Some(globals) = process.and_then(|p| p.get("globals")) {
        out.push_str(&format!("state: {globals} / "));
    }
    if let Some(returns) = process.and_then(|p| p.get("returns")) {
        out.push_str(&format!("returns: {returns}"));
    }
    out
}
