//! # smc-algo: Matrix Builder and Chain Analyzer (Components C and D)
//!
//! The analytical core: [`matrix_builder::build`] turns a loaded graph and
//! performance model into a stochastic transition matrix and per-counter
//! cost matrices under the labeling/defaulting policy, and
//! [`analyzer::analyze`] runs the two-track power iteration that produces
//! the stationary distribution, per-counter means, and the termination
//! histogram.
//!
//! Both functions are pure: no I/O, no global state, single-threaded.

pub mod analyzer;
pub mod matrix_builder;

pub use analyzer::{analyze, initial_distribution, AnalysisResult, AnalyzerConfig, StopReason};
pub use matrix_builder::{build as build_matrices, BuiltMatrices};
