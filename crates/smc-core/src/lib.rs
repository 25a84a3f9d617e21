//! # smc-core: Stochastic Model Checking — Data Model
//!
//! Shared types for the performance analysis core of a model-checking
//! toolchain: the labeled state-transition graph (`Graph`/`Nodes`/`Links`),
//! the declarative performance model (`PerformanceModel`/`LabelConfig`), the
//! dense matrices the builder produces (`Matrix`), and the analyzer's result
//! record (`Metrics`).
//!
//! This crate has no I/O and no iteration logic of its own — those live in
//! `smc-io` and `smc-algo` respectively, which depend on this crate for
//! their shared vocabulary.

pub mod error;
pub mod graph;
pub mod matrix;
pub mod metrics;
pub mod model;

pub use error::{SmcError, SmcResult};
pub use graph::{Graph, Link, Links, Nodes};
pub use matrix::Matrix;
pub use metrics::{HistogramEntry, Metrics};
pub use model::{LabelConfig, PerformanceModel};
