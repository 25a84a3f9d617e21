//! # smc-io: Loaders (Components A and B)
//!
//! Blocking, synchronous loaders that turn filesystem input into the
//! fully-materialized `smc-core` types the analysis core consumes:
//!
//! - [`graph_loader`] reads protobuf graph shards into a [`smc_core::Graph`].
//! - [`perf_model_loader`] reads a YAML/JSON performance-model file into a
//!   [`smc_core::PerformanceModel`].
//!
//! No loader performs any analysis; both return fully-owned values with no
//! further I/O performed by downstream crates.

pub mod graph_loader;
pub mod perf_model_loader;
mod proto;

pub use graph_loader::load as load_graph;
pub use perf_model_loader::{load as load_perf_model, load_optional as load_perf_model_optional};
