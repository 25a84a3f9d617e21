//! Generated protobuf message types for the fixed graph-shard schema.
//!
//! See `proto/graph.proto`; compiled by `prost-build` in `build.rs`. These
//! are the wire types only — loaders translate them into `smc_core::Graph`
//! at the load boundary, so the rest of the workspace never names
//! `prost::Message` directly.

include!(concat!(env!("OUT_DIR"), "/smc.graph.rs"));
