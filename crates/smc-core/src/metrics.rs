//! The `Metrics` result record: per-counter means and the termination
//! histogram.

use std::collections::BTreeMap;

use serde::Serialize;

/// One histogram entry: "by some iteration, cumulative absorption
/// probability has reached `probability`, and the accumulated counter
/// totals along non-absorbed trajectories up to that point are `counters`".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramEntry {
    pub probability: f64,
    pub counters: BTreeMap<String, f64>,
}

/// Expected cumulative counter values plus the termination-conditioned
/// histogram, as produced by the chain analyzer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Metrics {
    /// Counter name -> expected cumulative value from the initial state.
    pub mean: BTreeMap<String, f64>,
    /// Strictly increasing in `.probability`, each in `[0, 1]`.
    pub histogram: Vec<HistogramEntry>,
}
