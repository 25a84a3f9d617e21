//! The performance model: per-label probabilities and counters.

use std::collections::BTreeMap;

/// A single label's contribution to transition probability and counters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelConfig {
    /// Per-edge probability contributed when this label is present.
    pub probability: f64,
    /// Counter name -> value contributed by edges bearing this label.
    pub counters: BTreeMap<String, f64>,
}

/// `M: Σ → LabelConfig`, keyed by label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PerformanceModel {
    configs: BTreeMap<String, LabelConfig>,
}

impl PerformanceModel {
    /// The empty model: every label defaults to probability 0, no counters.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, label: impl Into<String>, config: LabelConfig) {
        self.configs.insert(label.into(), config);
    }

    /// Look up a label's config. Unknown labels are the caller's concern
    /// (see `SchemaError` semantics); this returns `None` rather than a
    /// default so callers can choose to warn once per unknown label.
    pub fn get(&self, label: &str) -> Option<&LabelConfig> {
        self.configs.get(label)
    }

    /// The full set of counter names declared across every label.
    pub fn counter_names(&self) -> std::collections::BTreeSet<String> {
        self.configs
            .values()
            .flat_map(|cfg| cfg.counters.keys().cloned())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }
}
