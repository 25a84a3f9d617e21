//! Component B — Performance-Model Loader.
//!
//! Parses a declarative YAML (or JSON, which is syntactically a subset of
//! YAML 1.1) performance model file into `smc_core::PerformanceModel`. See
//! SPEC_FULL.md §4.2.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use smc_core::{LabelConfig, PerformanceModel, SmcResult};
use tracing::info;

#[derive(Debug, Default, Deserialize)]
struct RawPerfModel {
    #[serde(default)]
    configs: BTreeMap<String, RawLabelConfig>,
}

#[derive(Debug, Default, Deserialize)]
struct RawLabelConfig {
    #[serde(default)]
    probability: f64,
    #[serde(default)]
    counters: BTreeMap<String, RawCounter>,
}

#[derive(Debug, Deserialize)]
struct RawCounter {
    numeric: f64,
}

/// Load a performance model from `path`. Missing `probability` defaults to
/// `0`; missing `counters` defaults to empty; unknown fields are ignored.
pub fn load(path: &Path) -> SmcResult<PerformanceModel> {
    let text = std::fs::read_to_string(path)?;
    let raw: RawPerfModel = serde_yaml::from_str(&text)
        .map_err(|e| smc_core::SmcError::DecodeError(format!("{}: {e}", path.display())))?;

    let mut model = PerformanceModel::empty();
    for (label, raw_cfg) in raw.configs {
        let counters = raw_cfg
            .counters
            .into_iter()
            .map(|(name, c)| (name, c.numeric))
            .collect();
        model.insert(
            label,
            LabelConfig {
                probability: raw_cfg.probability,
                counters,
            },
        );
    }

    info!(labels = model.len(), path = %path.display(), "performance model loaded");
    Ok(model)
}

/// If `path` is `None`, the model is empty — every label contributes `0`
/// probability and no counters.
pub fn load_optional(path: Option<&Path>) -> SmcResult<PerformanceModel> {
    match path {
        Some(p) => load(p),
        None => Ok(PerformanceModel::empty()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f
    }

    #[test]
    fn parses_full_yaml_config() {
        let f = write_temp(
            r#"
configs:
  a:
    probability: 1.0
    counters:
      cost:
        numeric: 4.0
"#,
        );
        let model = load(f.path()).unwrap();
        let cfg = model.get("a").unwrap();
        assert_eq!(cfg.probability, 1.0);
        assert_eq!(cfg.counters.get("cost"), Some(&4.0));
    }

    #[test]
    fn missing_probability_and_counters_default() {
        let f = write_temp(
            r#"
configs:
  b: {}
"#,
        );
        let model = load(f.path()).unwrap();
        let cfg = model.get("b").unwrap();
        assert_eq!(cfg.probability, 0.0);
        assert!(cfg.counters.is_empty());
    }

    #[test]
    fn json_equivalent_is_accepted() {
        let f = write_temp(r#"{"configs": {"a": {"probability": 0.3}}}"#);
        let model = load(f.path()).unwrap();
        assert_eq!(model.get("a").unwrap().probability, 0.3);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let f = write_temp(
            r#"
configs:
  a:
    probability: 0.5
    unexpected_field: true
unexpected_top_level: 42
"#,
        );
        let model = load(f.path()).unwrap();
        assert_eq!(model.get("a").unwrap().probability, 0.5);
    }

    #[test]
    fn no_path_yields_empty_model() {
        let model = load_optional(None).unwrap();
        assert!(model.is_empty());
    }
}
