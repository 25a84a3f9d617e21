//! Component C — Matrix Builder.
//!
//! Converts `(Links, PerformanceModel)` into the row-stochastic transition
//! matrix `P` and a family of per-counter cost matrices `{C_k}`, under the
//! labeling/defaulting policy of SPEC_FULL.md §4.3. This policy is
//! load-bearing: it is what lets a performance model specify probabilities
//! for only *some* labels and have the remainder spread uniformly across
//! the unlabeled edges of each state.

use std::collections::{BTreeMap, HashSet};

use smc_core::{Links, Matrix, PerformanceModel, SmcError, SmcResult};
use tracing::{error, trace, warn};

/// The transition matrix plus one cost matrix per counter name declared by
/// the performance model.
pub struct BuiltMatrices {
    pub p: Matrix,
    pub cost: BTreeMap<String, Matrix>,
}

/// Build `(P, {C_k})` from `links` and `model`.
///
/// # Errors
///
/// Returns `NumericError` if any state's total labeled probability `T(i)`
/// exceeds `1` — the residual policy would otherwise produce negative
/// matrix entries (SPEC_FULL.md §9, Open Questions).
pub fn build(links: &Links, model: &PerformanceModel) -> SmcResult<BuiltMatrices> {
    let n = links.total_nodes;
    let mut p = Matrix::zeros(n);
    let counter_names = model.counter_names();
    let mut cost: BTreeMap<String, Matrix> = counter_names
        .iter()
        .map(|name| (name.clone(), Matrix::zeros(n)))
        .collect();

    if n == 0 {
        return Ok(BuiltMatrices { p, cost });
    }

    // Pass 1: per-state totals needed before we can assign residual shares.
    let mut total_labeled_prob = vec![0.0_f64; n]; // T(i)
    let mut unlabeled_count = vec![0usize; n]; // number of unlabeled out-edges
    let mut structural_out_degree = vec![0usize; n]; // round(1/w) from any edge of i
    let mut edge_prob: Vec<Option<f64>> = vec![None; links.links.len()]; // p(e), cached per edge
    let mut warned_labels: HashSet<&str> = HashSet::new(); // unknown labels already logged

    for (idx, link) in links.links.iter().enumerate() {
        check_index(link.src, n)?;
        check_index(link.dst, n)?;

        structural_out_degree[link.src] = link.structural_out_degree();

        if !link.is_labeled() {
            unlabeled_count[link.src] += 1;
            continue;
        }

        let mut p_e = 0.0;
        for label in &link.labels {
            match model.get(label) {
                Some(cfg) => p_e += cfg.probability,
                None => {
                    if warned_labels.insert(label.as_str()) {
                        warn!(label = %label, "label referenced by edge absent from performance model; treating as 0 probability, 0 counters");
                    }
                }
            }
        }
        if p_e < 0.0 {
            error!(state = link.src, probability = p_e, "negative edge probability");
            return Err(SmcError::NumericError(format!(
                "state {}: negative probability {p_e} on a labeled edge",
                link.src
            )));
        }
        edge_prob[idx] = Some(p_e);
        total_labeled_prob[link.src] += p_e;
    }

    for i in 0..n {
        if total_labeled_prob[i] > 1.0 + 1e-9 {
            error!(state = i, total = total_labeled_prob[i], "T(i) > 1");
            return Err(SmcError::NumericError(format!(
                "state {i}: total labeled probability {} exceeds 1",
                total_labeled_prob[i]
            )));
        }
        if total_labeled_prob[i] == 0.0 {
            // Fully-unlabeled (or edgeless) state: fall back to the
            // structural out-degree so it still distributes uniformly.
            trace!(state = i, "T(i) = 0; falling back to uniform distribution over structural out-degree");
            unlabeled_count[i] = structural_out_degree[i];
        }
    }

    let residual: Vec<f64> = (0..n)
        .map(|i| {
            if unlabeled_count[i] > 0 {
                (1.0 - total_labeled_prob[i]) / unlabeled_count[i] as f64
            } else {
                trace!(state = i, "no unlabeled out-edges; residual is 0");
                0.0
            }
        })
        .collect();

    // Pass 2: assign contributions.
    for (idx, link) in links.links.iter().enumerate() {
        let contribution = match edge_prob[idx] {
            Some(p_e) if total_labeled_prob[link.src] > 0.0 => p_e,
            _ => residual[link.src],
        };
        p.add(link.src, link.dst, contribution);

        for label in &link.labels {
            let Some(cfg) = model.get(label) else {
                continue;
            };
            for (name, value) in &cfg.counters {
                if let Some(matrix) = cost.get_mut(name) {
                    matrix.add(link.src, link.dst, *value);
                }
            }
        }
    }

    Ok(BuiltMatrices { p, cost })
}

fn check_index(idx: usize, n: usize) -> SmcResult<()> {
    if idx >= n {
        return Err(SmcError::SchemaError(format!(
            "edge references state {idx}, out of range for total_nodes {n}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use smc_core::{LabelConfig, Link};

    fn link(src: usize, dst: usize, weight: f64, labels: &[&str]) -> Link {
        Link {
            src,
            dst,
            weight,
            labels: labels.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn links(total_nodes: usize, edges: Vec<Link>) -> Links {
        Links {
            total_nodes,
            links: edges,
        }
    }

    fn model_with(label: &str, probability: f64, counters: &[(&str, f64)]) -> PerformanceModel {
        let mut m = PerformanceModel::empty();
        m.insert(
            label,
            LabelConfig {
                probability,
                counters: counters.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
            },
        );
        m
    }

    /// S1 — two-state absorber.
    #[test]
    fn s1_two_state_absorber() {
        let l = links(2, vec![link(0, 1, 1.0, &["a"]), link(1, 1, 1.0, &[])]);
        let model = model_with("a", 1.0, &[]);
        let built = build(&l, &model).unwrap();
        assert!((built.p.get(0, 0) - 0.0).abs() < 1e-12);
        assert!((built.p.get(0, 1) - 1.0).abs() < 1e-12);
        assert!((built.p.get(1, 1) - 1.0).abs() < 1e-12);
    }

    /// S2 — residual split.
    #[test]
    fn s2_residual_split() {
        let l = links(
            3,
            vec![
                link(0, 1, 0.5, &["a"]),
                link(0, 2, 0.5, &[]),
                link(1, 1, 1.0, &[]),
                link(2, 2, 1.0, &[]),
            ],
        );
        let model = model_with("a", 0.3, &[]);
        let built = build(&l, &model).unwrap();
        assert!((built.p.get(0, 1) - 0.3).abs() < 1e-9);
        assert!((built.p.get(0, 2) - 0.7).abs() < 1e-9);
        assert!((built.p.get(0, 0) - 0.0).abs() < 1e-9);
    }

    /// S3 — unlabeled uniform.
    #[test]
    fn s3_unlabeled_uniform() {
        let l = links(
            3,
            vec![
                link(0, 1, 0.5, &[]),
                link(0, 2, 0.5, &[]),
                link(1, 1, 1.0, &[]),
                link(2, 2, 1.0, &[]),
            ],
        );
        let model = PerformanceModel::empty();
        let built = build(&l, &model).unwrap();
        assert!((built.p.get(0, 1) - 0.5).abs() < 1e-9);
        assert!((built.p.get(0, 2) - 0.5).abs() < 1e-9);
    }

    /// S4 — counter accumulation.
    #[test]
    fn s4_counter_accumulation() {
        let l = links(2, vec![link(0, 1, 1.0, &["a"]), link(1, 1, 1.0, &[])]);
        let model = model_with("a", 1.0, &[("cost", 4.0)]);
        let built = build(&l, &model).unwrap();
        assert!((built.cost["cost"].get(0, 1) - 4.0).abs() < 1e-12);
        assert_eq!(built.cost["cost"].get(1, 1), 0.0);
    }

    /// S5 — three-state loop with drain.
    #[test]
    fn s5_loop_with_drain() {
        let l = links(
            3,
            vec![
                link(0, 1, 1.0, &["a"]),
                link(1, 0, 0.5, &["a"]),
                link(1, 2, 0.5, &[]),
                link(2, 2, 1.0, &[]),
            ],
        );
        let model = model_with("a", 0.5, &[]);
        let built = build(&l, &model).unwrap();
        assert!((built.p.get(1, 0) - 0.5).abs() < 1e-9);
        assert!((built.p.get(1, 2) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn t_greater_than_one_is_rejected() {
        let l = links(1, vec![link(0, 0, 1.0, &["a", "b"])]);
        let mut model = model_with("a", 0.7, &[]);
        model.insert(
            "b",
            LabelConfig {
                probability: 0.7,
                counters: Default::default(),
            },
        );
        let err = build(&l, &model).unwrap_err();
        assert!(matches!(err, SmcError::NumericError(_)));
    }

    #[test]
    fn zero_probability_label_receives_no_residual_when_t_positive() {
        // Open question from SPEC_FULL.md §9: when T(i) > 0 from some other
        // labeled edge, a labeled edge with p(e) = 0 still counts as
        // "labeled" and receives no residual, so the row can sum to < 1.
        let l = links(
            3,
            vec![
                link(0, 1, 1.0, &["a"]),
                link(0, 2, 1.0, &["zero"]),
                link(1, 1, 1.0, &[]),
                link(2, 2, 1.0, &[]),
            ],
        );
        let mut model = model_with("a", 0.5, &[]);
        model.insert(
            "zero",
            LabelConfig {
                probability: 0.0,
                counters: Default::default(),
            },
        );
        let built = build(&l, &model).unwrap();
        assert!((built.p.get(0, 1) - 0.5).abs() < 1e-12);
        assert_eq!(built.p.get(0, 2), 0.0);
        assert!((built.p.row_sum(0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn empty_graph_returns_empty_matrices() {
        let l = links(0, vec![]);
        let model = PerformanceModel::empty();
        let built = build(&l, &model).unwrap();
        assert_eq!(built.p.n(), 0);
    }
}
