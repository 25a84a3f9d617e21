//! Component D — Chain Analyzer.
//!
//! Runs the two-track power iteration described in SPEC_FULL.md §4.4:
//! the ordinary distribution `π` (which settles on absorbing states) and
//! the absorption-stripped distribution `π̃` (which answers "given a
//! trajectory has not yet terminated, what has it accumulated so far").
//! Counters are reduced against both in lockstep to produce the mean and
//! the termination-conditioned histogram.

use std::collections::BTreeMap;

use smc_core::{HistogramEntry, Matrix, Metrics, SmcError, SmcResult};
use tracing::info;

/// Tuning knobs for [`analyze`]. Defaults match the specification: a cap of
/// 2000 iterations and an ℓ₂ convergence tolerance of `1e-6`.
#[derive(Debug, Clone, Copy)]
pub struct AnalyzerConfig {
    pub max_iterations: usize,
    pub tolerance: f64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            max_iterations: 2000,
            tolerance: 1e-6,
        }
    }
}

/// Why iteration stopped. Logged for diagnostics only; both states return a
/// valid result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Converged,
    Exhausted,
}

/// The stationary distribution plus the metrics record.
pub struct AnalysisResult {
    pub pi: Vec<f64>,
    pub metrics: Metrics,
    pub stop_reason: StopReason,
    pub iterations: usize,
}

/// Run the two-track power iteration starting from `pi0` (canonically
/// `e_0`, i.e. all mass on state 0).
///
/// # Errors
///
/// Returns `NumericError` if a NaN appears in `π` during iteration.
pub fn analyze(
    p: &Matrix,
    cost: &BTreeMap<String, Matrix>,
    pi0: &[f64],
    config: AnalyzerConfig,
) -> SmcResult<AnalysisResult> {
    let n = p.n();
    if n == 0 {
        return Ok(AnalysisResult {
            pi: Vec::new(),
            metrics: Metrics::default(),
            stop_reason: StopReason::Converged,
            iterations: 0,
        });
    }

    let absorbing: Vec<bool> = (0..n).map(|i| is_absorbing(p, i)).collect();

    // E_k = C_k ⊙ P, and its row sums — the expected one-step contribution
    // of counter k from each state.
    let expected_step: BTreeMap<String, Vec<f64>> = cost
        .iter()
        .map(|(name, c_k)| (name.clone(), c_k.hadamard(p).row_sums()))
        .collect();

    let mut pi = pi0.to_vec();
    let mut pi_tilde = pi0.to_vec();
    strip_absorbing(&mut pi_tilde, &absorbing);

    let mut mean: BTreeMap<String, f64> = cost.keys().map(|k| (k.clone(), 0.0)).collect();
    let mut raw: BTreeMap<String, f64> = cost.keys().map(|k| (k.clone(), 0.0)).collect();
    let mut histogram: Vec<HistogramEntry> = Vec::new();

    let mut prev_term = 0.0_f64;
    let mut stop_reason = StopReason::Exhausted;
    let mut iterations = 0;

    for t in 0..config.max_iterations {
        iterations = t + 1;

        for (name, step) in &expected_step {
            let contribution_mean: f64 = pi.iter().zip(step).map(|(p_i, s_i)| p_i * s_i).sum();
            let contribution_raw: f64 = pi_tilde.iter().zip(step).map(|(p_i, s_i)| p_i * s_i).sum();
            *mean.get_mut(name).unwrap() += contribution_mean;
            *raw.get_mut(name).unwrap() += contribution_raw;
        }

        let next_pi = p.left_mul_row(&pi);
        check_finite(&next_pi)?;

        let delta = l2_distance(&next_pi, &pi);

        let mut next_pi_tilde = p.left_mul_row(&pi_tilde);
        check_finite(&next_pi_tilde)?;
        strip_absorbing(&mut next_pi_tilde, &absorbing);

        pi = next_pi;
        pi_tilde = next_pi_tilde;

        let term: f64 = (0..n).filter(|&j| absorbing[j]).map(|j| pi[j]).sum();
        if term > prev_term {
            histogram.push(HistogramEntry {
                probability: term,
                counters: raw.clone(),
            });
        }
        prev_term = term;

        if delta < config.tolerance {
            stop_reason = StopReason::Converged;
            break;
        }
    }

    info!(
        ?stop_reason,
        iterations,
        histogram_len = histogram.len(),
        "chain analysis finished"
    );

    Ok(AnalysisResult {
        pi,
        metrics: Metrics { mean, histogram },
        stop_reason,
        iterations,
    })
}

/// A state is absorbing iff `P[i][i] == 1` and it has no other mass — i.e.
/// it is a single self-loop with weight 1, per SPEC_FULL.md §3.
fn is_absorbing(p: &Matrix, i: usize) -> bool {
    (p.get(i, i) - 1.0).abs() < 1e-9
}

/// Zero out absorbing-state mass and renormalize to sum to 1. If the
/// remaining mass is (numerically) zero, leave the vector as all zero and
/// skip renormalization — there is nothing left to normalize.
fn strip_absorbing(v: &mut [f64], absorbing: &[bool]) {
    for (i, is_abs) in absorbing.iter().enumerate() {
        if *is_abs {
            v[i] = 0.0;
        }
    }
    let sum: f64 = v.iter().sum();
    if sum > 1e-12 {
        for x in v.iter_mut() {
            *x /= sum;
        }
    }
}

fn l2_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}

fn check_finite(v: &[f64]) -> SmcResult<()> {
    if v.iter().any(|x| x.is_nan()) {
        return Err(SmcError::NumericError(
            "NaN produced during power iteration".into(),
        ));
    }
    Ok(())
}

/// The canonical initial distribution: all mass on state 0.
pub fn initial_distribution(n: usize) -> Vec<f64> {
    let mut v = vec![0.0; n];
    if n > 0 {
        v[0] = 1.0;
    }
    v
}
