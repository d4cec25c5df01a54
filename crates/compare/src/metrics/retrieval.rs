//! Retrieval quality metrics for a single instance.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Set sizes behind a precision/recall calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchCounts {
  /// Distinct normalized hits
  pub num_hits: usize,
  /// Distinct normalized oracles
  pub num_oracles: usize,
  /// Hits that are also oracles
  pub num_correct: usize,
}

/// Retrieval metrics for one instance.
///
/// `counts` is `None` when both the hits and the oracles were empty; in that
/// case the calculation short-circuits before any sets are built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RetrievalMetrics {
  /// Fraction of hits that are oracles
  pub precision: f64,
  /// Fraction of oracles that were hit
  pub recall: f64,
  /// Harmonic mean of precision and recall
  pub f1: f64,
  #[serde(flatten, skip_serializing_if = "Option::is_none")]
  pub counts: Option<MatchCounts>,
}

/// Strip a single leading `/` so absolute and repo-relative paths compare equal.
pub fn normalize_file_path(path: &str) -> &str {
  path.strip_prefix('/').unwrap_or(path)
}

/// Score retrieved file paths against the ground-truth paths.
///
/// Duplicates and ordering are ignored. Empty sides degrade to zero scores.
pub fn calculate_metrics<H, O>(hits: &[H], oracles: &[O]) -> RetrievalMetrics
where
  H: AsRef<str>,
  O: AsRef<str>,
{
  if hits.is_empty() && oracles.is_empty() {
    return RetrievalMetrics::default();
  }

  let hits_set: HashSet<&str> = hits.iter().map(|h| normalize_file_path(h.as_ref())).collect();
  let oracles_set: HashSet<&str> = oracles.iter().map(|o| normalize_file_path(o.as_ref())).collect();

  let num_correct = hits_set.intersection(&oracles_set).count();

  let precision = if hits_set.is_empty() {
    0.0
  } else {
    num_correct as f64 / hits_set.len() as f64
  };
  let recall = if oracles_set.is_empty() {
    0.0
  } else {
    num_correct as f64 / oracles_set.len() as f64
  };
  let f1 = if precision + recall > 0.0 {
    2.0 * precision * recall / (precision + recall)
  } else {
    0.0
  };

  RetrievalMetrics {
    precision,
    recall,
    f1,
    counts: Some(MatchCounts {
      num_hits: hits_set.len(),
      num_oracles: oracles_set.len(),
      num_correct,
    }),
  }
}
