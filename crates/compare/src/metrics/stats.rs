//! Summary statistics over per-sample values.

use serde::{Deserialize, Serialize};

/// Arithmetic mean. Empty input yields 0.0.
pub fn mean(values: &[f64]) -> f64 {
  if values.is_empty() {
    return 0.0;
  }
  values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divides by N). Empty input yields 0.0.
pub fn std_dev(values: &[f64]) -> f64 {
  if values.is_empty() {
    return 0.0;
  }

  let avg = mean(values);
  let variance = values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / values.len() as f64;
  variance.sqrt()
}

/// Mean and standard deviation of one metric.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricSummary {
  pub mean: f64,
  pub std_dev: f64,
}

impl MetricSummary {
  pub fn from_values(values: &[f64]) -> Self {
    Self {
      mean: mean(values),
      std_dev: std_dev(values),
    }
  }

  /// Summarize integer counters such as token usage.
  pub fn from_counts(values: &[u64]) -> Self {
    let values: Vec<f64> = values.iter().map(|&v| v as f64).collect();
    Self::from_values(&values)
  }
}
