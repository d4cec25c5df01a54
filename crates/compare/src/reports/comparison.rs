//! Side-by-side comparison of two systems.

use serde::{Deserialize, Serialize};

use super::statistics::{RULE_WIDTH, SystemSummary};
use crate::metrics::MetricSummary;

/// Metric compared between the two systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparedMetric {
  F1,
  Precision,
  Recall,
  TokenUsage,
  ToolCalls,
}

impl ComparedMetric {
  pub fn all() -> &'static [ComparedMetric] {
    &[
      ComparedMetric::F1,
      ComparedMetric::Precision,
      ComparedMetric::Recall,
      ComparedMetric::TokenUsage,
      ComparedMetric::ToolCalls,
    ]
  }

  /// Human-readable title.
  pub fn title(&self) -> &'static str {
    match self {
      ComparedMetric::F1 => "F1-Score",
      ComparedMetric::Precision => "Precision",
      ComparedMetric::Recall => "Recall",
      ComparedMetric::TokenUsage => "Token Usage",
      ComparedMetric::ToolCalls => "Tool Calls",
    }
  }

  /// Decimal places used when printing a mean of this metric.
  pub fn decimals(&self) -> usize {
    match self {
      ComparedMetric::F1 | ComparedMetric::Precision | ComparedMetric::Recall => 3,
      ComparedMetric::TokenUsage => 0,
      ComparedMetric::ToolCalls => 1,
    }
  }

  /// Quality metrics improve upward; resource usage improves downward.
  pub fn higher_is_better(&self) -> bool {
    matches!(
      self,
      ComparedMetric::F1 | ComparedMetric::Precision | ComparedMetric::Recall
    )
  }

  fn summary<'a>(&self, system: &'a SystemSummary) -> &'a MetricSummary {
    match self {
      ComparedMetric::F1 => &system.f1,
      ComparedMetric::Precision => &system.precision,
      ComparedMetric::Recall => &system.recall,
      ComparedMetric::TokenUsage => &system.token_usage,
      ComparedMetric::ToolCalls => &system.tool_calls,
    }
  }
}

impl std::fmt::Display for ComparedMetric {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.title())
  }
}

/// Difference of one metric mean between baseline and candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricDifference {
  pub metric: ComparedMetric,
  /// Baseline mean
  pub baseline: f64,
  /// Candidate mean
  pub candidate: f64,
  /// (candidate - baseline) / baseline * 100, or 0 when the baseline is not positive
  pub change_percent: f64,
}

impl MetricDifference {
  pub fn new(metric: ComparedMetric, baseline: f64, candidate: f64) -> Self {
    let change_percent = if baseline > 0.0 {
      (candidate - baseline) / baseline * 100.0
    } else {
      0.0
    };

    Self {
      metric,
      baseline,
      candidate,
      change_percent,
    }
  }

  /// Whether the candidate is better than the baseline on this metric.
  pub fn is_improvement(&self) -> bool {
    if self.change_percent == 0.0 {
      return false;
    }
    (self.change_percent > 0.0) == self.metric.higher_is_better()
  }
}

/// Compare every metric mean of `candidate` against `baseline`.
pub fn compare_systems(baseline: &SystemSummary, candidate: &SystemSummary) -> Vec<MetricDifference> {
  ComparedMetric::all()
    .iter()
    .map(|metric| MetricDifference::new(*metric, metric.summary(baseline).mean, metric.summary(candidate).mean))
    .collect()
}

/// Console comparison block for F1, token usage and tool calls.
pub fn comparison_text(baseline: &SystemSummary, candidate: &SystemSummary) -> String {
  let rule = "=".repeat(RULE_WIDTH);
  let mut out = String::new();

  out.push_str(&format!("\n{}\n", rule));
  out.push_str("Database Comparison\n");
  out.push_str(&format!("{}\n", rule));

  for diff in compare_systems(baseline, candidate) {
    if matches!(diff.metric, ComparedMetric::Precision | ComparedMetric::Recall) {
      continue;
    }

    let precision = diff.metric.decimals();
    out.push_str(&format!("\n{}:\n", diff.metric));
    out.push_str(&format!("  {}:  {:.*}\n", baseline.label, precision, diff.baseline));
    out.push_str(&format!("  {}:  {:.*}\n", candidate.label, precision, diff.candidate));
    out.push_str(&format!("  Difference: {:+.1}%\n", diff.change_percent));
  }

  out
}
