//! Per-system summary statistics.

use serde::{Deserialize, Serialize};

use crate::metrics::MetricSummary;
use crate::results::SystemResults;

pub(crate) const RULE_WIDTH: usize = 60;

/// Mean and standard deviation of every collected metric for one system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemSummary {
  pub label: String,
  pub num_instances: usize,
  pub num_samples: usize,
  pub f1: MetricSummary,
  pub precision: MetricSummary,
  pub recall: MetricSummary,
  pub token_usage: MetricSummary,
  pub tool_calls: MetricSummary,
}

impl SystemSummary {
  pub fn from_results(results: &SystemResults) -> Self {
    Self {
      label: results.label.clone(),
      num_instances: results.num_instances,
      num_samples: results.num_samples,
      f1: MetricSummary::from_values(&results.f1_scores),
      precision: MetricSummary::from_values(&results.precision),
      recall: MetricSummary::from_values(&results.recall),
      token_usage: MetricSummary::from_counts(&results.token_usage),
      tool_calls: MetricSummary::from_counts(&results.tool_calls),
    }
  }

  /// Console statistics block.
  pub fn to_text(&self) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();

    out.push_str(&format!("\n{}\n", rule));
    out.push_str(&format!("{} Statistics\n", self.label));
    out.push_str(&format!("{}\n", rule));
    out.push_str(&format!("Instances: {}\n", self.num_instances));
    out.push_str(&format!("Total samples: {}\n", self.num_samples));

    out.push_str("\nRetrieval Quality:\n");
    out.push_str(&format!(
      "  Average F1-Score:  {:.3} ± {:.3}\n",
      self.f1.mean, self.f1.std_dev
    ));
    out.push_str(&format!(
      "  Average Precision: {:.3} ± {:.3}\n",
      self.precision.mean, self.precision.std_dev
    ));
    out.push_str(&format!(
      "  Average Recall:    {:.3} ± {:.3}\n",
      self.recall.mean, self.recall.std_dev
    ));

    out.push_str("\nResource Usage:\n");
    out.push_str(&format!(
      "  Average Tokens:     {:.0} ± {:.0}\n",
      self.token_usage.mean, self.token_usage.std_dev
    ));
    out.push_str(&format!(
      "  Average Tool Calls: {:.1} ± {:.1}\n",
      self.tool_calls.mean, self.tool_calls.std_dev
    ));

    out
  }
}
