//! JSON report format for comparison results.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::comparison::{MetricDifference, compare_systems};
use super::statistics::SystemSummary;
use crate::Result;

/// Complete comparison report in JSON format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
  /// Report metadata
  pub metadata: ReportMetadata,
  /// Baseline system summary
  pub baseline: SystemSummary,
  /// Candidate system summary
  pub candidate: SystemSummary,
  /// Per-metric differences of the candidate against the baseline
  pub differences: Vec<MetricDifference>,
}

/// Report metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
  /// Report generation timestamp
  pub timestamp: DateTime<Utc>,
  /// Tool version
  pub version: String,
  /// Hostname
  #[serde(skip_serializing_if = "Option::is_none")]
  pub hostname: Option<String>,
}

impl ComparisonReport {
  /// Build a report from two system summaries.
  pub fn new(baseline: SystemSummary, candidate: SystemSummary) -> Self {
    let differences = compare_systems(&baseline, &candidate);

    Self {
      metadata: ReportMetadata {
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        hostname: hostname::get().ok().and_then(|h| h.into_string().ok()),
      },
      baseline,
      candidate,
      differences,
    }
  }

  /// Save report to a JSON file.
  pub fn save(&self, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(self)?;
    std::fs::write(path, json)?;
    Ok(())
  }

  /// Load report from a JSON file.
  pub fn load(path: &Path) -> Result<Self> {
    let json = std::fs::read_to_string(path)?;
    let report = serde_json::from_str(&json)?;
    Ok(report)
  }

  /// Generate markdown summary.
  pub fn to_markdown(&self) -> String {
    let mut out = String::new();

    out.push_str(&format!(
      "# {} vs {} Comparison\n\n",
      self.baseline.label, self.candidate.label
    ));
    out.push_str(&format!("**Generated:** {}\n\n", self.metadata.timestamp.to_rfc3339()));

    out.push_str("## Systems\n\n");
    out.push_str("| System | Instances | Samples | F1 | Precision | Recall | Tokens | Tool Calls |\n");
    out.push_str("|--------|-----------|---------|----|-----------|--------|--------|------------|\n");
    for system in [&self.baseline, &self.candidate] {
      out.push_str(&format!(
        "| {} | {} | {} | {:.3} ± {:.3} | {:.3} ± {:.3} | {:.3} ± {:.3} | {:.0} ± {:.0} | {:.1} ± {:.1} |\n",
        system.label,
        system.num_instances,
        system.num_samples,
        system.f1.mean,
        system.f1.std_dev,
        system.precision.mean,
        system.precision.std_dev,
        system.recall.mean,
        system.recall.std_dev,
        system.token_usage.mean,
        system.token_usage.std_dev,
        system.tool_calls.mean,
        system.tool_calls.std_dev,
      ));
    }
    out.push('\n');

    out.push_str("## Differences\n\n");
    out.push_str(&format!(
      "| Metric | {} | {} | Change |\n",
      self.baseline.label, self.candidate.label
    ));
    out.push_str("|--------|----------|-----------|--------|\n");
    for d in &self.differences {
      let marker = if d.is_improvement() { " ✅" } else { "" };
      let precision = d.metric.decimals();
      out.push_str(&format!(
        "| {} | {:.*} | {:.*} | {:+.1}%{} |\n",
        d.metric, precision, d.baseline, precision, d.candidate, d.change_percent, marker
      ));
    }
    out.push('\n');

    out
  }

  /// Save the markdown summary.
  pub fn save_markdown(&self, path: &Path) -> Result<()> {
    std::fs::write(path, self.to_markdown())?;
    Ok(())
  }
}
