//! The `result.json` record written by the retrieval pipeline.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Result;
use crate::metrics::{RetrievalMetrics, calculate_metrics};

/// One instance's retrieval output.
///
/// Absent fields default to empty or zero. An explicit `null` for any of the
/// four top-level fields fails the parse, so the record is skipped; only the
/// nested counters accept `null`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstanceResult {
  /// File paths the pipeline retrieved
  #[serde(default)]
  pub hits: Vec<String>,
  /// Ground-truth file paths
  #[serde(default)]
  pub oracles: Vec<String>,
  #[serde(default)]
  pub token_usage: TokenUsage,
  #[serde(default)]
  pub tool_stats: ToolStats,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenUsage {
  pub total_tokens: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolStats {
  pub total_tool_calls: Option<u64>,
}

impl InstanceResult {
  /// Load a record from a `result.json` file.
  pub fn load(path: &Path) -> Result<Self> {
    let json = std::fs::read_to_string(path)?;
    let record = serde_json::from_str(&json)?;
    Ok(record)
  }

  pub fn total_tokens(&self) -> u64 {
    self.token_usage.total_tokens.unwrap_or(0)
  }

  pub fn total_tool_calls(&self) -> u64 {
    self.tool_stats.total_tool_calls.unwrap_or(0)
  }

  pub fn metrics(&self) -> RetrievalMetrics {
    calculate_metrics(&self.hits, &self.oracles)
  }
}
