//! Retrieval comparison harness for vector-database-backed pipelines.
//!
//! Reads the per-instance `result.json` artifacts written by two retrieval
//! pipelines (Milvus and Qdrant backed), scores them against their oracle
//! files, and reports a side-by-side comparison.
//!
//! ## Key Concepts
//!
//! - **Metrics**: precision, recall and F1 over normalized file-path sets
//! - **Results**: per-system aggregation across one or more run directories
//! - **Reports**: console statistics, JSON and Markdown comparison reports
//! - **Chart**: box plots of F1, token usage and tool calls per system

pub mod metrics;
pub mod reports;
pub mod results;

pub use metrics::{MatchCounts, MetricSummary, RetrievalMetrics, calculate_metrics, normalize_file_path};
pub use reports::{ComparedMetric, ComparisonReport, MetricDifference, SystemSummary};
pub use results::{InstanceResult, RunSummary, SystemResults, load_system_results};

use thiserror::Error;

/// Comparison-specific errors
#[derive(Debug, Error)]
pub enum CompareError {
  #[error("IO error: {0}")]
  Io(#[from] std::io::Error),

  #[error("JSON error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("Chart error: {0}")]
  Chart(String),
}

pub type Result<T> = std::result::Result<T, CompareError>;
