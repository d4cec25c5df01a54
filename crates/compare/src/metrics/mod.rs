//! Metrics for comparing retrieval pipelines.
//!
//! Two categories:
//! - Retrieval: precision, recall and F1 of hits against oracle files
//! - Stats: mean and spread of per-sample values across runs

mod retrieval;
pub mod stats;

pub use retrieval::{MatchCounts, RetrievalMetrics, calculate_metrics, normalize_file_path};
pub use stats::{MetricSummary, mean, std_dev};
