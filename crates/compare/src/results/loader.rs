//! Aggregation of instance results across run directories.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::record::InstanceResult;
use crate::Result;
use crate::metrics::RetrievalMetrics;

/// Name of the per-instance record inside each instance directory.
pub const RESULT_FILE: &str = "result.json";

/// Outcome of scanning a single run directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
  pub run_dir: PathBuf,
  /// Whether the directory was missing and skipped
  pub missing: bool,
  /// Records loaded and scored
  pub processed: usize,
  /// Records that could not be read or parsed
  pub failed: usize,
}

impl RunSummary {
  fn new(run_dir: &Path) -> Self {
    Self {
      run_dir: run_dir.to_path_buf(),
      missing: false,
      processed: 0,
      failed: 0,
    }
  }
}

/// Per-sample values collected for one system under test.
///
/// The five value sequences always have `num_samples` entries, one per
/// instance observation, in the order the observations were loaded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SystemResults {
  /// Display name of the system (e.g. "Milvus")
  pub label: String,
  pub f1_scores: Vec<f64>,
  pub precision: Vec<f64>,
  pub recall: Vec<f64>,
  pub token_usage: Vec<u64>,
  pub tool_calls: Vec<u64>,
  /// Distinct instance directory names across all runs
  pub num_instances: usize,
  /// Total observations, counting repeated instances once per run
  pub num_samples: usize,
  pub runs: Vec<RunSummary>,
}

impl SystemResults {
  pub fn new(label: impl Into<String>) -> Self {
    Self {
      label: label.into(),
      ..Default::default()
    }
  }

  /// Score a record and append its values as one sample.
  pub fn record(&mut self, result: &InstanceResult) -> RetrievalMetrics {
    let metrics = result.metrics();

    self.f1_scores.push(metrics.f1);
    self.precision.push(metrics.precision);
    self.recall.push(metrics.recall);
    self.token_usage.push(result.total_tokens());
    self.tool_calls.push(result.total_tool_calls());
    self.num_samples += 1;

    metrics
  }

  pub fn is_empty(&self) -> bool {
    self.num_samples == 0
  }
}

/// Load and aggregate results for one system from a list of run directories.
///
/// Missing run directories and unreadable or malformed records are logged and
/// skipped. Errors while listing an existing directory are returned.
pub fn load_system_results<P: AsRef<Path>>(run_dirs: &[P], label: &str) -> Result<SystemResults> {
  let mut results = SystemResults::new(label);
  let mut instances: HashSet<String> = HashSet::new();

  info!("Loading {} results from {} run(s)", label, run_dirs.len());

  for (run_idx, run_dir) in run_dirs.iter().enumerate() {
    let run_dir = run_dir.as_ref();
    info!("  Processing run {}: {}", run_idx + 1, run_dir.display());

    let summary = load_run(run_dir, &mut results, &mut instances)?;
    if !summary.missing {
      info!("    Successfully processed {} instances", summary.processed);
    }
    results.runs.push(summary);
  }

  results.num_instances = instances.len();

  info!("  Total unique instances: {}", results.num_instances);
  info!("  Total samples: {}", results.num_samples);

  Ok(results)
}

fn load_run(run_dir: &Path, results: &mut SystemResults, instances: &mut HashSet<String>) -> Result<RunSummary> {
  let mut summary = RunSummary::new(run_dir);

  if !run_dir.exists() {
    warn!("    Directory {} does not exist", run_dir.display());
    summary.missing = true;
    return Ok(summary);
  }

  for entry in std::fs::read_dir(run_dir)? {
    let entry = entry?;
    let instance_dir = entry.path();
    let result_file = instance_dir.join(RESULT_FILE);

    if !instance_dir.is_dir() || !result_file.exists() {
      continue;
    }

    match InstanceResult::load(&result_file) {
      Ok(record) => {
        let metrics = results.record(&record);
        let instance_id = entry.file_name().to_string_lossy().into_owned();
        debug!("    {}: f1={:.3}", instance_id, metrics.f1);

        instances.insert(instance_id);
        summary.processed += 1;
      }
      Err(e) => {
        warn!("    Error processing {}: {}", result_file.display(), e);
        summary.failed += 1;
      }
    }
  }

  Ok(summary)
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::TempDir;

  fn write_instance(run_dir: &Path, instance_id: &str, json: &str) {
    let dir = run_dir.join(instance_id);
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join(RESULT_FILE), json).unwrap();
  }

  #[test]
  fn test_record_keeps_sequences_aligned() {
    let mut results = SystemResults::new("Milvus");
    results.record(&InstanceResult::default());
    results.record(&serde_json::from_str(r#"{"hits": ["a"], "oracles": ["a"], "tool_stats": {"total_tool_calls": 3}}"#).unwrap());

    assert_eq!(results.num_samples, 2);
    for len in [
      results.f1_scores.len(),
      results.precision.len(),
      results.recall.len(),
      results.token_usage.len(),
      results.tool_calls.len(),
    ] {
      assert_eq!(len, 2);
    }
    assert_eq!(results.tool_calls, vec![0, 3]);
    assert_eq!(results.f1_scores, vec![0.0, 1.0]);
  }

  #[test]
  fn test_skips_dirs_without_result_file() {
    let temp = TempDir::new().unwrap();
    write_instance(temp.path(), "django__django-1", r#"{"hits": ["a.py"], "oracles": ["a.py"]}"#);
    std::fs::create_dir_all(temp.path().join("django__django-2")).unwrap();
    std::fs::write(temp.path().join("notes.txt"), "not an instance").unwrap();

    let results = load_system_results(&[temp.path()], "Milvus").unwrap();

    assert_eq!(results.num_samples, 1);
    assert_eq!(results.num_instances, 1);
    assert_eq!(results.runs[0].processed, 1);
  }

  #[test]
  fn test_malformed_record_is_skipped() {
    let temp = TempDir::new().unwrap();
    write_instance(temp.path(), "good", r#"{"hits": ["a.py"], "oracles": ["b.py"]}"#);
    write_instance(temp.path(), "bad", "{ not json");

    let results = load_system_results(&[temp.path()], "Qdrant").unwrap();

    assert_eq!(results.num_samples, 1);
    assert_eq!(results.runs[0].failed, 1);
  }

  #[test]
  fn test_null_fields_skip_record() {
    let temp = TempDir::new().unwrap();
    write_instance(temp.path(), "null-usage", r#"{"hits": ["x"], "oracles": ["x"], "token_usage": null}"#);
    write_instance(temp.path(), "null-hits", r#"{"hits": null, "oracles": ["x"]}"#);

    let results = load_system_results(&[temp.path()], "Milvus").unwrap();

    assert_eq!(results.num_samples, 0);
    assert_eq!(results.num_instances, 0);
    assert!(results.token_usage.is_empty());
    assert_eq!(results.runs[0].failed, 2);
  }

  #[test]
  fn test_missing_run_dir() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("does-not-exist");

    let results = load_system_results(&[&missing], "Milvus").unwrap();

    assert!(results.is_empty());
    assert!(results.f1_scores.is_empty());
    assert_eq!(results.num_instances, 0);
    assert!(results.runs[0].missing);
  }

  #[test]
  fn test_listing_a_file_propagates() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("run.json");
    std::fs::write(&file, "{}").unwrap();

    assert!(load_system_results(&[&file], "Milvus").is_err());
  }
}
