//! End-to-end aggregation over on-disk run directories.

use std::path::Path;

use tempfile::TempDir;
use vdb_compare::reports::{ComparisonReport, SystemSummary};
use vdb_compare::results::{RESULT_FILE, load_system_results};

fn write_instance(run_dir: &Path, instance_id: &str, json: &str) {
  let dir = run_dir.join(instance_id);
  std::fs::create_dir_all(&dir).expect("Failed to create instance dir");
  std::fs::write(dir.join(RESULT_FILE), json).expect("Failed to write result file");
}

#[test]
fn test_instance_without_result_file_is_ignored() {
  let run = TempDir::new().unwrap();
  write_instance(
    run.path(),
    "astropy__astropy-12907",
    r#"{"hits": ["astropy/modeling/separable.py"], "oracles": ["astropy/modeling/separable.py"]}"#,
  );
  std::fs::create_dir_all(run.path().join("astropy__astropy-14182")).unwrap();

  let results = load_system_results(&[run.path()], "Milvus").unwrap();

  assert_eq!(results.num_samples, 1);
  assert_eq!(results.num_instances, 1);
  assert_eq!(results.f1_scores, vec![1.0]);
}

#[test]
fn test_nonexistent_directory_yields_empty_results() {
  let temp = TempDir::new().unwrap();

  let results = load_system_results(&[temp.path().join("missing-run")], "Qdrant").unwrap();

  assert_eq!(results.num_samples, 0);
  assert_eq!(results.num_instances, 0);
  assert!(results.f1_scores.is_empty());
  assert!(results.precision.is_empty());
  assert!(results.recall.is_empty());
  assert!(results.token_usage.is_empty());
  assert!(results.tool_calls.is_empty());
}

#[test]
fn test_repeated_instance_across_runs() {
  let run1 = TempDir::new().unwrap();
  let run2 = TempDir::new().unwrap();
  let record = r#"{
    "hits": ["/src/auth.py"],
    "oracles": ["src/auth.py", "src/session.py"],
    "token_usage": {"total_tokens": 1200},
    "tool_stats": {"total_tool_calls": 4}
  }"#;
  write_instance(run1.path(), "django__django-11099", record);
  write_instance(run2.path(), "django__django-11099", record);

  let results = load_system_results(&[run1.path(), run2.path()], "Milvus").unwrap();

  assert_eq!(results.num_samples, 2);
  assert_eq!(results.num_instances, 1);
  assert_eq!(results.token_usage, vec![1200, 1200]);
  assert_eq!(results.tool_calls, vec![4, 4]);
  assert_eq!(results.runs.len(), 2);
}

#[test]
fn test_missing_run_does_not_stop_others() {
  let run = TempDir::new().unwrap();
  write_instance(run.path(), "a", r#"{"hits": ["x.py"], "oracles": ["y.py"]}"#);
  write_instance(run.path(), "b", "not json at all");
  let missing = run.path().join("nope");

  let results = load_system_results(&[missing.as_path(), run.path()], "Qdrant").unwrap();

  assert_eq!(results.num_samples, 1);
  assert!(results.runs[0].missing);
  assert_eq!(results.runs[1].processed, 1);
  assert_eq!(results.runs[1].failed, 1);
}

#[test]
fn test_summaries_feed_report() {
  let milvus_run = TempDir::new().unwrap();
  let qdrant_run = TempDir::new().unwrap();
  write_instance(
    milvus_run.path(),
    "i-1",
    r#"{"hits": ["a", "b"], "oracles": ["a"], "token_usage": {"total_tokens": 2000}, "tool_stats": {"total_tool_calls": 5}}"#,
  );
  write_instance(
    qdrant_run.path(),
    "i-1",
    r#"{"hits": ["a"], "oracles": ["a"], "token_usage": {"total_tokens": 1500}, "tool_stats": {"total_tool_calls": 5}}"#,
  );

  let milvus = load_system_results(&[milvus_run.path()], "Milvus").unwrap();
  let qdrant = load_system_results(&[qdrant_run.path()], "Qdrant").unwrap();
  let report = ComparisonReport::new(SystemSummary::from_results(&milvus), SystemSummary::from_results(&qdrant));

  // Milvus: p=0.5 r=1.0 f1=2/3; Qdrant: f1=1.0
  assert!((report.baseline.f1.mean - 2.0 / 3.0).abs() < 1e-12);
  assert!((report.candidate.f1.mean - 1.0).abs() < f64::EPSILON);

  let md = report.to_markdown();
  assert!(md.contains("| F1-Score | 0.667 | 1.000 | +50.0% ✅ |"));
  assert!(md.contains("| Token Usage | 2000 | 1500 | -25.0% ✅ |"));

  let out = TempDir::new().unwrap();
  let path = out.path().join("comparison.json");
  report.save(&path).unwrap();
  let saved: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
  assert_eq!(saved["baseline"]["label"], "Milvus");
  assert_eq!(saved["differences"][0]["metric"], "f1");
}
