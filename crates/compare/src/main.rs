//! Compare Milvus and Qdrant backed retrieval runs.
//!
//! Loads every `<run_dir>/<instance>/result.json` for both systems, prints
//! per-system statistics and their differences, and writes a comparison chart.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;
use vdb_compare::SystemResults;
use vdb_compare::reports::{
  ComparisonReport, SystemSummary, comparison_text, render_comparison_chart, vector_sibling_path,
};
use vdb_compare::results::load_system_results;

#[derive(Parser)]
#[command(name = "vdb-compare")]
#[command(about = "Compare Milvus and Qdrant vector database performance")]
#[command(version)]
struct Cli {
  /// Directories containing Milvus results (can specify multiple runs)
  #[arg(long = "milvus_dirs", num_args = 1.., required = true)]
  milvus_dirs: Vec<PathBuf>,

  /// Directories containing Qdrant results (can specify multiple runs)
  #[arg(long = "qdrant_dirs", num_args = 1.., required = true)]
  qdrant_dirs: Vec<PathBuf>,

  /// Output file for comparison chart; an SVG copy is written alongside
  #[arg(long, default_value = "vector_database_comparison.png")]
  output: PathBuf,

  /// Also save the comparison as a JSON report
  #[arg(long)]
  report: Option<PathBuf>,

  /// Also save the comparison as a Markdown summary
  #[arg(long)]
  markdown: Option<PathBuf>,

  /// Enable verbose logging
  #[arg(short, long)]
  verbose: bool,
}

fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();

  // Setup logging (RUST_LOG overrides the default level)
  let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
  let env_filter = EnvFilter::builder()
    .with_default_directive(level.into())
    .from_env_lossy();
  tracing_subscriber::fmt()
    .with_env_filter(env_filter)
    .with_target(false)
    .init();

  run_comparison(cli)
}

fn run_comparison(cli: Cli) -> anyhow::Result<()> {
  let milvus = load_with_spinner(&cli.milvus_dirs, "Milvus")?;
  let qdrant = load_with_spinner(&cli.qdrant_dirs, "Qdrant")?;

  for results in [&milvus, &qdrant] {
    if results.is_empty() {
      println!("❌ Error: No {} results found", results.label);
      return Ok(());
    }
  }

  let milvus_summary = SystemSummary::from_results(&milvus);
  let qdrant_summary = SystemSummary::from_results(&qdrant);

  print!("{}", milvus_summary.to_text());
  print!("{}", qdrant_summary.to_text());
  print!("{}", comparison_text(&milvus_summary, &qdrant_summary));

  render_comparison_chart(&milvus, &qdrant, &cli.output)?;
  println!("\n✅ Comparison chart saved to: {}", cli.output.display());
  println!("✅ SVG version saved to: {}", vector_sibling_path(&cli.output).display());

  if cli.report.is_some() || cli.markdown.is_some() {
    let report = ComparisonReport::new(milvus_summary, qdrant_summary);

    if let Some(path) = &cli.report {
      report.save(path)?;
      info!("Report saved to: {}", path.display());
    }
    if let Some(path) = &cli.markdown {
      report.save_markdown(path)?;
      info!("Markdown summary saved to: {}", path.display());
    }
  }

  println!("\n✅ Database comparison completed successfully!");

  Ok(())
}

/// Load one system's results behind a spinner.
fn load_with_spinner(run_dirs: &[PathBuf], label: &str) -> anyhow::Result<SystemResults> {
  let pb = ProgressBar::new_spinner();
  pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
  pb.set_message(format!("Loading {} results...", label));
  pb.enable_steady_tick(Duration::from_millis(100));

  // Log lines from the loader are printed with the spinner hidden
  let results = pb.suspend(|| load_system_results(run_dirs, label))?;

  pb.finish_with_message(format!(
    "{}: {} samples from {} instances",
    label, results.num_samples, results.num_instances
  ));

  Ok(results)
}
