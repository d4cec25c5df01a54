//! Report generation for comparison results.
//!
//! - Statistics: per-system summary printed to the console
//! - Comparison: percent differences of the candidate against the baseline
//! - JSON/Markdown: persisted comparison report
//! - Chart: box plots written as PNG plus an SVG sibling

mod chart;
mod comparison;
mod json;
mod statistics;

pub use chart::{render_comparison_chart, vector_sibling_path};
pub use comparison::{ComparedMetric, MetricDifference, compare_systems, comparison_text};
pub use json::{ComparisonReport, ReportMetadata};
pub use statistics::SystemSummary;
