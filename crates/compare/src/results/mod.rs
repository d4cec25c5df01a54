//! Loading and aggregating per-instance results for one system under test.
//!
//! Layout on disk: `<run_dir>/<instance_id>/result.json`. The same instance
//! may appear in several run directories; each appearance is one sample.

mod loader;
mod record;

pub use loader::{RESULT_FILE, RunSummary, SystemResults, load_system_results};
pub use record::{InstanceResult, TokenUsage, ToolStats};
