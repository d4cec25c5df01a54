//! Box-plot comparison chart.
//!
//! Three panels side by side: F1, token usage and tool calls, each with one
//! box per system and the system mean printed above it.

use std::path::{Path, PathBuf};

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::debug;

use crate::metrics::mean;
use crate::results::SystemResults;
use crate::{CompareError, Result};

const CHART_SIZE: (u32, u32) = (1800, 500);
const FONT: &str = "sans-serif";

struct Panel {
  title: &'static str,
  y_desc: &'static str,
  decimals: usize,
  baseline: Vec<f64>,
  candidate: Vec<f64>,
  /// Fixed y range; derived from the data when `None`
  y_range: Option<(f32, f32)>,
}

impl Panel {
  fn build(baseline: &SystemResults, candidate: &SystemResults) -> [Panel; 3] {
    let counts = |values: &[u64]| values.iter().map(|&v| v as f64).collect::<Vec<_>>();

    [
      Panel {
        title: "Retrieval Quality (F1-Score)",
        y_desc: "F1-Score",
        decimals: 3,
        baseline: baseline.f1_scores.clone(),
        candidate: candidate.f1_scores.clone(),
        y_range: Some((0.0, 1.05)),
      },
      Panel {
        title: "Resource Efficiency (Token Usage)",
        y_desc: "Total Tokens",
        decimals: 0,
        baseline: counts(&baseline.token_usage),
        candidate: counts(&candidate.token_usage),
        y_range: None,
      },
      Panel {
        title: "Efficiency (Tool Calls)",
        y_desc: "Number of Tool Calls",
        decimals: 1,
        baseline: counts(&baseline.tool_calls),
        candidate: counts(&candidate.tool_calls),
        y_range: None,
      },
    ]
  }

  fn y_range(&self) -> (f32, f32) {
    if let Some(range) = self.y_range {
      return range;
    }

    let max = self
      .baseline
      .iter()
      .chain(self.candidate.iter())
      .fold(0.0_f64, |acc, &v| acc.max(v));
    let top = if max > 0.0 { max * 1.1 } else { 1.0 };
    (0.0, top as f32)
  }
}

/// Path of the vector version written next to the raster chart.
pub fn vector_sibling_path(output: &Path) -> PathBuf {
  output.with_extension("svg")
}

/// Render the comparison chart to `output` (PNG) and its SVG sibling.
///
/// Fails when either system has no samples or when `output` itself names an
/// SVG file, since the sibling would overwrite it.
pub fn render_comparison_chart(baseline: &SystemResults, candidate: &SystemResults, output: &Path) -> Result<()> {
  for results in [baseline, candidate] {
    if results.is_empty() {
      return Err(CompareError::Chart(format!("no samples for {}", results.label)));
    }
  }

  if output.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("svg")) {
    return Err(CompareError::Chart(format!(
      "output {} must be a raster image, the SVG copy is written alongside",
      output.display()
    )));
  }

  let panels = Panel::build(baseline, candidate);
  let labels = [baseline.label.as_str(), candidate.label.as_str()];

  let root = BitMapBackend::new(output, CHART_SIZE).into_drawing_area();
  draw_chart(&root, &labels, &panels).map_err(|e| CompareError::Chart(e.to_string()))?;
  debug!("Comparison chart saved to: {}", output.display());

  let svg_path = vector_sibling_path(output);
  let root = SVGBackend::new(&svg_path, CHART_SIZE).into_drawing_area();
  draw_chart(&root, &labels, &panels).map_err(|e| CompareError::Chart(e.to_string()))?;
  debug!("Vector version saved to: {}", svg_path.display());

  Ok(())
}

fn draw_chart<DB: DrawingBackend>(
  root: &DrawingArea<DB, Shift>,
  labels: &[&str; 2],
  panels: &[Panel; 3],
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
  root.fill(&WHITE)?;

  let title = format!("{} vs {} Vector Database Comparison", labels[0], labels[1]);
  let body = root.titled(&title, (FONT, 28).into_font().style(FontStyle::Bold))?;

  for (area, panel) in body.split_evenly((1, 3)).iter().zip(panels.iter()) {
    draw_panel(area, labels, panel)?;
  }

  root.present()?;
  Ok(())
}

fn draw_panel<DB: DrawingBackend>(
  area: &DrawingArea<DB, Shift>,
  labels: &[&str; 2],
  panel: &Panel,
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
  let (y_min, y_max) = panel.y_range();

  let mut chart = ChartBuilder::on(area)
    .caption(panel.title, (FONT, 20).into_font().style(FontStyle::Bold))
    .margin(15)
    .x_label_area_size(35)
    .y_label_area_size(70)
    .build_cartesian_2d(labels[..].into_segmented(), y_min..y_max)?;

  chart
    .configure_mesh()
    .disable_x_mesh()
    .y_desc(panel.y_desc)
    .draw()?;

  let series = [&panel.baseline, &panel.candidate];

  chart.draw_series(series.iter().zip(labels.iter()).map(|(values, label)| {
    let quartiles = Quartiles::new(values.as_slice());
    Boxplot::new_vertical(SegmentValue::CenterOf(label), &quartiles)
  }))?;

  // Mean labels sit just above the mean, centered on the box
  let mean_style =
    TextStyle::from((FONT, 16).into_font().style(FontStyle::Bold)).pos(Pos::new(HPos::Center, VPos::Bottom));
  for (values, label) in series.iter().zip(labels.iter()) {
    let avg = mean(values);
    chart.plotting_area().draw(&Text::new(
      format!("{:.*}", panel.decimals, avg),
      (SegmentValue::CenterOf(label), avg as f32),
      mean_style.clone(),
    ))?;
  }

  Ok(())
}
