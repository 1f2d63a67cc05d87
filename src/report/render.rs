//! Output adapters that draw a `ChartSpec`.
//!
//! Rendering is decoupled from chart construction so the pipeline can be
//! exercised without a display surface: the SVG adapter writes a file,
//! the terminal adapter prints text bars.

use crate::report::ChartSpec;
use anyhow::{bail, Context, Result};
use plotters::prelude::*;
use std::path::{Path, PathBuf};

/// Uniform bar fill (sky blue).
const BAR_COLOR: RGBColor = RGBColor(135, 206, 235);

/// Something that can draw a frequency chart.
pub trait ChartRenderer {
    /// Draw the chart. Rendering an empty chart is an error; callers are
    /// expected to guard against it.
    fn render(&self, spec: &ChartSpec) -> Result<()>;
}

/// Renders the chart as an SVG file.
pub struct SvgRenderer {
    path: PathBuf,
    width: u32,
    height: u32,
}

impl SvgRenderer {
    /// Create a renderer writing to `path` at the given pixel dimensions.
    pub fn new(path: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        Self {
            path: path.into(),
            width,
            height,
        }
    }

    /// Where the chart will be written.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ChartRenderer for SvgRenderer {
    fn render(&self, spec: &ChartSpec) -> Result<()> {
        if spec.bars.is_empty() {
            bail!("Cannot render an empty chart");
        }

        let root = SVGBackend::new(&self.path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE)?;

        let y_max = spec.max_value() + spec.max_value() / 10 + 1;
        let mut chart = ChartBuilder::on(&root)
            .caption(&spec.title, ("sans-serif", 24))
            .margin(12)
            .x_label_area_size(80)
            .y_label_area_size(60)
            .build_cartesian_2d(
                (0i32..spec.bars.len() as i32).into_segmented(),
                0u64..y_max,
            )?;

        // The SVG text transform only supports quarter turns, so any
        // rotation hint renders the tick labels vertically.
        let tick_style = if spec.x_tick_rotation_degrees > 0 {
            ("sans-serif", 14)
                .into_font()
                .transform(FontTransform::Rotate90)
        } else {
            ("sans-serif", 14).into_font()
        };

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc(&spec.x_label)
            .y_desc(&spec.y_label)
            .x_labels(spec.bars.len())
            .x_label_style(tick_style)
            .x_label_formatter(&|coord| match coord {
                SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => spec
                    .bars
                    .get(*i as usize)
                    .map(|bar| bar.label.clone())
                    .unwrap_or_default(),
                SegmentValue::Last => String::new(),
            })
            .draw()?;

        chart.draw_series(spec.bars.iter().enumerate().map(|(i, bar)| {
            Rectangle::new(
                [
                    (SegmentValue::Exact(i as i32), 0u64),
                    (SegmentValue::Exact(i as i32 + 1), bar.value),
                ],
                BAR_COLOR.filled(),
            )
        }))?;

        root.present().context("Failed to write chart SVG")?;
        tracing::info!("Chart written to {}", self.path.display());
        Ok(())
    }
}

/// Renders the chart as rows of `#` bars on stdout.
pub struct TerminalRenderer {
    max_bar_width: usize,
}

impl TerminalRenderer {
    /// Create a renderer whose longest bar is `max_bar_width` characters.
    pub fn new(max_bar_width: usize) -> Self {
        Self { max_bar_width }
    }

    fn format_lines(&self, spec: &ChartSpec) -> Vec<String> {
        let label_width = spec
            .bars
            .iter()
            .map(|bar| bar.label.chars().count())
            .max()
            .unwrap_or(0);
        let max_value = spec.max_value().max(1);

        let mut lines = Vec::with_capacity(spec.bars.len() + 1);
        lines.push(spec.title.clone());
        for bar in &spec.bars {
            let scaled = ((bar.value as f64 / max_value as f64) * self.max_bar_width as f64)
                .round() as usize;
            lines.push(format!(
                "{:<label_width$}  {:>6}  {}",
                bar.label,
                bar.value,
                "#".repeat(scaled.max(1))
            ));
        }
        lines
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self { max_bar_width: 60 }
    }
}

impl ChartRenderer for TerminalRenderer {
    fn render(&self, spec: &ChartSpec) -> Result<()> {
        if spec.bars.is_empty() {
            bail!("Cannot render an empty chart");
        }
        for line in self.format_lines(spec) {
            println!("{}", line);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Bar;

    fn sample_spec() -> ChartSpec {
        ChartSpec {
            title: "Top 2 most frequent words".to_string(),
            x_label: "Words".to_string(),
            y_label: "Frequency".to_string(),
            x_tick_rotation_degrees: 45,
            bars: vec![
                Bar {
                    label: "cat".to_string(),
                    value: 4,
                },
                Bar {
                    label: "the".to_string(),
                    value: 2,
                },
            ],
        }
    }

    fn empty_spec() -> ChartSpec {
        ChartSpec {
            title: "Top 2 most frequent words".to_string(),
            x_label: "Words".to_string(),
            y_label: "Frequency".to_string(),
            x_tick_rotation_degrees: 45,
            bars: Vec::new(),
        }
    }

    #[test]
    fn test_svg_renderer_writes_chart_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("chart.svg");

        SvgRenderer::new(&path, 800, 600)
            .render(&sample_spec())
            .expect("render");

        let svg = std::fs::read_to_string(&path).expect("read svg");
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Top 2 most frequent words"));
        assert!(svg.contains("cat"));
    }

    #[test]
    fn test_svg_renderer_rejects_empty_chart() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("chart.svg");

        let result = SvgRenderer::new(&path, 800, 600).render(&empty_spec());
        assert!(result.is_err());
    }

    #[test]
    fn test_terminal_renderer_scales_bars() {
        let renderer = TerminalRenderer::new(10);
        let lines = renderer.format_lines(&sample_spec());

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Top 2 most frequent words");
        // Largest bar fills the width; the other scales proportionally.
        assert!(lines[1].contains("cat"));
        assert!(lines[1].ends_with(&"#".repeat(10)));
        assert!(lines[2].contains("the"));
        assert!(lines[2].ends_with(&"#".repeat(5)));
        assert!(!lines[2].contains(&"#".repeat(6)));
    }

    #[test]
    fn test_terminal_renderer_gives_small_values_a_visible_bar() {
        let mut spec = sample_spec();
        spec.bars[0].value = 1000;
        spec.bars[1].value = 1;

        let lines = TerminalRenderer::new(20).format_lines(&spec);
        assert!(lines[2].ends_with('#'));
    }

    #[test]
    fn test_terminal_renderer_rejects_empty_chart() {
        let result = TerminalRenderer::default().render(&empty_spec());
        assert!(result.is_err());
    }
}
