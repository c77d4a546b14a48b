//! SVG figures for an RT/MT analysis, drawn with Plotters.
//!
//! Three figures per analysis:
//! - scatter of MT against RT
//! - histogram of MT
//! - histogram of RT

use std::path::{Path, PathBuf};

use plotters::prelude::*;
use tracing::{info, warn};

use crate::analysis::{RtMtAnalysis, SeriesStats, histogram};
use crate::error::AppError;
use crate::io::paths::{FigureKind, figure_path};

const FIGURE_SIZE: (u32, u32) = (960, 640);
const HISTOGRAM_BINS: usize = 20;

type DrawResult = Result<(), Box<dyn std::error::Error>>;

/// Write all figures for `analysis` into `dir`; returns the written paths.
///
/// An empty analysis has nothing to draw and yields no files.
pub fn write_figures(analysis: &RtMtAnalysis, input: &Path, dir: &Path) -> Result<Vec<PathBuf>, AppError> {
    if analysis.is_empty() {
        warn!(suffix = analysis.suffix, "no trials kept; figures skipped");
        return Ok(Vec::new());
    }

    let mut written = Vec::with_capacity(FigureKind::ALL.len());
    for kind in FigureKind::ALL {
        let path = figure_path(dir, input, analysis.suffix, kind);
        let drawn = match kind {
            FigureKind::Scatter => draw_scatter(&path, analysis),
            FigureKind::MtHistogram => draw_histogram(&path, &analysis.mt, &analysis.mt_name()),
            FigureKind::RtHistogram => draw_histogram(&path, &analysis.rt, &analysis.rt_name()),
        };
        drawn.map_err(|e| AppError::new(4, format!("Failed to draw '{}': {e}", path.display())))?;
        info!(path = %path.display(), "figure written");
        written.push(path);
    }

    Ok(written)
}

fn draw_scatter(path: &Path, analysis: &RtMtAnalysis) -> DrawResult {
    let points = analysis.points();
    let (x0, x1) = axis_range(points.iter().map(|p| p.0));
    let (y0, y1) = axis_range(points.iter().map(|p| p.1));

    let root = SVGBackend::new(path, FIGURE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("{} vs {}", analysis.mt_name(), analysis.rt_name()),
            ("sans-serif", 24),
        )
        .margin(20)
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 45)
        .build_cartesian_2d(x0..x1, y0..y1)?;

    chart
        .configure_mesh()
        .x_desc(analysis.rt_name())
        .y_desc(analysis.mt_name())
        .x_label_formatter(&|v| format!("{v:.0}"))
        .y_label_formatter(&|v| format!("{v:.0}"))
        .draw()?;

    chart.draw_series(
        points
            .iter()
            .map(|&(x, y)| Circle::new((x, y), 3, BLUE.mix(0.7).filled())),
    )?;

    root.present()?;
    Ok(())
}

fn draw_histogram(path: &Path, values: &[i64], name: &str) -> DrawResult {
    let bins = histogram(values, HISTOGRAM_BINS);
    let (Some(first), Some(last)) = (bins.first(), bins.last()) else {
        return Ok(());
    };
    let x0 = first.start;
    let x1 = last.end;
    let y_top = bins.iter().map(|b| b.count).max().unwrap_or(0).max(1) as f64 * 1.1;

    let root = SVGBackend::new(path, FIGURE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(format!("{name} distribution"), ("sans-serif", 24))
        .margin(20)
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 45)
        .build_cartesian_2d(x0..x1, 0.0..y_top)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(name)
        .y_desc("trials")
        .x_label_formatter(&|v| format!("{v:.0}"))
        .y_label_formatter(&|v| format!("{v:.0}"))
        .draw()?;

    chart.draw_series(bins.iter().map(|b| {
        Rectangle::new([(b.start, 0.0), (b.end, b.count as f64)], BLUE.mix(0.6).filled())
    }))?;

    if let Some(stats) = SeriesStats::from_values(values) {
        let mean_color = RGBColor(200, 0, 100);
        chart
            .draw_series(LineSeries::new(
                vec![(stats.mean, 0.0), (stats.mean, y_top)],
                &mean_color,
            ))?
            .label(format!("mean = {:.1}", stats.mean))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], mean_color));

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK.mix(0.3))
            .position(SeriesLabelPosition::UpperRight)
            .draw()?;
    }

    root.present()?;
    Ok(())
}

/// Padded `[min, max]` of the values; degenerate ranges are widened.
fn axis_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values.filter(|v| v.is_finite()) {
        min = min.min(v);
        max = max.max(v);
    }
    if !(min.is_finite() && max.is_finite()) {
        return (0.0, 1.0);
    }
    let span = max - min;
    let pad = if span > 0.0 { span * 0.05 } else { 1.0 };
    (min - pad, max + pad)
}
