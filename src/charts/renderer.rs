//! Static Chart Renderer
//! Renders the current chart to a PNG file with plotters.

use crate::charts::{ChartData, ChartKind, ChartPlotter};
use plotters::prelude::*;
use std::path::Path;
use thiserror::Error;

const SERIES: RGBColor = RGBColor(52, 152, 219);

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Chart has no points")]
    NoPoints,
    #[error("Drawing failed: {0}")]
    Drawing(String),
}

fn drawing<E: std::fmt::Display>(err: E) -> RenderError {
    RenderError::Drawing(err.to_string())
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Write `chart` as a PNG of `width` x `height` pixels.
    pub fn render_png(
        chart: &ChartData,
        path: &Path,
        (width, height): (u32, u32),
    ) -> Result<(), RenderError> {
        if chart.points.is_empty() {
            return Err(RenderError::NoPoints);
        }
        let (x_range, y_range) = Self::axis_ranges(chart);

        let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(drawing)?;

        let mut ctx = ChartBuilder::on(&root)
            .caption(&chart.title, ("sans-serif", 24))
            .margin(20)
            .x_label_area_size(70)
            .y_label_area_size(60)
            .build_cartesian_2d(x_range.0..x_range.1, y_range.0..y_range.1)
            .map_err(drawing)?;

        let tick = |x: &f64| ChartPlotter::tick_label(chart, *x);
        ctx.configure_mesh()
            .x_desc(chart.x_label.as_str())
            .y_desc(chart.y_label.as_str())
            .x_labels(chart.points.len().clamp(2, 12))
            .x_label_formatter(&tick)
            .draw()
            .map_err(drawing)?;

        match chart.kind {
            ChartKind::Bar => {
                ctx.draw_series(chart.points.iter().map(|p| {
                    Rectangle::new([(p.x - 0.3, 0.0), (p.x + 0.3, p.value)], SERIES.filled())
                }))
                .map_err(drawing)?;
            }
            ChartKind::Line => {
                ctx.draw_series(LineSeries::new(
                    chart.points.iter().map(|p| (p.x, p.value)),
                    SERIES.stroke_width(2),
                ))
                .map_err(drawing)?;
                ctx.draw_series(
                    chart
                        .points
                        .iter()
                        .map(|p| Circle::new((p.x, p.value), 4, SERIES.filled())),
                )
                .map_err(drawing)?;
            }
        }

        root.present().map_err(drawing)?;
        tracing::info!(path = %path.display(), width, height, "chart exported");
        Ok(())
    }

    /// Padded (x, y) ranges; y always includes zero.
    pub fn axis_ranges(chart: &ChartData) -> ((f64, f64), (f64, f64)) {
        let (mut x_min, mut x_max) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut y_min, mut y_max) = (0.0_f64, 0.0_f64);
        for p in &chart.points {
            x_min = x_min.min(p.x);
            x_max = x_max.max(p.x);
            y_min = y_min.min(p.value);
            y_max = y_max.max(p.value);
        }

        let x_pad = if chart.kind == ChartKind::Line && x_max > x_min {
            (x_max - x_min) * 0.05
        } else {
            0.5
        };

        let span = y_max - y_min;
        let y_pad = if span > 0.0 { span * 0.1 } else { 1.0 };
        let y_low = if y_min < 0.0 { y_min - y_pad } else { 0.0 };

        ((x_min - x_pad, x_max + x_pad), (y_low, y_max + y_pad))
    }
}
