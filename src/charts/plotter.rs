//! Chart Plotter Module
//! Draws aggregated chart data interactively using egui_plot.

use crate::charts::{ChartData, ChartKind};
use crate::data::days_to_date;
use egui::Color32;
use egui_plot::{Bar, BarChart, GridMark, Line, Plot, PlotPoints, Points};

/// Series color
pub const SERIES_COLOR: Color32 = Color32::from_rgb(52, 152, 219); // Blue

/// Creates interactive charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Tick text for an x position: a date for lines, a category for bars.
    pub fn tick_label(chart: &ChartData, x: f64) -> String {
        match chart.kind {
            ChartKind::Line => days_to_date(x.round() as i32)
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            ChartKind::Bar => {
                if (x - x.round()).abs() > f64::EPSILON {
                    return String::new();
                }
                chart.label_at(x).map(str::to_string).unwrap_or_default()
            }
        }
    }

    pub fn draw_chart(ui: &mut egui::Ui, chart: &ChartData, height: f32) {
        let formatter_chart = chart.clone();
        let mut plot = Plot::new(format!("chart_{}", chart.title))
            .height(height)
            .x_axis_label(chart.x_label.clone())
            .y_axis_label(chart.y_label.clone())
            .allow_scroll(false)
            .x_axis_formatter(move |mark, _range| Self::tick_label(&formatter_chart, mark.value));

        if chart.kind == ChartKind::Bar {
            // One tick per category
            let marks: Vec<GridMark> = chart
                .points
                .iter()
                .map(|p| GridMark {
                    value: p.x,
                    step_size: 1.0,
                })
                .collect();
            plot = plot
                .x_grid_spacer(move |_input| marks.clone())
                .include_y(0.0);
        }

        plot.show(ui, |plot_ui| match chart.kind {
            ChartKind::Line => {
                let points: Vec<[f64; 2]> = chart.points.iter().map(|p| [p.x, p.value]).collect();
                plot_ui.line(
                    Line::new(PlotPoints::from_iter(points.iter().copied()))
                        .color(SERIES_COLOR)
                        .width(2.0)
                        .name(&chart.y_label),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from_iter(points.iter().copied()))
                        .radius(4.0)
                        .color(SERIES_COLOR),
                );
            }
            ChartKind::Bar => {
                let bars: Vec<Bar> = chart
                    .points
                    .iter()
                    .map(|p| Bar::new(p.x, p.value).width(0.6).name(&p.label))
                    .collect();
                plot_ui.bar_chart(BarChart::new(bars).color(SERIES_COLOR).name(&chart.y_label));
            }
        });
    }
}
