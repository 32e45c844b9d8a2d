//! Charts module - Chart aggregation and rendering

mod builder;
mod plotter;
mod renderer;

pub use builder::{
    ChartBuilder, ChartData, ChartError, ChartKind, ChartOutcome, XCategory, YCategory,
};
pub use plotter::ChartPlotter;
pub use renderer::StaticChartRenderer;
