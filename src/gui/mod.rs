//! GUI module - User interface components

mod app;
mod chart_viewer;
mod control_panel;
mod dialogs;
mod results_panel;

pub use app::EventInsightApp;
pub use chart_viewer::ChartViewer;
pub use control_panel::{ControlPanel, ControlPanelAction};
pub use results_panel::ResultsPanel;
