//! Event Insight Main Application
//! Main window with control panel, results panel and chart viewer.

use crate::analysis::AnalysisContext;
use crate::charts::{ChartOutcome, StaticChartRenderer};
use crate::config::AppConfig;
use crate::data::{DataLoader, SourceFormat};
use crate::gui::{dialogs, ChartViewer, ControlPanel, ControlPanelAction, ResultsPanel};
use crate::locale::Texts;
use egui::SidePanel;
use std::path::Path;

/// Message box raised by an action.
#[derive(Debug, Clone, PartialEq)]
enum Notice {
    Warning(String),
    Error(String),
}

/// Main application window.
pub struct EventInsightApp {
    config: AppConfig,
    loader: DataLoader,
    /// Replaced wholesale on every successful load
    context: Option<AnalysisContext>,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
    results_panel: ResultsPanel,
}

impl EventInsightApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        Self::with_config(config)
    }

    fn with_config(config: AppConfig) -> Self {
        Self {
            loader: DataLoader::new(config.sheet.clone()),
            control_panel: ControlPanel::new(config.language),
            config,
            context: None,
            chart_viewer: ChartViewer::new(),
            results_panel: ResultsPanel::new(),
        }
    }

    fn texts(&self) -> &'static Texts {
        self.config.language.texts()
    }

    /// Handle spreadsheet selection and loading.
    fn handle_load_file(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Spreadsheets", &SourceFormat::WORKBOOK_EXTENSIONS)
            .add_filter("CSV Files", &["csv"])
            .add_filter("All files", &["*"])
            .pick_file()
        else {
            return; // User cancelled
        };

        match self.load_file(&path) {
            Ok(rows) => {
                let texts = self.texts();
                dialogs::info(
                    texts.success,
                    &format!("{}\n{}: {}", texts.loaded, texts.records, rows),
                );
            }
            Err(message) => dialogs::error(self.texts().error, &message),
        }
    }

    /// Replace the dataset with `path`; returns the row count or the error text.
    fn load_file(&mut self, path: &Path) -> Result<usize, String> {
        let texts = self.texts();

        // Clear previous results
        self.chart_viewer.clear();
        self.results_panel.clear();

        match AnalysisContext::load(&self.loader, path) {
            Ok(context) => {
                let file_name = context
                    .source()
                    .and_then(|p| p.file_name())
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| path.display().to_string());
                let rows = context.row_count();
                let columns = context.frame().width();
                let unresolved: Vec<String> = context
                    .roles()
                    .unresolved()
                    .iter()
                    .map(|r| r.to_string())
                    .collect();

                let mut status =
                    format!("{}: {}, {}: {}", texts.rows, rows, texts.columns, columns);
                if !unresolved.is_empty() {
                    status.push_str(&format!("; {}: {}", texts.not_found, unresolved.join(", ")));
                }
                self.control_panel
                    .set_loaded(file_name, context.shift_values(), status);
                self.context = Some(context);
                Ok(rows)
            }
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "failed to load file");
                self.context = None;
                self.control_panel
                    .clear_loaded(format!("{}: {}", texts.error, e));
                Err(format!("{}: {}", texts.load_failed, e))
            }
        }
    }

    /// Run the analysis for the current selection.
    fn handle_analyze(&mut self) {
        let texts = self.texts();
        match self.run_analysis() {
            Some(Notice::Warning(message)) => dialogs::warning(texts.warning, &message),
            Some(Notice::Error(message)) => dialogs::error(texts.error, &message),
            None => {}
        }
    }

    /// Update the panels from a fresh analysis; returns the dialog to show, if any.
    fn run_analysis(&mut self) -> Option<Notice> {
        let texts = self.texts();
        let Some(context) = &self.context else {
            return Some(Notice::Warning(texts.load_first.to_string()));
        };

        match context.analyze(&self.control_panel.selection, self.config.language) {
            Ok(report) => {
                let has_chart = matches!(report.chart, ChartOutcome::Chart(_));
                self.chart_viewer.set_outcome(report.chart);
                self.results_panel
                    .set_text(report.prediction, report.statistics);
                self.control_panel.export_enabled = has_chart;
                self.control_panel
                    .set_status(&format!("{}: {}", texts.analyzed_rows, report.rows));
                None
            }
            Err(e) => {
                tracing::error!(error = ?e, "analysis failed");
                // The old chart no longer matches the selection
                self.chart_viewer.clear();
                self.results_panel.clear();
                self.control_panel.export_enabled = false;
                self.control_panel
                    .set_status(&format!("{}: {}", texts.error, e));
                Some(Notice::Error(format!("{}: {}", texts.analysis_failed, e)))
            }
        }
    }

    /// Save the current chart as a PNG image.
    fn handle_export_chart(&mut self) {
        let texts = self.texts();
        let Some(chart) = self.chart_viewer.chart() else {
            self.control_panel.set_status(texts.nothing_to_export);
            return;
        };

        let output_path = match rfd::FileDialog::new()
            .add_filter("PNG image", &["png"])
            .set_file_name("chart.png")
            .save_file()
        {
            Some(path) => path,
            None => return, // User cancelled
        };

        let [width, height] = self.config.export_size;
        match StaticChartRenderer::render_png(chart, &output_path, (width, height)) {
            Ok(()) => {
                self.control_panel.set_status(&format!(
                    "{} {}",
                    texts.exported_to,
                    output_path.display()
                ));
                if self.config.open_after_export {
                    if let Err(e) = open::that(&output_path) {
                        tracing::warn!(error = %e, "could not open exported chart");
                    }
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "chart export failed");
                dialogs::error(texts.error, &format!("{}: {}", texts.export_failed, e));
            }
        }
    }
}

impl eframe::App for EventInsightApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(300.0)
            .max_width(350.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);

                    match action {
                        ControlPanelAction::LoadFile => self.handle_load_file(),
                        ControlPanelAction::Analyze => self.handle_analyze(),
                        ControlPanelAction::ExportChart => self.handle_export_chart(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Right panel - Forecast and statistics
        SidePanel::right("results_panel")
            .min_width(320.0)
            .max_width(420.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.results_panel.show(ui, self.config.language);
                });
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui, self.config.language);
        });
    }
}
