//! Results Panel Widget
//! Right side panel with the prediction and statistics text.

use crate::locale::Language;
use egui::{RichText, TextEdit, TextStyle};

#[derive(Default)]
pub struct ResultsPanel {
    prediction: String,
    statistics: String,
}

impl ResultsPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_text(&mut self, prediction: String, statistics: String) {
        self.prediction = prediction;
        self.statistics = statistics;
    }

    pub fn clear(&mut self) {
        self.prediction.clear();
        self.statistics.clear();
    }

    pub fn show(&self, ui: &mut egui::Ui, language: Language) {
        let texts = language.texts();
        ui.label(RichText::new(texts.forecast).size(14.0).strong());
        ui.add_space(5.0);
        Self::text_pane(ui, &self.prediction, 12);

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        ui.label(RichText::new(texts.statistics).size(14.0).strong());
        ui.add_space(5.0);
        Self::text_pane(ui, &self.statistics, 14);
    }

    /// Read-only, selectable text block.
    fn text_pane(ui: &mut egui::Ui, text: &str, rows: usize) {
        let mut view = text;
        ui.add(
            TextEdit::multiline(&mut view)
                .font(TextStyle::Monospace)
                .desired_rows(rows)
                .desired_width(f32::INFINITY),
        );
    }
}
