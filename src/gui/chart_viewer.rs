//! Chart Viewer Widget
//! Central panel showing the chart of the last analysis, or a placeholder.

use crate::charts::{ChartData, ChartOutcome, ChartPlotter};
use crate::locale::Language;
use egui::{Color32, RichText};

const CARD_MARGIN: f32 = 12.0;
const TITLE_SPACE: f32 = 48.0;
const MIN_CHART_HEIGHT: f32 = 240.0;

/// Chart display area.
#[derive(Default)]
pub struct ChartViewer {
    outcome: Option<ChartOutcome>,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.outcome = None;
    }

    pub fn set_outcome(&mut self, outcome: ChartOutcome) {
        self.outcome = Some(outcome);
    }

    /// Chart currently on screen, if the last analysis produced one.
    pub fn chart(&self) -> Option<&ChartData> {
        match &self.outcome {
            Some(ChartOutcome::Chart(chart)) => Some(chart),
            _ => None,
        }
    }

    pub fn show(&self, ui: &mut egui::Ui, language: Language) {
        let texts = language.texts();
        match &self.outcome {
            None => {
                ui.centered_and_justified(|ui| {
                    ui.label(RichText::new(texts.no_data).size(20.0));
                });
            }
            Some(ChartOutcome::Insufficient) => {
                ui.centered_and_justified(|ui| {
                    ui.label(
                        RichText::new(texts.no_chart)
                            .size(18.0)
                            .color(Color32::GRAY),
                    );
                });
            }
            Some(ChartOutcome::Chart(chart)) => Self::draw_chart_card(ui, chart),
        }
    }

    fn draw_chart_card(ui: &mut egui::Ui, chart: &ChartData) {
        egui::Frame::none()
            .rounding(8.0)
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(CARD_MARGIN)
            .show(ui, |ui| {
                ui.vertical(|ui| {
                    ui.label(RichText::new(&chart.title).size(18.0).strong());
                    ui.add_space(8.0);

                    let height =
                        (ui.available_height() - TITLE_SPACE + CARD_MARGIN).max(MIN_CHART_HEIGHT);
                    ChartPlotter::draw_chart(ui, chart, height);
                });
            });
    }
}
