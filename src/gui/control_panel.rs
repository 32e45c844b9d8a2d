//! Control Panel Widget
//! Left side panel with file loading, axis pickers and the shift filter.

use crate::analysis::ViewSelection;
use crate::charts::{XCategory, YCategory};
use crate::data::ShiftFilter;
use crate::locale::Language;
use egui::{Color32, ComboBox, RichText};

/// Left side control panel with file selection and analysis controls.
pub struct ControlPanel {
    pub selection: ViewSelection,
    pub file_name: Option<String>,
    pub shift_options: Vec<String>,
    pub status: String,
    pub export_enabled: bool,
    language: Language,
}

impl ControlPanel {
    pub fn new(language: Language) -> Self {
        Self {
            selection: ViewSelection::default(),
            file_name: None,
            shift_options: Vec::new(),
            status: language.texts().ready.to_string(),
            export_enabled: false,
            language,
        }
    }

    /// Refresh after a successful load; the shift filter resets to "All".
    pub fn set_loaded(&mut self, file_name: String, shift_options: Vec<String>, status: String) {
        self.file_name = Some(file_name);
        self.shift_options = shift_options;
        self.selection.shift = ShiftFilter::All;
        self.status = status;
        self.export_enabled = false;
    }

    /// Forget the dataset after a failed load.
    pub fn clear_loaded(&mut self, status: String) {
        self.file_name = None;
        self.shift_options.clear();
        self.selection.shift = ShiftFilter::All;
        self.status = status;
        self.export_enabled = false;
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;
        let language = self.language;
        let texts = language.texts();

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📊 Event Insight")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new(texts.subtitle)
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data File Section =====
        ui.label(RichText::new(texts.data_file).size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let path_text = self
                        .file_name
                        .clone()
                        .unwrap_or_else(|| texts.no_file.to_string());

                    ui.label(RichText::new(&path_text).size(12.0).color(
                        if self.file_name.is_some() {
                            Color32::WHITE
                        } else {
                            Color32::GRAY
                        },
                    ));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button(texts.load).clicked() {
                            action = ControlPanelAction::LoadFile;
                        }
                    });
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Analysis Parameters Section =====
        ui.label(RichText::new(texts.parameters).size(14.0).strong());
        ui.add_space(8.0);

        let label_width = 110.0;
        let combo_width = 160.0;

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new(texts.x_axis));
            ComboBox::from_id_salt("x_category")
                .width(combo_width)
                .selected_text(self.selection.x.label(language))
                .show_ui(ui, |ui| {
                    for category in XCategory::ALL {
                        ui.selectable_value(
                            &mut self.selection.x,
                            category,
                            category.label(language),
                        );
                    }
                });
        });

        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new(texts.y_axis));
            ComboBox::from_id_salt("y_category")
                .width(combo_width)
                .selected_text(self.selection.y.label(language))
                .show_ui(ui, |ui| {
                    for category in YCategory::ALL {
                        ui.selectable_value(
                            &mut self.selection.y,
                            category,
                            category.label(language),
                        );
                    }
                });
        });

        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new(texts.shift));
            ComboBox::from_id_salt("shift_filter")
                .width(combo_width)
                .selected_text(self.selection.shift.label_or(texts.all_shifts))
                .show_ui(ui, |ui| {
                    ui.selectable_value(
                        &mut self.selection.shift,
                        ShiftFilter::All,
                        texts.all_shifts,
                    );
                    for shift in &self.shift_options {
                        ui.selectable_value(
                            &mut self.selection.shift,
                            ShiftFilter::Only(shift.clone()),
                            shift.as_str(),
                        );
                    }
                });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Action Buttons =====
        ui.vertical_centered(|ui| {
            let button = egui::Button::new(RichText::new(texts.analyze).size(16.0))
                .min_size(egui::vec2(200.0, 35.0));
            if ui.add(button).clicked() {
                action = ControlPanelAction::Analyze;
            }

            ui.add_space(8.0);

            ui.add_enabled_ui(self.export_enabled, |ui| {
                let export_button = egui::Button::new(RichText::new(texts.export).size(14.0))
                    .min_size(egui::vec2(150.0, 30.0));
                if ui.add(export_button).clicked() {
                    action = ControlPanelAction::ExportChart;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        let status_color = if self.status.starts_with(texts.error) {
            Color32::from_rgb(220, 53, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Help Section =====
        ui.label(RichText::new(texts.help).size(14.0).strong());
        ui.add_space(5.0);
        for category in XCategory::ALL {
            ui.label(
                RichText::new(format!(
                    "X - {}: {}",
                    category.label(language),
                    category.help(language)
                ))
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        }

        action
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    LoadFile,
    Analyze,
    ExportChart,
}
