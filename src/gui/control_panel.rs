//! Control Panel Widget
//! Left side panel with the business-question selector and export control.

use egui::{Color32, ComboBox, RichText};

/// The two business questions the dashboard answers. Closed set; no other
/// selection is reachable through the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BusinessQuestion {
    #[default]
    UserTrend,
    WeatherCorrelation,
}

impl BusinessQuestion {
    pub const ALL: [BusinessQuestion; 2] = [
        BusinessQuestion::UserTrend,
        BusinessQuestion::WeatherCorrelation,
    ];

    /// Short label shown in the selector.
    pub fn key(&self) -> &'static str {
        match self {
            BusinessQuestion::UserTrend => "Question 1",
            BusinessQuestion::WeatherCorrelation => "Question 2",
        }
    }

    /// Full human-readable prompt.
    pub fn prompt(&self) -> &'static str {
        match self {
            BusinessQuestion::UserTrend => {
                "How are casual and registered users distributed over time?"
            }
            BusinessQuestion::WeatherCorrelation => {
                "What is the correlation between the weather situation and the number of bike rentals?"
            }
        }
    }

    /// Section heading above the narrative block.
    pub fn heading(&self) -> &'static str {
        match self {
            BusinessQuestion::UserTrend => {
                "Question 1: Distribution of Casual and Registered Users Over Time"
            }
            BusinessQuestion::WeatherCorrelation => {
                "Question 2: Correlation Between Weather Situation and Bike Rentals"
            }
        }
    }
}

/// Actions triggered by the control panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlPanelAction {
    None,
    ExportChart,
}

/// Left side control panel owning the question selection.
pub struct ControlPanel {
    pub selected: BusinessQuestion,
    pub status: String,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            selected: BusinessQuestion::default(),
            status: "Ready".to_string(),
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🚲 Bike Sharing")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Data Analysis Dashboard")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Question Section =====
        ui.label(RichText::new("❓ Business Question").size(14.0).strong());
        ui.add_space(5.0);

        ComboBox::from_id_salt("business_question")
            .width(250.0)
            .selected_text(self.selected.key())
            .show_ui(ui, |ui| {
                for question in BusinessQuestion::ALL {
                    ui.selectable_value(&mut self.selected, question, question.key());
                }
            });

        ui.add_space(6.0);
        ui.label(RichText::new(self.selected.prompt()).size(12.0).italics());

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Export Section =====
        ui.vertical_centered(|ui| {
            let button = egui::Button::new(RichText::new("🖼 Export Chart").size(14.0))
                .min_size(egui::vec2(180.0, 30.0));
            if ui.add(button).clicked() {
                action = ControlPanelAction::ExportChart;
            }
        });

        ui.add_space(10.0);

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    /// Set the one-line status message
    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_two_questions() {
        assert_eq!(BusinessQuestion::ALL.len(), 2);
        assert_ne!(
            BusinessQuestion::UserTrend.key(),
            BusinessQuestion::WeatherCorrelation.key()
        );
    }

    #[test]
    fn default_selection_is_the_first_question() {
        assert_eq!(ControlPanel::new().selected, BusinessQuestion::UserTrend);
    }
}
