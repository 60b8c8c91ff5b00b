//! Dashboard Application
//! Main window wiring the sidebar selector to the central view. The dataset
//! is loaded once at startup; every frame renders from that immutable table
//! and the current selection.

use egui::SidePanel;
use log::{error, info, warn};

use crate::charts::{StaticChartRenderer, WeatherChartData};
use crate::data::{BikeDataset, DatasetError, DATA_FILE};
use crate::gui::{BusinessQuestion, ControlPanel, ControlPanelAction, DashboardView};

/// Main application window.
pub struct DashboardApp {
    dataset: Result<BikeDataset, DatasetError>,
    control_panel: ControlPanel,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let dataset = BikeDataset::load(DATA_FILE);
        match &dataset {
            Ok(ds) => info!("dataset ready: {} rows", ds.height()),
            Err(e) => error!("failed to load {}: {}", DATA_FILE, e),
        }

        Self {
            dataset,
            control_panel: ControlPanel::new(),
        }
    }

    /// Export the active question's chart to a PNG chosen via a save dialog.
    fn handle_export(&mut self) {
        let Ok(dataset) = &self.dataset else {
            self.control_panel.set_status("No data loaded");
            return;
        };

        let default_name = match self.control_panel.selected {
            BusinessQuestion::UserTrend => "user_trend.png",
            BusinessQuestion::WeatherCorrelation => "weather_boxplot.png",
        };

        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name(default_name)
            .save_file()
        else {
            return; // User cancelled
        };

        let result = match self.control_panel.selected {
            BusinessQuestion::UserTrend => StaticChartRenderer::export_user_trend(&path, dataset),
            BusinessQuestion::WeatherCorrelation => {
                let chart_data = WeatherChartData::from_dataset(dataset);
                StaticChartRenderer::export_weather_boxplot(&path, &chart_data)
            }
        };

        match result {
            Ok(()) => {
                info!("chart exported to {}", path.display());
                self.control_panel
                    .set_status(&format!("Exported {}", path.display()));
                if let Err(e) = open::that(&path) {
                    warn!("could not open exported chart: {e}");
                }
            }
            Err(e) => {
                error!("chart export failed: {e}");
                self.control_panel.set_status(&format!("Error: {e}"));
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut export_requested = false;

        // Left panel - question selector
        SidePanel::left("control_panel")
            .min_width(280.0)
            .max_width(340.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    if self.control_panel.show(ui) == ControlPanelAction::ExportChart {
                        export_requested = true;
                    }
                });
            });

        if export_requested {
            self.handle_export();
        }

        // Central panel - dashboard content
        egui::CentralPanel::default().show(ctx, |ui| match &self.dataset {
            Ok(dataset) => DashboardView::show(ui, dataset, self.control_panel.selected),
            Err(error) => DashboardView::show_load_error(ui, error),
        });
    }
}
