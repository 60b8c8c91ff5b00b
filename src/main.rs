//! Bike Sharing Dashboard - Bike Sharing Dataset Analysis & Interactive Dashboard
//!
//! A Rust application that loads the day-level bike rental dataset and
//! answers two fixed business questions with narrative text and charts.

mod charts;
mod data;
mod gui;
mod stats;

use eframe::egui;
use gui::DashboardApp;

fn main() -> eframe::Result<()> {
    env_logger::init();

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([1000.0, 700.0])
            .with_title("Bike Sharing Dashboard"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Bike Sharing Dashboard",
        options,
        Box::new(|cc| Ok(Box::new(DashboardApp::new(cc)))),
    )
}
