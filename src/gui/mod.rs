//! GUI module - User interface components

mod app;
mod control_panel;
mod dashboard;

pub use app::DashboardApp;
pub use control_panel::{BusinessQuestion, ControlPanel, ControlPanelAction};
pub use dashboard::DashboardView;
