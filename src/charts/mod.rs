//! Charts module - interactive plotting and static export

mod plotter;
mod renderer;

pub use plotter::{ChartPlotter, WeatherChartData};
pub use renderer::StaticChartRenderer;
