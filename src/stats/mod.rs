//! Stats module - derived analysis values

mod calculator;

pub use calculator::{StatsCalculator, WeatherGroupSummary};
