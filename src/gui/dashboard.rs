//! Dashboard View
//! Central panel: page shell, per-question narrative, and charts. Each
//! render pass is a pure function of the loaded dataset and the current
//! selection; narrative strings are built by pure helpers so a selection
//! round-trip reproduces identical text.

use chrono::{Datelike, NaiveDate};
use egui::{Color32, Grid, RichText, ScrollArea};

use crate::charts::{ChartPlotter, WeatherChartData};
use crate::data::{weather_label, BikeDataset, DatasetError};
use crate::gui::control_panel::BusinessQuestion;
use crate::stats::{StatsCalculator, WeatherGroupSummary};

const DATASET_URL: &str = "https://www.kaggle.com/datasets/lakshmi25npathi/bike-sharing-dataset";
const HIGHLIGHT_GREEN: Color32 = Color32::from_rgb(40, 167, 69);
const PREVIEW_ROWS: usize = 5;

/// Central content area.
pub struct DashboardView;

impl DashboardView {
    pub fn show(ui: &mut egui::Ui, dataset: &BikeDataset, question: BusinessQuestion) {
        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                Self::draw_header(ui);
                Self::draw_preview(ui, dataset);

                ui.add_space(12.0);
                ui.label(RichText::new("Selected Question").size(16.0).strong());
                ui.label(question.prompt());
                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                match question {
                    BusinessQuestion::UserTrend => Self::draw_user_trend_section(ui, dataset),
                    BusinessQuestion::WeatherCorrelation => {
                        Self::draw_weather_section(ui, dataset)
                    }
                }
            });
    }

    /// Shown instead of the dashboard when the startup load failed.
    pub fn show_load_error(ui: &mut egui::Ui, error: &DatasetError) {
        ui.centered_and_justified(|ui| {
            ui.label(
                RichText::new(format!("Failed to load dataset: {error}"))
                    .size(16.0)
                    .color(Color32::from_rgb(220, 53, 69)),
            );
        });
    }

    fn draw_header(ui: &mut egui::Ui) {
        ui.heading("Bike Sharing Data Analysis");
        ui.horizontal(|ui| {
            ui.label("Dataset:");
            ui.hyperlink_to("Bike Sharing Dataset (Kaggle)", DATASET_URL);
        });
        ui.add_space(8.0);
    }

    fn draw_preview(ui: &mut egui::Ui, dataset: &BikeDataset) {
        ui.label(RichText::new("Data Preview").size(16.0).strong());
        ui.add_space(4.0);

        let preview = dataset.preview(PREVIEW_ROWS);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                Grid::new("data_preview")
                    .striped(true)
                    .min_col_width(55.0)
                    .spacing([8.0, 4.0])
                    .show(ui, |ui| {
                        for name in preview.get_column_names() {
                            ui.label(RichText::new(name.to_string()).strong().size(11.0));
                        }
                        ui.end_row();

                        for row in 0..preview.height() {
                            for col in preview.get_columns() {
                                let text = col
                                    .as_materialized_series()
                                    .get(row)
                                    .map(|v| v.to_string().trim_matches('"').to_string())
                                    .unwrap_or_default();
                                ui.label(RichText::new(text).size(11.0));
                            }
                            ui.end_row();
                        }
                    });
            });
    }

    fn draw_user_trend_section(ui: &mut egui::Ui, dataset: &BikeDataset) {
        ui.label(
            RichText::new(BusinessQuestion::UserTrend.heading())
                .size(16.0)
                .strong(),
        );
        ui.add_space(6.0);

        let overflow = StatsCalculator::casual_overflow_dates(dataset);
        if overflow.is_empty() {
            ui.label("No day has more casual users than registered users.");
        } else {
            ui.label("There are days where the casual count exceeds the registered count.");
            ui.label("Dates where casual exceeded registered:");
            for date in &overflow {
                ui.label(
                    RichText::new(date.format("%Y-%m-%d").to_string()).color(HIGHLIGHT_GREEN),
                );
            }
        }
        ui.add_space(6.0);
        ui.label(overflow_conclusion(&overflow, dataset.dates()));

        ui.add_space(12.0);
        ui.label(RichText::new("Visualization").size(16.0).strong());
        ChartPlotter::draw_user_trend(ui, dataset);
        ui.add_space(6.0);
        ui.label(
            "The line chart compares the two rider groups day by day; the seasonal swings and \
             spikes show how differently one-off and subscribed riders use the service.",
        );
    }

    fn draw_weather_section(ui: &mut egui::Ui, dataset: &BikeDataset) {
        ui.label(
            RichText::new(BusinessQuestion::WeatherCorrelation.heading())
                .size(16.0)
                .strong(),
        );
        ui.add_space(6.0);

        let r = StatsCalculator::weather_rental_correlation(dataset);
        ui.label(RichText::new(correlation_line(r)).color(HIGHLIGHT_GREEN));
        ui.label(correlation_interpretation(r));

        ui.add_space(12.0);
        ui.label(RichText::new("Visualization").size(16.0).strong());

        let chart_data = WeatherChartData::from_dataset(dataset);
        ChartPlotter::draw_weather_boxplot(ui, &chart_data);

        ui.add_space(8.0);
        ui.label(
            RichText::new("Rentals by Weather Situation")
                .size(14.0)
                .strong(),
        );
        ChartPlotter::draw_summary_table(ui, &chart_data.summaries);
        ui.add_space(6.0);
        ui.label(boxplot_reading(&chart_data.summaries));
    }
}

/// Closing sentence for the user-trend question. Day count and year span are
/// derived from the scan, never hard-coded.
fn overflow_conclusion(overflow: &[NaiveDate], all_dates: &[NaiveDate]) -> String {
    let (Some(first), Some(last)) = (all_dates.iter().min(), all_dates.iter().max()) else {
        return String::new();
    };

    let span = if first.year() == last.year() {
        format!("during {}", first.year())
    } else {
        format!("between {} and {}", first.year(), last.year())
    };

    match overflow.len() {
        0 => format!("Registered users outnumbered casual users on every single day recorded {span}."),
        1 => format!(
            "Only 1 day {span} saw casual users exceed registered users; on every other day \
             registered users were on top."
        ),
        n => format!(
            "Only {n} days {span} saw casual users exceed registered users; on every other day \
             registered users were on top."
        ),
    }
}

/// One-line correlation statement, rounded to two decimals for display.
fn correlation_line(r: f64) -> String {
    format!("Correlation between weather situation and total rentals: {r:.2}")
}

/// Interpretation wording derived from the coefficient itself, so the
/// narrative cannot diverge from the loaded data.
fn correlation_interpretation(r: f64) -> String {
    if r.is_nan() {
        return "The correlation is undefined for this data (one of the variables never varies)."
            .to_string();
    }

    let direction = if r < 0.0 { "negative" } else { "positive" };
    let strength = match r.abs() {
        a if a < 0.3 => "weak",
        a if a < 0.6 => "moderate",
        _ => "strong",
    };
    let tendency = if r < 0.0 {
        "rentals tend to drop as the weather situation worsens"
    } else {
        "rentals tend to rise as the weather situation code increases"
    };

    format!(
        "The coefficient indicates a {strength} {direction} relationship between the two \
         variables: {tendency}."
    )
}

/// Comparative sentence under the box plot, derived from the summaries.
fn boxplot_reading(summaries: &[WeatherGroupSummary]) -> String {
    let Some(best) = summaries.iter().max_by(|a, b| {
        a.median
            .partial_cmp(&b.median)
            .unwrap_or(std::cmp::Ordering::Equal)
    }) else {
        return String::new();
    };

    let mut text = format!(
        "The box plot shows clear differences between weather situations: '{}' days have the \
         highest median rental count.",
        weather_label(best.weathersit)
    );

    let missing: Vec<&str> = (1..=4)
        .filter(|code| !summaries.iter().any(|s| s.weathersit == *code))
        .map(weather_label)
        .collect();
    if !missing.is_empty() {
        text.push_str(&format!(
            " No days with '{}' conditions appear in the data at all.",
            missing.join("' or '")
        ));
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn summary(code: i64, median: f64) -> WeatherGroupSummary {
        WeatherGroupSummary {
            weathersit: code,
            count: 1,
            mean: median,
            median,
            min: median,
            max: median,
            std: 0.0,
            q1: median,
            q3: median,
            iqr: 0.0,
        }
    }

    #[test]
    fn conclusion_derives_count_and_span_from_data() {
        let overflow = vec![date(2011, 3, 1), date(2012, 5, 2), date(2012, 9, 9)];
        let all = vec![date(2011, 1, 1), date(2012, 12, 31)];

        let text = overflow_conclusion(&overflow, &all);
        assert!(text.contains("Only 3 days"));
        assert!(text.contains("between 2011 and 2012"));
    }

    #[test]
    fn conclusion_handles_the_no_overflow_case() {
        let all = vec![date(2011, 1, 1), date(2011, 6, 30)];
        let text = overflow_conclusion(&[], &all);

        assert!(text.contains("every single day"));
        assert!(text.contains("during 2011"));
    }

    #[test]
    fn correlation_line_rounds_to_two_decimals() {
        assert_eq!(
            correlation_line(-0.297),
            "Correlation between weather situation and total rentals: -0.30"
        );
    }

    #[test]
    fn interpretation_tracks_sign_and_magnitude() {
        let weak_negative = correlation_interpretation(-0.29);
        assert!(weak_negative.contains("weak"));
        assert!(weak_negative.contains("negative"));

        let strong_positive = correlation_interpretation(0.75);
        assert!(strong_positive.contains("strong"));
        assert!(strong_positive.contains("positive"));

        assert!(correlation_interpretation(f64::NAN).contains("undefined"));
    }

    #[test]
    fn narrative_is_bit_identical_across_renders() {
        let overflow = vec![date(2012, 10, 29)];
        let all = vec![date(2011, 1, 1), date(2012, 12, 31)];

        assert_eq!(
            overflow_conclusion(&overflow, &all),
            overflow_conclusion(&overflow, &all)
        );
        assert_eq!(
            correlation_interpretation(-0.297),
            correlation_interpretation(-0.297)
        );
    }

    #[test]
    fn boxplot_reading_names_the_best_group_and_missing_codes() {
        let summaries = vec![summary(1, 4876.0), summary(2, 4070.0), summary(3, 1817.0)];
        let text = boxplot_reading(&summaries);

        assert!(text.contains("Clear / partly cloudy"));
        assert!(text.contains("Heavy rain / snow"));
    }
}
