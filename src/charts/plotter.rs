//! Chart Plotter Module
//! Interactive visualizations for the two business questions using egui_plot.

use chrono::{Datelike, NaiveDate};
use egui::{Color32, RichText};
use egui_plot::{BoxElem, BoxPlot, BoxSpread, GridMark, Legend, Line, Plot, PlotPoints};

use crate::data::{weather_label, BikeDataset};
use crate::stats::{StatsCalculator, WeatherGroupSummary};

/// Series colors
pub const CASUAL_COLOR: Color32 = Color32::from_rgb(52, 152, 219); // Blue
pub const REGISTERED_COLOR: Color32 = Color32::from_rgb(231, 76, 60); // Red

/// Box colors per weather situation code, clear to severe.
pub const WEATHER_PALETTE: [Color32; 4] = [
    Color32::from_rgb(46, 204, 113),  // Green
    Color32::from_rgb(243, 156, 18),  // Orange
    Color32::from_rgb(155, 89, 182),  // Purple
    Color32::from_rgb(96, 125, 139),  // Blue Grey
];

/// Chart data for the weather question: raw values per group plus the
/// summaries shown in the table. Both sides come from the same derived
/// grouping, so box geometry and table rows always agree.
#[derive(Clone)]
pub struct WeatherChartData {
    pub groups: Vec<(i64, Vec<f64>)>,
    pub summaries: Vec<WeatherGroupSummary>,
}

impl WeatherChartData {
    pub fn from_dataset(ds: &BikeDataset) -> Self {
        Self {
            groups: StatsCalculator::rentals_by_weather(ds),
            summaries: StatsCalculator::summarize_by_weather(ds),
        }
    }
}

/// Map a date onto the plot x-axis (days since CE).
pub(crate) fn date_to_x(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

/// Format an x-axis position back into a "Mon YYYY" label.
pub(crate) fn month_year_label(x: f64) -> String {
    NaiveDate::from_num_days_from_ce_opt(x.round() as i32)
        .map(|d| d.format("%b %Y").to_string())
        .unwrap_or_default()
}

/// First-of-month dates every three months (Jan/Apr/Jul/Oct) inside the range.
pub(crate) fn quarter_marks(first: NaiveDate, last: NaiveDate) -> Vec<NaiveDate> {
    let mut marks = Vec::new();
    let mut year = first.year();
    let mut month = first.month();

    // Align on the next quarter boundary
    while (month - 1) % 3 != 0 {
        month += 1;
        if month > 12 {
            month = 1;
            year += 1;
        }
    }

    while let Some(mark) = NaiveDate::from_ymd_opt(year, month, 1) {
        if mark > last {
            break;
        }
        if mark >= first {
            marks.push(mark);
        }
        month += 3;
        if month > 12 {
            month -= 12;
            year += 1;
        }
    }

    marks
}

/// Whisker endpoints: furthest observed values inside the 1.5×IQR fences.
pub(crate) fn whisker_bounds(values: &[f64], summary: &WeatherGroupSummary) -> (f64, f64) {
    let low_fence = summary.q1 - 1.5 * summary.iqr;
    let high_fence = summary.q3 + 1.5 * summary.iqr;

    let lo = values
        .iter()
        .copied()
        .filter(|&v| v >= low_fence)
        .fold(f64::INFINITY, f64::min);
    let hi = values
        .iter()
        .copied()
        .filter(|&v| v <= high_fence)
        .fold(f64::NEG_INFINITY, f64::max);

    (
        if lo.is_finite() { lo } else { summary.q1 },
        if hi.is_finite() { hi } else { summary.q3 },
    )
}

/// Creates the interactive charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Two overlaid line series (casual, registered) against date, with
    /// month-year ticks every three months.
    pub fn draw_user_trend(ui: &mut egui::Ui, ds: &BikeDataset) {
        let casual: PlotPoints = ds
            .dates()
            .iter()
            .zip(ds.casual())
            .map(|(&d, &v)| [date_to_x(d), v as f64])
            .collect();
        let registered: PlotPoints = ds
            .dates()
            .iter()
            .zip(ds.registered())
            .map(|(&d, &v)| [date_to_x(d), v as f64])
            .collect();

        let marks: Vec<GridMark> = match (ds.dates().iter().min(), ds.dates().iter().max()) {
            (Some(&first), Some(&last)) => quarter_marks(first, last)
                .into_iter()
                .map(|d| GridMark {
                    value: date_to_x(d),
                    step_size: 90.0,
                })
                .collect(),
            _ => Vec::new(),
        };

        Plot::new("user_trend")
            .height(360.0)
            .allow_scroll(false)
            .x_axis_label("Date")
            .y_axis_label("Users")
            .legend(Legend::default())
            .x_grid_spacer(move |_input| marks.clone())
            .x_axis_formatter(|mark, _range| month_year_label(mark.value))
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(casual)
                        .color(CASUAL_COLOR)
                        .width(1.5)
                        .name("Casual"),
                );
                plot_ui.line(
                    Line::new(registered)
                        .color(REGISTERED_COLOR)
                        .width(1.5)
                        .name("Registered"),
                );
            });
    }

    /// Box-and-whisker plot of total rentals per weather situation.
    pub fn draw_weather_boxplot(ui: &mut egui::Ui, data: &WeatherChartData) {
        let labels: Vec<String> = data
            .groups
            .iter()
            .map(|(code, _)| weather_label(*code).to_string())
            .collect();
        let marks: Vec<GridMark> = (0..data.groups.len())
            .map(|i| GridMark {
                value: i as f64,
                step_size: 1.0,
            })
            .collect();

        Plot::new("weather_boxplot")
            .height(360.0)
            .allow_scroll(false)
            .x_axis_label("Weather situation")
            .y_axis_label("Total rentals")
            .x_grid_spacer(move |_input| marks.clone())
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round() as usize;
                if (mark.value - idx as f64).abs() < 0.01 && idx < labels.len() {
                    labels[idx].clone()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                for (i, ((code, values), summary)) in
                    data.groups.iter().zip(&data.summaries).enumerate()
                {
                    if values.is_empty() {
                        continue;
                    }

                    let color =
                        WEATHER_PALETTE[(code - 1).rem_euclid(WEATHER_PALETTE.len() as i64) as usize];
                    let (whisker_low, whisker_high) = whisker_bounds(values, summary);

                    let box_elem = BoxElem::new(
                        i as f64,
                        BoxSpread::new(
                            whisker_low,
                            summary.q1,
                            summary.median,
                            summary.q3,
                            whisker_high,
                        ),
                    )
                    .box_width(0.5)
                    .fill(color.gamma_multiply(0.3))
                    .stroke(egui::Stroke::new(1.5, color));

                    plot_ui.box_plot(BoxPlot::new(vec![box_elem]).name(weather_label(*code)));
                }
            });
    }

    /// Striped per-group summary table.
    pub fn draw_summary_table(ui: &mut egui::Ui, summaries: &[WeatherGroupSummary]) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new("weather_summary_table")
                    .striped(true)
                    .min_col_width(55.0)
                    .spacing([8.0, 4.0])
                    .show(ui, |ui| {
                        for header in [
                            "Weather", "N", "Mean", "Median", "Min", "Max", "Std", "Q1", "Q3",
                            "IQR",
                        ] {
                            ui.label(RichText::new(header).strong().size(11.0));
                        }
                        ui.end_row();

                        for summary in summaries {
                            ui.label(
                                RichText::new(weather_label(summary.weathersit)).size(11.0),
                            );
                            ui.label(RichText::new(summary.count.to_string()).size(11.0));
                            for value in [
                                summary.mean,
                                summary.median,
                                summary.min,
                                summary.max,
                                summary.std,
                                summary.q1,
                                summary.q3,
                                summary.iqr,
                            ] {
                                ui.label(RichText::new(format!("{:.2}", value)).size(11.0));
                            }
                            ui.end_row();
                        }
                    });
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn axis_mapping_round_trips_through_labels() {
        let d = date(2011, 4, 1);
        assert_eq!(month_year_label(date_to_x(d)), "Apr 2011");
    }

    #[test]
    fn quarter_marks_cover_two_years() {
        let marks = quarter_marks(date(2011, 1, 1), date(2012, 12, 31));

        assert_eq!(marks.len(), 8);
        assert_eq!(marks[0], date(2011, 1, 1));
        assert_eq!(marks[7], date(2012, 10, 1));
        for mark in &marks {
            assert_eq!(mark.day(), 1);
            assert!(matches!(mark.month(), 1 | 4 | 7 | 10));
        }
    }

    #[test]
    fn quarter_marks_align_to_the_next_boundary() {
        let marks = quarter_marks(date(2011, 2, 15), date(2011, 8, 1));
        assert_eq!(marks, vec![date(2011, 4, 1), date(2011, 7, 1)]);
    }

    #[test]
    fn whiskers_stay_inside_the_fences() {
        let values = vec![1.0, 2.0, 3.0, 4.0, 100.0];
        let summary = WeatherGroupSummary {
            weathersit: 1,
            count: 5,
            mean: 22.0,
            median: 3.0,
            min: 1.0,
            max: 100.0,
            std: 0.0,
            q1: 2.0,
            q3: 4.0,
            iqr: 2.0,
        };

        let (lo, hi) = whisker_bounds(&values, &summary);
        assert_eq!(lo, 1.0);
        assert_eq!(hi, 4.0); // 100.0 lies outside q3 + 1.5 * iqr
    }
}
