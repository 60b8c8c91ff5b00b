//! Static Chart Renderer
//! Renders the active question's chart to a PNG file with plotters, for the
//! sidebar export action. Consumes the same derived values as the
//! interactive charts.

use anyhow::{bail, Context, Result};
use plotters::prelude::*;
use std::path::Path;

use super::plotter::{date_to_x, month_year_label, quarter_marks, whisker_bounds, WeatherChartData};
use crate::data::{weather_label, BikeDataset};

const IMAGE_SIZE: (u32, u32) = (1200, 620);

const CASUAL_RGB: RGBColor = RGBColor(52, 152, 219);
const REGISTERED_RGB: RGBColor = RGBColor(231, 76, 60);
const WEATHER_RGB: [RGBColor; 4] = [
    RGBColor(46, 204, 113),
    RGBColor(243, 156, 18),
    RGBColor(155, 89, 182),
    RGBColor(96, 125, 139),
];

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render the casual/registered time series to a PNG file.
    pub fn export_user_trend(path: &Path, ds: &BikeDataset) -> Result<()> {
        let (Some(&first), Some(&last)) = (ds.dates().iter().min(), ds.dates().iter().max())
        else {
            bail!("dataset has no rows");
        };

        let y_max = ds
            .casual()
            .iter()
            .chain(ds.registered())
            .copied()
            .max()
            .unwrap_or(0) as f64
            * 1.05;

        let root = BitMapBackend::new(path, IMAGE_SIZE).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption("Casual and Registered Users Over Time", ("sans-serif", 26))
            .margin(14)
            .x_label_area_size(44)
            .y_label_area_size(64)
            .build_cartesian_2d(date_to_x(first)..date_to_x(last), 0.0..y_max)?;

        chart
            .configure_mesh()
            .x_desc("Date")
            .y_desc("Users")
            .x_labels(quarter_marks(first, last).len().max(2))
            .x_label_formatter(&|x| month_year_label(*x))
            .draw()?;

        chart
            .draw_series(LineSeries::new(
                ds.dates()
                    .iter()
                    .zip(ds.casual())
                    .map(|(&d, &v)| (date_to_x(d), v as f64)),
                &CASUAL_RGB,
            ))?
            .label("Casual")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], CASUAL_RGB));

        chart
            .draw_series(LineSeries::new(
                ds.dates()
                    .iter()
                    .zip(ds.registered())
                    .map(|(&d, &v)| (date_to_x(d), v as f64)),
                &REGISTERED_RGB,
            ))?
            .label("Registered")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], REGISTERED_RGB));

        chart
            .configure_series_labels()
            .border_style(BLACK)
            .background_style(WHITE.mix(0.85))
            .draw()?;

        root.present()
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }

    /// Render the per-weather box plot to a PNG file. Boxes and whiskers are
    /// drawn as primitives so the geometry matches the interactive plot.
    pub fn export_weather_boxplot(path: &Path, data: &WeatherChartData) -> Result<()> {
        if data.groups.is_empty() {
            bail!("no weather groups to plot");
        }

        let all_values = || data.groups.iter().flat_map(|(_, v)| v.iter()).copied();
        let y_max = all_values().fold(f64::NEG_INFINITY, f64::max) * 1.05;
        let y_min = all_values().fold(f64::INFINITY, f64::min).min(0.0);
        let n = data.groups.len() as f64;

        let root = BitMapBackend::new(path, IMAGE_SIZE).into_drawing_area();
        root.fill(&WHITE)?;

        let labels: Vec<String> = data
            .groups
            .iter()
            .map(|(code, _)| weather_label(*code).to_string())
            .collect();

        let mut chart = ChartBuilder::on(&root)
            .caption("Total Rentals by Weather Situation", ("sans-serif", 26))
            .margin(14)
            .x_label_area_size(44)
            .y_label_area_size(64)
            .build_cartesian_2d(-0.6..(n - 0.4), y_min..y_max)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc("Weather situation")
            .y_desc("Total rentals")
            .x_labels(data.groups.len())
            .x_label_formatter(&|x| {
                let idx = x.round();
                if (x - idx).abs() < 0.01 && idx >= 0.0 && (idx as usize) < labels.len() {
                    labels[idx as usize].clone()
                } else {
                    String::new()
                }
            })
            .draw()?;

        for (i, ((code, values), summary)) in
            data.groups.iter().zip(&data.summaries).enumerate()
        {
            if values.is_empty() {
                continue;
            }

            let color = WEATHER_RGB[(code - 1).rem_euclid(WEATHER_RGB.len() as i64) as usize];
            let x = i as f64;
            let (lo, hi) = whisker_bounds(values, summary);

            chart.draw_series([
                Rectangle::new([(x - 0.25, summary.q1), (x + 0.25, summary.q3)], color.mix(0.3).filled()),
                Rectangle::new([(x - 0.25, summary.q1), (x + 0.25, summary.q3)], color.stroke_width(2)),
            ])?;
            chart.draw_series([
                PathElement::new(vec![(x - 0.25, summary.median), (x + 0.25, summary.median)], color.stroke_width(2)),
                PathElement::new(vec![(x, lo), (x, summary.q1)], color.stroke_width(1)),
                PathElement::new(vec![(x, summary.q3), (x, hi)], color.stroke_width(1)),
                PathElement::new(vec![(x - 0.12, lo), (x + 0.12, lo)], color.stroke_width(1)),
                PathElement::new(vec![(x - 0.12, hi), (x + 0.12, hi)], color.stroke_width(1)),
            ])?;
        }

        root.present()
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }
}
