//! Statistics Calculator Module
//! Derived values behind the two business questions: the overflow-date scan,
//! Pearson correlation, and per-weather-group summaries.

use chrono::NaiveDate;
use rayon::prelude::*;
use statrs::statistics::Statistics;

use crate::data::BikeDataset;

/// Summary of the total rental counts for one weather situation code.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherGroupSummary {
    pub weathersit: i64,
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    pub std: f64,
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
}

/// Handles the derived values. Every function is a pure function of the
/// immutable dataset, so recomputation is deterministic.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Distinct dates where the casual count exceeds the registered count.
    /// Full linear scan in row order, no early exit.
    pub fn casual_overflow_dates(ds: &BikeDataset) -> Vec<NaiveDate> {
        let mut dates = Vec::new();
        for ((date, casual), registered) in
            ds.dates().iter().zip(ds.casual()).zip(ds.registered())
        {
            if casual > registered && !dates.contains(date) {
                dates.push(*date);
            }
        }
        dates
    }

    /// Pearson correlation coefficient of two equally long samples. NaN when
    /// either sample has zero variance or fewer than two points.
    pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
        let n = x.len().min(y.len());
        if n < 2 {
            return f64::NAN;
        }

        let mean_x = x[..n].iter().sum::<f64>() / n as f64;
        let mean_y = y[..n].iter().sum::<f64>() / n as f64;

        let mut cov = 0.0;
        let mut var_x = 0.0;
        let mut var_y = 0.0;
        for i in 0..n {
            let dx = x[i] - mean_x;
            let dy = y[i] - mean_y;
            cov += dx * dy;
            var_x += dx * dx;
            var_y += dy * dy;
        }

        let denom = (var_x * var_y).sqrt();
        if denom == 0.0 {
            return f64::NAN;
        }
        cov / denom
    }

    /// Correlation between the weather situation code and the total rentals
    /// over the whole table.
    pub fn weather_rental_correlation(ds: &BikeDataset) -> f64 {
        let weather: Vec<f64> = ds.weathersit().iter().map(|&v| v as f64).collect();
        let cnt: Vec<f64> = ds.cnt().iter().map(|&v| v as f64).collect();
        Self::pearson(&weather, &cnt)
    }

    /// Total rental counts grouped by weather situation code, one entry per
    /// distinct code present, ordered by code.
    pub fn rentals_by_weather(ds: &BikeDataset) -> Vec<(i64, Vec<f64>)> {
        let mut codes: Vec<i64> = ds.weathersit().to_vec();
        codes.sort_unstable();
        codes.dedup();

        codes
            .into_iter()
            .map(|code| {
                let values: Vec<f64> = ds
                    .weathersit()
                    .iter()
                    .zip(ds.cnt())
                    .filter(|(&w, _)| w == code)
                    .map(|(_, &c)| c as f64)
                    .collect();
                (code, values)
            })
            .collect()
    }

    /// Per-weather-situation summary of the total rental counts, computed
    /// group-parallel with rayon.
    pub fn summarize_by_weather(ds: &BikeDataset) -> Vec<WeatherGroupSummary> {
        Self::rentals_by_weather(ds)
            .par_iter()
            .map(|(code, values)| Self::summarize_group(*code, values))
            .collect()
    }

    fn summarize_group(code: i64, values: &[f64]) -> WeatherGroupSummary {
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let q1 = Self::percentile(&sorted, 25.0);
        let q3 = Self::percentile(&sorted, 75.0);
        let std = if values.len() > 1 { values.std_dev() } else { 0.0 };

        WeatherGroupSummary {
            weathersit: code,
            count: values.len(),
            mean: values.mean(),
            median: Self::percentile(&sorted, 50.0),
            min: values.min(),
            max: values.max(),
            std,
            q1,
            q3,
            iqr: q3 - q1,
        }
    }

    /// Calculate percentile using linear interpolation (NumPy compatible).
    fn percentile(sorted_values: &[f64], p: f64) -> f64 {
        let n = sorted_values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return sorted_values[0];
        }

        let rank = (p / 100.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (rank.ceil() as usize).min(n - 1);
        let frac = rank - lower as f64;

        if lower == upper {
            sorted_values[lower]
        } else {
            sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::BikeDataset;
    use polars::prelude::*;

    fn dataset(casual: &[i64], registered: &[i64], weathersit: &[i64]) -> BikeDataset {
        let dates: Vec<String> = (0..casual.len())
            .map(|i| format!("2011-01-{:02}", i + 1))
            .collect();
        let cnt: Vec<i64> = casual.iter().zip(registered).map(|(c, r)| c + r).collect();

        let df = df!(
            "dteday" => dates,
            "casual" => casual.to_vec(),
            "registered" => registered.to_vec(),
            "cnt" => cnt,
            "weathersit" => weathersit.to_vec(),
        )
        .unwrap();

        BikeDataset::from_dataframe(df).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn overflow_dates_match_the_scan_exactly() {
        let ds = dataset(&[500, 100, 800, 50], &[400, 700, 300, 60], &[1, 1, 1, 1]);
        let dates = StatsCalculator::casual_overflow_dates(&ds);

        assert_eq!(dates, vec![date(2011, 1, 1), date(2011, 1, 3)]);
    }

    #[test]
    fn no_overflow_yields_empty_list() {
        let ds = dataset(&[10, 20, 30], &[100, 200, 300], &[1, 2, 3]);
        assert!(StatsCalculator::casual_overflow_dates(&ds).is_empty());
    }

    #[test]
    fn equal_counts_do_not_count_as_overflow() {
        let ds = dataset(&[100, 100], &[100, 99], &[1, 1]);
        assert_eq!(
            StatsCalculator::casual_overflow_dates(&ds),
            vec![date(2011, 1, 2)]
        );
    }

    #[test]
    fn pearson_detects_perfect_correlation() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let up = [2.0, 4.0, 6.0, 8.0];
        let down = [8.0, 6.0, 4.0, 2.0];

        assert!((StatsCalculator::pearson(&x, &up) - 1.0).abs() < 1e-12);
        assert!((StatsCalculator::pearson(&x, &down) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn pearson_is_nan_without_variance() {
        let x = [5.0, 5.0, 5.0];
        let y = [1.0, 2.0, 3.0];
        assert!(StatsCalculator::pearson(&x, &y).is_nan());
    }

    #[test]
    fn weather_correlation_is_deterministic() {
        let ds = dataset(&[10, 40, 20, 60], &[90, 160, 180, 140], &[1, 2, 1, 3]);
        let a = StatsCalculator::weather_rental_correlation(&ds);
        let b = StatsCalculator::weather_rental_correlation(&ds);

        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn percentile_uses_linear_interpolation() {
        let sorted = [1.0, 2.0, 3.0, 4.0];

        assert!((StatsCalculator::percentile(&sorted, 25.0) - 1.75).abs() < 1e-12);
        assert!((StatsCalculator::percentile(&sorted, 50.0) - 2.5).abs() < 1e-12);
        assert!((StatsCalculator::percentile(&sorted, 75.0) - 3.25).abs() < 1e-12);
    }

    #[test]
    fn summaries_have_one_row_per_present_code() {
        // cnt equals registered here because casual is zero throughout.
        let ds = dataset(
            &[0, 0, 0, 0, 0],
            &[10, 20, 30, 40, 50],
            &[1, 1, 2, 2, 2],
        );
        let summaries = StatsCalculator::summarize_by_weather(&ds);

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].weathersit, 1);
        assert_eq!(summaries[1].weathersit, 2);
        assert_eq!(summaries[0].count, 2);
        assert_eq!(summaries[1].count, 3);
    }

    #[test]
    fn group_summary_matches_hand_computation() {
        let ds = dataset(
            &[0, 0, 0, 0, 0],
            &[10, 20, 30, 40, 50],
            &[1, 1, 2, 2, 2],
        );
        let summaries = StatsCalculator::summarize_by_weather(&ds);
        let g2 = &summaries[1];

        assert!((g2.mean - 40.0).abs() < 1e-12);
        assert!((g2.median - 40.0).abs() < 1e-12);
        assert!((g2.min - 30.0).abs() < 1e-12);
        assert!((g2.max - 50.0).abs() < 1e-12);
        assert!((g2.std - 10.0).abs() < 1e-12);
        assert!((g2.q1 - 35.0).abs() < 1e-12);
        assert!((g2.q3 - 45.0).abs() < 1e-12);
    }

    #[test]
    fn iqr_is_q3_minus_q1_for_every_group() {
        let ds = dataset(
            &[5, 0, 3, 0, 7, 0, 1],
            &[95, 120, 130, 88, 240, 310, 99],
            &[1, 2, 3, 1, 2, 3, 1],
        );

        for summary in StatsCalculator::summarize_by_weather(&ds) {
            assert!((summary.iqr - (summary.q3 - summary.q1)).abs() < 1e-12);
        }
    }
}
