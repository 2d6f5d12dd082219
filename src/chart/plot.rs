use chrono::NaiveDateTime;

use crate::chart::config::ChartConfig;
use crate::models::{Measurement, Week};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Back-end neutral description of one weekly chart.
///
/// X values are fractional days since the week's first midnight, so the
/// axis runs from 0 to `x_max` (the day after `last_day`).
#[derive(Debug, Clone, PartialEq)]
pub struct WeekChart {
    pub title: String,
    pub y_label: String,
    pub x_max: f64,
    pub y_range: (f64, f64),
    pub band: (f64, f64),
    pub band_color: String,
    /// One label per day, placed at x = 0, 1, 2, ...
    pub tick_labels: Vec<String>,
    pub points: Vec<(f64, f64)>,
    pub width_cm: f64,
    pub height_cm: f64,
}

impl WeekChart {
    pub fn build(week: &Week, measurements: &[Measurement], config: &ChartConfig) -> Self {
        let origin: NaiveDateTime = week.first_day().and_time(chrono::NaiveTime::MIN);

        let points = measurements
            .iter()
            .map(|m| {
                let offset = (m.timestamp - origin).num_seconds() as f64 / SECONDS_PER_DAY;
                (offset, m.glucose)
            })
            .collect();

        Self {
            title: format!(
                "{} {}/{}: {}",
                config.title_prefix,
                week.iso_week(),
                week.iso_year(),
                week.label()
            ),
            y_label: config.y_label.clone(),
            x_max: f64::from(week.span_days()),
            y_range: (config.y_min, config.y_max),
            band: (config.target_low, config.target_high),
            band_color: config.band_color.clone(),
            tick_labels: week.days().map(|day| day.format("%a").to_string()).collect(),
            points,
            width_cm: config.width_cm,
            height_cm: config.height_cm,
        }
    }
}
