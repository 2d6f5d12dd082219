//! Cleaned glucose series and its per-week views.

use chrono::{NaiveDate, NaiveDateTime};

use super::week::Week;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub timestamp: NaiveDateTime,
    /// mmol/L
    pub glucose: f64,
    /// 1-based line of the export this value came from.
    pub line: u64,
}

impl Measurement {
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}

/// Measurements sorted ascending by timestamp. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    measurements: Vec<Measurement>,
}

impl Series {
    /// Sorts by timestamp. The sort is stable, so equal timestamps keep
    /// their input order.
    pub fn from_measurements(mut measurements: Vec<Measurement>) -> Self {
        measurements.sort_by_key(|m| m.timestamp);
        Self { measurements }
    }

    pub fn len(&self) -> usize {
        self.measurements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }

    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    /// `(first date, last date)`, or `None` for an empty series.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.measurements.first()?;
        let last = self.measurements.last()?;
        Some((first.date(), last.date()))
    }

    /// Measurements with `week.first_day() <= date <= week.last_day()`.
    pub fn within(&self, week: &Week) -> &[Measurement] {
        let start = self
            .measurements
            .partition_point(|m| m.date() < week.first_day());
        let end = self
            .measurements
            .partition_point(|m| m.date() <= week.last_day());
        &self.measurements[start..end.max(start)]
    }
}
