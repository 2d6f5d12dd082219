//! Calendar-week segment value.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

pub const DAYS_PER_WEEK: u32 = 7;

const LABEL_DATE_FORMAT: &str = "%d.%m.%Y";

/// One Monday-aligned segment of the series.
///
/// `index` is 1-based and sequential within a run. The segment covers
/// `first_day..=last_day`; for a regular week that is Monday to Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Week {
    first_day: NaiveDate,
    index: u32,
    span_days: u32,
}

impl Week {
    pub fn new(first_day: NaiveDate, index: u32) -> Self {
        Self::with_span(first_day, index, DAYS_PER_WEEK)
    }

    /// Segment of `span_days` days. A zero span is clamped to one day so
    /// `last_day >= first_day` always holds.
    pub fn with_span(first_day: NaiveDate, index: u32, span_days: u32) -> Self {
        Self {
            first_day,
            index,
            span_days: span_days.max(1),
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn span_days(&self) -> u32 {
        self.span_days
    }

    pub fn last_day(&self) -> NaiveDate {
        self.first_day + Duration::days(i64::from(self.span_days) - 1)
    }

    /// First day after the segment; the right edge of the chart's x axis.
    pub fn end_exclusive(&self) -> NaiveDate {
        self.first_day + Duration::days(i64::from(self.span_days))
    }

    pub fn iso_week(&self) -> u32 {
        self.first_day.iso_week().week()
    }

    pub fn iso_year(&self) -> i32 {
        self.first_day.iso_week().year()
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.first_day <= day && day <= self.last_day()
    }

    /// Human-readable span, e.g. `24.07.2023 - 30.07.2023`.
    pub fn label(&self) -> String {
        format!(
            "{} - {}",
            self.first_day.format(LABEL_DATE_FORMAT),
            self.last_day().format(LABEL_DATE_FORMAT)
        )
    }

    /// Span without whitespace, used in artifact file names.
    pub fn file_label(&self) -> String {
        format!(
            "{}-{}",
            self.first_day.format(LABEL_DATE_FORMAT),
            self.last_day().format(LABEL_DATE_FORMAT)
        )
    }

    /// Every day of the segment, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (0..i64::from(self.span_days)).map(move |offset| self.first_day + Duration::days(offset))
    }
}

impl std::fmt::Display for Week {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{} ({})", self.index, self.label())
    }
}
