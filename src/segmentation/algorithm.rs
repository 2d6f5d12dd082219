use chrono::{Datelike, Days, Duration, NaiveDate};

use crate::error::{GlucoseError, Result};
use crate::models::{Series, Week};
use crate::segmentation::config::SegmentationConfig;

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::log_info;

/// Longest segment accepted from configuration.
pub const MAX_DAYS_PER_SEGMENT: u32 = 366;

/// Monday on or before `day`.
pub fn align_to_monday(day: NaiveDate) -> NaiveDate {
    day - Duration::days(i64::from(day.weekday().num_days_from_monday()))
}

/// Main segmentation function: covers `first_date..=last_date` with
/// contiguous Monday-aligned segments, indexed from 1.
pub fn segment_weeks(
    first_date: NaiveDate,
    last_date: NaiveDate,
    config: &SegmentationConfig,
) -> Result<Vec<Week>> {
    if config.days_per_segment == 0 || config.days_per_segment > MAX_DAYS_PER_SEGMENT {
        return Err(GlucoseError::InvalidConfig(format!(
            "days_per_segment must be between 1 and {MAX_DAYS_PER_SEGMENT}, got {}",
            config.days_per_segment
        )));
    }
    if last_date < first_date {
        return Err(GlucoseError::InvalidConfig(format!(
            "date range is reversed: {first_date} > {last_date}"
        )));
    }

    let step = Days::new(u64::from(config.days_per_segment));
    let mut boundary = align_to_monday(first_date);
    let mut weeks = Vec::new();
    let mut index = 1u32;

    // Boundary strictly increases each iteration, so this terminates once it
    // passes last_date. A single-day range still yields one segment.
    while boundary <= last_date {
        let Some(next) = boundary.checked_add_days(step) else {
            return Err(GlucoseError::InvalidConfig(format!(
                "segment starting {boundary} runs past the last representable date"
            )));
        };
        weeks.push(Week::with_span(boundary, index, config.days_per_segment));
        boundary = next;
        index += 1;
    }

    Ok(weeks)
}

/// Segments the date range of a cleaned series.
pub fn segment_series(series: &Series, config: &SegmentationConfig) -> Result<Vec<Week>> {
    let Some((first_date, last_date)) = series.date_range() else {
        return Ok(Vec::new());
    };

    let weeks = segment_weeks(first_date, last_date, config)?;
    log_info!(
        "Segmented {} .. {} into {} weeks",
        first_date,
        last_date,
        weeks.len()
    );
    Ok(weeks)
}
