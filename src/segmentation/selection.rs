//! Which weeks of a run get rendered.
//!
//! Every selection resolves to an ascending list of borrowed `Week`s; the
//! renderer then handles them one at a time.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{GlucoseError, Result};
use crate::models::Week;

/// Default look-back of the trailing selection (roughly three months).
pub const DEFAULT_TRAILING_WEEKS: u32 = 12;

/// Reference date for the trailing selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TrailingAnchor {
    /// Last measured day of the series; reruns on the same file agree.
    #[default]
    LatestData,
    /// Wall-clock date of the run.
    Today,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum WeekSelection {
    /// Highest-index week only.
    Last,
    All,
    /// Inclusive index range.
    Range { first: u32, last: u32 },
    /// Week containing `anchor - weeks` through the last week.
    Trailing { weeks: u32, anchor: TrailingAnchor },
}

impl Default for WeekSelection {
    fn default() -> Self {
        WeekSelection::Trailing {
            weeks: DEFAULT_TRAILING_WEEKS,
            anchor: TrailingAnchor::LatestData,
        }
    }
}

/// Lookup by index.
pub fn find_week(weeks: &[Week], index: u32) -> Result<&Week> {
    weeks
        .iter()
        .find(|week| week.index() == index)
        .ok_or(GlucoseError::UnknownWeek(index))
}

/// Resolves `selection` against the weeks of one run.
///
/// `latest_data` is the series' last measured day and `today` the wall-clock
/// date; which one is used depends on the trailing anchor.
pub fn select_weeks<'a>(
    weeks: &'a [Week],
    selection: &WeekSelection,
    latest_data: NaiveDate,
    today: NaiveDate,
) -> Result<Vec<&'a Week>> {
    match *selection {
        WeekSelection::Last => Ok(weeks.iter().max_by_key(|week| week.index()).into_iter().collect()),
        WeekSelection::All => Ok(weeks.iter().collect()),
        WeekSelection::Range { first, last } => {
            if first > last {
                return Err(GlucoseError::InvalidConfig(format!(
                    "week range {first}..{last} is reversed"
                )));
            }
            find_week(weeks, first)?;
            find_week(weeks, last)?;
            Ok(weeks
                .iter()
                .filter(|week| (first..=last).contains(&week.index()))
                .collect())
        }
        WeekSelection::Trailing {
            weeks: count,
            anchor,
        } => {
            let reference = match anchor {
                TrailingAnchor::LatestData => latest_data,
                TrailingAnchor::Today => today,
            };
            // A look-back past the earliest representable date starts before the data.
            let start = reference
                .checked_sub_days(Days::new(u64::from(count) * 7))
                .unwrap_or(NaiveDate::MIN);
            Ok(trailing_from(weeks, start))
        }
    }
}

fn trailing_from(weeks: &[Week], start: NaiveDate) -> Vec<&Week> {
    // Starting before the data means everything; after the last week means nothing.
    weeks
        .iter()
        .filter(|week| week.last_day() >= start)
        .collect()
}
