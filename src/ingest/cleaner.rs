use chrono::NaiveDateTime;

use crate::error::{GlucoseError, Result};
use crate::models::{Measurement, Series};

use super::table::RawTable;

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::{log_info, log_warn};

/// Timestamp column of the LibreView (German locale) export.
pub const DEFAULT_DATE_COLUMN: &str = "Gerätezeitstempel";
/// Historic glucose column of the LibreView (German locale) export.
pub const DEFAULT_VALUE_COLUMN: &str = "Glukosewert-Verlauf mmol/L";
pub const DEFAULT_DATE_FORMAT: &str = "%m-%d-%Y %H:%M";

/// Turns a raw export table into a sorted, fully populated series.
#[derive(Debug, Clone)]
pub struct SeriesCleaner {
    date_column: String,
    value_column: String,
    date_format: String,
}

impl Default for SeriesCleaner {
    fn default() -> Self {
        Self::new(DEFAULT_DATE_COLUMN, DEFAULT_VALUE_COLUMN)
    }
}

impl SeriesCleaner {
    pub fn new(date_column: impl Into<String>, value_column: impl Into<String>) -> Self {
        Self {
            date_column: date_column.into(),
            value_column: value_column.into(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }

    pub fn with_date_format(mut self, date_format: impl Into<String>) -> Self {
        self.date_format = date_format.into();
        self
    }

    pub fn clean(&self, table: &RawTable) -> Result<Series> {
        let date_idx = self.require_column(table, &self.date_column)?;
        let value_idx = self.require_column(table, &self.value_column)?;

        let mut measurements = Vec::with_capacity(table.rows().len());
        let mut dropped = 0usize;

        for row in table.rows() {
            // Rows missing either field are dropped before any conversion.
            let (Some(raw_date), Some(raw_value)) = (row.cell(date_idx), row.cell(value_idx))
            else {
                dropped += 1;
                continue;
            };

            let timestamp = NaiveDateTime::parse_from_str(raw_date, &self.date_format)
                .map_err(|err| GlucoseError::Parse {
                    line: row.line,
                    column: self.date_column.clone(),
                    value: raw_date.to_string(),
                    reason: format!("expected format '{}' ({err})", self.date_format),
                })?;

            let glucose = parse_decimal_comma(raw_value).map_err(|reason| GlucoseError::Parse {
                line: row.line,
                column: self.value_column.clone(),
                value: raw_value.to_string(),
                reason,
            })?;

            measurements.push(Measurement {
                timestamp,
                glucose,
                line: row.line,
            });
        }

        if dropped > 0 {
            log_warn!(
                "Dropped {} of {} rows without '{}' or '{}'",
                dropped,
                table.rows().len(),
                self.date_column,
                self.value_column
            );
        }

        let series = Series::from_measurements(measurements);
        log_info!(
            "Cleaned {} measurements from {}",
            series.len(),
            table.source().display()
        );
        Ok(series)
    }

    fn require_column(&self, table: &RawTable, column: &str) -> Result<usize> {
        table
            .column_index(column)
            .ok_or_else(|| GlucoseError::Schema {
                column: column.to_string(),
                path: table.source().to_path_buf(),
            })
    }
}

/// Parses `"7,4"` (or `"7.4"`) as 7.4. Rejects anything that is not a
/// finite, non-negative decimal.
pub fn parse_decimal_comma(text: &str) -> std::result::Result<f64, String> {
    let trimmed = text.trim();
    if trimmed.matches(',').count() + trimmed.matches('.').count() > 1 {
        return Err("more than one decimal separator".to_string());
    }

    let normalized = trimmed.replace(',', ".");
    let is_decimal = !normalized.is_empty()
        && normalized.chars().all(|c| c.is_ascii_digit() || c == '.')
        && normalized.chars().any(|c| c.is_ascii_digit());
    if !is_decimal {
        return Err("not a decimal number".to_string());
    }

    normalized
        .parse::<f64>()
        .map_err(|err| err.to_string())
        .and_then(|value| {
            if value.is_finite() {
                Ok(value)
            } else {
                Err("value out of range".to_string())
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(body: &str) -> RawTable {
        let text = format!(
            "Glukosewerte,Erstellt am\nGerät,{DEFAULT_DATE_COLUMN},{DEFAULT_VALUE_COLUMN}\n{body}"
        );
        RawTable::from_reader(text.as_bytes(), "export.csv", 1).unwrap()
    }

    #[test]
    fn test_decimal_comma() {
        assert_eq!(parse_decimal_comma("7,4"), Ok(7.4));
        assert_eq!(parse_decimal_comma("12,0"), Ok(12.0));
        assert_eq!(parse_decimal_comma("5.6"), Ok(5.6));
        assert_eq!(parse_decimal_comma("9"), Ok(9.0));
    }

    #[test]
    fn test_decimal_rejects_garbage() {
        assert!(parse_decimal_comma("abc").is_err());
        assert!(parse_decimal_comma("1,2,3").is_err());
        assert!(parse_decimal_comma("1.234,5").is_err());
        assert!(parse_decimal_comma("-3,2").is_err());
        assert!(parse_decimal_comma("NaN").is_err());
        assert!(parse_decimal_comma(",").is_err());
    }

    #[test]
    fn test_clean_sorts_and_drops_incomplete_rows() {
        let raw = table(
            "A,07-25-2023 08:00,\"6,1\"\n\
             A,,\"5,0\"\n\
             A,07-24-2023 22:30,\"7,4\"\n\
             A,07-24-2023 23:00,\n",
        );
        let series = SeriesCleaner::default().clean(&raw).unwrap();

        assert!(series.len() <= raw.rows().len());
        assert_eq!(series.len(), 2);
        let values: Vec<f64> = series.measurements().iter().map(|m| m.glucose).collect();
        assert_eq!(values, vec![7.4, 6.1]);
        assert_eq!(series.measurements()[0].line, 5);
    }

    #[test]
    fn test_missing_value_column_is_schema_error() {
        let raw = table("A,07-25-2023 08:00,\"6,1\"\n");
        let err = SeriesCleaner::new(DEFAULT_DATE_COLUMN, "Glukose-Scan mmol/L")
            .clean(&raw)
            .unwrap_err();
        match err {
            GlucoseError::Schema { column, .. } => assert_eq!(column, "Glukose-Scan mmol/L"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_bad_timestamp_is_parse_error() {
        let raw = table("A,2023-07-25T08:00,\"6,1\"\n");
        let err = SeriesCleaner::default().clean(&raw).unwrap_err();
        match err {
            GlucoseError::Parse { line, column, .. } => {
                assert_eq!(line, 3);
                assert_eq!(column, DEFAULT_DATE_COLUMN);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_bad_value_is_parse_error() {
        let raw = table("A,07-25-2023 08:00,hoch\n");
        let err = SeriesCleaner::default().clean(&raw).unwrap_err();
        assert!(matches!(err, GlucoseError::Parse { ref column, .. } if column == DEFAULT_VALUE_COLUMN));
    }

    #[test]
    fn test_custom_date_format() {
        let raw = table("A,25.07.2023 08:00,\"6,1\"\n");
        let series = SeriesCleaner::default()
            .with_date_format("%d.%m.%Y %H:%M")
            .clean(&raw)
            .unwrap();
        assert_eq!(series.len(), 1);
    }
}
