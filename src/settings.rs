use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};

use crate::chart::DEFAULT_FIGURES_DIR;
use crate::ingest::{DEFAULT_DATE_COLUMN, DEFAULT_DATE_FORMAT, DEFAULT_HEADER_ROW, DEFAULT_VALUE_COLUMN};
use crate::models::DAYS_PER_WEEK;
use crate::report::DEFAULT_TYPESETTER;
use crate::segmentation::WeekSelection;

pub const DEFAULT_CSV_PATH: &str = "./data/glucose.csv";
pub const DEFAULT_REPORT_NAME: &str = "glucose-report";
pub const DEFAULT_DISPLAY_NAME: &str = "Glukose-Tagebuch";

/// Everything one run needs. Every field has a default, so a settings file
/// only lists what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReportSettings {
    pub csv_path: PathBuf,
    pub date_column: String,
    pub value_column: String,
    pub date_format: String,
    /// 0-based line holding the column names.
    pub header_row: usize,
    pub figures_dir: PathBuf,
    /// Report path without extension.
    pub report_name: PathBuf,
    pub display_name: String,
    pub selection: WeekSelection,
    pub days_per_segment: u32,
    pub compile: bool,
    pub typesetter: String,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from(DEFAULT_CSV_PATH),
            date_column: DEFAULT_DATE_COLUMN.into(),
            value_column: DEFAULT_VALUE_COLUMN.into(),
            date_format: DEFAULT_DATE_FORMAT.into(),
            header_row: DEFAULT_HEADER_ROW,
            figures_dir: PathBuf::from(DEFAULT_FIGURES_DIR),
            report_name: PathBuf::from(DEFAULT_REPORT_NAME),
            display_name: DEFAULT_DISPLAY_NAME.into(),
            selection: WeekSelection::default(),
            days_per_segment: DAYS_PER_WEEK,
            compile: true,
            typesetter: DEFAULT_TYPESETTER.into(),
        }
    }
}

impl ReportSettings {
    /// Reads settings from `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse settings in {}", path.display()))
    }

    pub fn persist(&self, path: &Path) -> Result<()> {
        let serialized = serde_json::to_string_pretty(self)?;
        fs::write(path, serialized)
            .with_context(|| format!("Failed to write settings to {}", path.display()))
    }
}
