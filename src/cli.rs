use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::segmentation::selection::DEFAULT_TRAILING_WEEKS;
use crate::segmentation::{TrailingAnchor, WeekSelection};
use crate::settings::ReportSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SelectArg {
    Last,
    All,
    Range,
    Trailing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AnchorArg {
    Data,
    Today,
}

impl From<AnchorArg> for TrailingAnchor {
    fn from(anchor: AnchorArg) -> Self {
        match anchor {
            AnchorArg::Data => TrailingAnchor::LatestData,
            AnchorArg::Today => TrailingAnchor::Today,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "glucoweek")]
#[command(about = "Render weekly glucose charts from a CGM export and bundle them into a PDF report")]
pub struct Args {
    /// CSV export to read
    pub csv: Option<PathBuf>,

    /// JSON settings file; command-line flags take precedence
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Name of the timestamp column
    #[arg(long)]
    pub date_column: Option<String>,

    /// Name of the glucose column (mmol/L, decimal comma)
    #[arg(long)]
    pub value_column: Option<String>,

    /// Directory for the chart files
    #[arg(long)]
    pub figures_dir: Option<PathBuf>,

    /// Report path without extension
    #[arg(short, long)]
    pub report: Option<PathBuf>,

    /// Name shown in the page header
    #[arg(short, long)]
    pub name: Option<String>,

    /// Which weeks to render
    #[arg(long, value_enum)]
    pub select: Option<SelectArg>,

    /// First week index for `--select range`
    #[arg(long, default_value = "1")]
    pub from: u32,

    /// Last week index for `--select range` (defaults to `--from`)
    #[arg(long)]
    pub to: Option<u32>,

    /// Look-back for `--select trailing`
    #[arg(long, default_value_t = DEFAULT_TRAILING_WEEKS)]
    pub trailing_weeks: u32,

    /// Reference date for `--select trailing`
    #[arg(long, value_enum, default_value = "data")]
    pub anchor: AnchorArg,

    /// Only write the .tex source
    #[arg(long)]
    pub no_compile: bool,

    /// Typesetter executable
    #[arg(long)]
    pub typesetter: Option<String>,
}

impl Args {
    pub fn selection(&self) -> Option<WeekSelection> {
        self.select.map(|select| match select {
            SelectArg::Last => WeekSelection::Last,
            SelectArg::All => WeekSelection::All,
            SelectArg::Range => WeekSelection::Range {
                first: self.from,
                last: self.to.unwrap_or(self.from),
            },
            SelectArg::Trailing => WeekSelection::Trailing {
                weeks: self.trailing_weeks,
                anchor: self.anchor.into(),
            },
        })
    }

    /// Applies the flags that were given on top of `settings`.
    pub fn apply(&self, mut settings: ReportSettings) -> ReportSettings {
        if let Some(csv) = &self.csv {
            settings.csv_path = csv.clone();
        }
        if let Some(column) = &self.date_column {
            settings.date_column = column.clone();
        }
        if let Some(column) = &self.value_column {
            settings.value_column = column.clone();
        }
        if let Some(dir) = &self.figures_dir {
            settings.figures_dir = dir.clone();
        }
        if let Some(report) = &self.report {
            settings.report_name = report.clone();
        }
        if let Some(name) = &self.name {
            settings.display_name = name.clone();
        }
        if let Some(selection) = self.selection() {
            settings.selection = selection;
        }
        if self.no_compile {
            settings.compile = false;
        }
        if let Some(typesetter) = &self.typesetter {
            settings.typesetter = typesetter.clone();
        }
        settings
    }
}
