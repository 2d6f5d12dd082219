pub mod chart;
pub mod cli;
pub mod error;
pub mod ingest;
pub mod models;
pub mod report;
pub mod segmentation;
pub mod settings;
mod utils;

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::Parser;
use log::{info, warn};

use chart::{Artifact, ChartRenderer};
use cli::Args;
use error::{GlucoseError, Result};
use ingest::{RawTable, SeriesCleaner};
use models::{Series, Week};
use report::{PdfLatex, Report, ReportAssembler, Typesetter};
use segmentation::{segment_series, select_weeks, SegmentationConfig};
use settings::ReportSettings;

/// Everything one run produced.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub series_len: usize,
    /// All weeks of the series, not only the selected ones.
    pub weeks: Vec<Week>,
    /// One entry per selected week, in ascending index order.
    pub artifacts: Vec<Artifact>,
    pub report: Report,
}

/// Reads and cleans the export named in `settings`.
pub fn load_series(settings: &ReportSettings) -> Result<Series> {
    let table = RawTable::from_csv_path(&settings.csv_path, settings.header_row)?;
    let series = SeriesCleaner::new(&settings.date_column, &settings.value_column)
        .with_date_format(&settings.date_format)
        .clean(&table)?;

    if series.is_empty() {
        return Err(GlucoseError::EmptySeries(settings.csv_path.clone()));
    }
    Ok(series)
}

/// Ingest, segment, render the selected weeks, and assemble the report.
///
/// `today` only matters for a trailing selection anchored to the wall clock.
pub fn generate_report<T: Typesetter>(
    settings: &ReportSettings,
    today: NaiveDate,
    typesetter: T,
) -> Result<RunSummary> {
    let series = load_series(settings)?;

    let config = SegmentationConfig {
        days_per_segment: settings.days_per_segment,
    };
    let weeks = segment_series(&series, &config)?;
    let latest_data = series
        .date_range()
        .map(|(_, last)| last)
        .ok_or_else(|| GlucoseError::EmptySeries(settings.csv_path.clone()))?;
    let selected = select_weeks(&weeks, &settings.selection, latest_data, today)?;
    info!(
        "Rendering {} of {} weeks ({:?})",
        selected.len(),
        weeks.len(),
        settings.selection
    );

    report::latex::check_input_path(&settings.figures_dir)?;
    let renderer = ChartRenderer::new(&settings.figures_dir);
    renderer.prepare_output_dir()?;
    let artifacts = renderer.render_weeks(&series, selected)?;

    let paths: Vec<&std::path::Path> = artifacts
        .iter()
        .filter_map(|artifact| artifact.path.as_deref())
        .collect();
    let report = if settings.compile {
        ReportAssembler::new(typesetter).assemble(
            &paths,
            &settings.report_name,
            &settings.display_name,
        )?
    } else {
        report::write_source(&paths, &settings.report_name, &settings.display_name)?
    };

    Ok(RunSummary {
        series_len: series.len(),
        weeks,
        artifacts,
        report,
    })
}

pub fn run() -> anyhow::Result<()> {
    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();
    let settings = match &args.config {
        Some(path) => ReportSettings::load(path)?,
        None => ReportSettings::default(),
    };
    let settings = args.apply(settings);

    info!("glucoweek reading {}", settings.csv_path.display());

    let typesetter = PdfLatex::new(&settings.typesetter);
    let summary = match generate_report(&settings, Local::now().date_naive(), typesetter) {
        Ok(summary) => summary,
        Err(err) => {
            if err.is_fatal_for_ingest() {
                warn!(
                    "Export rejected before any output was written; check --date-column ({}) and --value-column ({})",
                    settings.date_column, settings.value_column
                );
            }
            return Err(err).with_context(|| {
                format!("failed to build report from {}", settings.csv_path.display())
            });
        }
    };

    info!(
        "Done: {} measurements, {} charts, source {}",
        summary.series_len,
        summary.report.embedded.len(),
        summary.report.source_path.display()
    );
    Ok(())
}
