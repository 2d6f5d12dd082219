use std::fs;
use std::path::PathBuf;

use serde::Serialize;

use crate::chart::config::ChartConfig;
use crate::chart::pgf::{ChartBackend, PgfPlotsBackend};
use crate::chart::plot::WeekChart;
use crate::error::{GlucoseError, Result};
use crate::models::{Series, Week};

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::log_info;

pub const DEFAULT_FIGURES_DIR: &str = "figures";

/// Result of rendering one week. `path` is `None` when the week had no data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub week: Week,
    pub path: Option<PathBuf>,
}

impl Artifact {
    pub fn is_rendered(&self) -> bool {
        self.path.is_some()
    }
}

/// Renders one chart per week into `output_dir`.
pub struct ChartRenderer<B: ChartBackend = PgfPlotsBackend> {
    output_dir: PathBuf,
    config: ChartConfig,
    backend: B,
}

impl ChartRenderer<PgfPlotsBackend> {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self::with_backend(output_dir, PgfPlotsBackend)
    }
}

impl<B: ChartBackend> ChartRenderer<B> {
    pub fn with_backend(output_dir: impl Into<PathBuf>, backend: B) -> Self {
        Self {
            output_dir: output_dir.into(),
            config: ChartConfig::default(),
            backend,
        }
    }

    /// Creates the output directory. Must run before the first `render`.
    pub fn prepare_output_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.output_dir).map_err(|err| GlucoseError::io(&self.output_dir, err))
    }

    /// Deterministic artifact path: `<output_dir>/Week<index>-<span>.<ext>`.
    pub fn artifact_path(&self, week: &Week) -> PathBuf {
        self.output_dir.join(format!(
            "Week{}-{}.{}",
            week.index(),
            week.file_label(),
            self.backend.extension()
        ))
    }

    /// Renders `week` from `series`. An empty week writes nothing.
    pub fn render(&self, series: &Series, week: &Week) -> Result<Artifact> {
        let selection = series.within(week);
        if selection.is_empty() {
            log_info!("No data in week {}, skipping chart", week);
            return Ok(Artifact {
                week: *week,
                path: None,
            });
        }

        let chart = WeekChart::build(week, selection, &self.config);
        let path = self.artifact_path(week);
        self.backend.draw(&chart, &path)?;
        log_info!(
            "Rendered week {} ({} points) to {}",
            week,
            selection.len(),
            path.display()
        );

        Ok(Artifact {
            week: *week,
            path: Some(path),
        })
    }

    /// Renders each week in the given order.
    pub fn render_weeks<'a>(
        &self,
        series: &Series,
        weeks: impl IntoIterator<Item = &'a Week>,
    ) -> Result<Vec<Artifact>> {
        weeks
            .into_iter()
            .map(|week| self.render(series, week))
            .collect()
    }
}
