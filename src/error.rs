//! Error types for the report pipeline
//!
//! Errors are classified by where they stop the run:
//! - Ingest: schema and parse problems abort before any week is segmented
//! - Rendering/report: I/O and typesetter failures abort after ingest
//!
//! An empty week is not an error; the renderer logs it and moves on.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GlucoseError {
    #[error("Column '{column}' is not present in {}", .path.display())]
    Schema { column: String, path: PathBuf },

    #[error("Line {line}: cannot parse {column} value '{value}': {reason}")]
    Parse {
        line: u64,
        column: String,
        value: String,
        reason: String,
    },

    #[error("No measurements left in {} after cleaning", .0.display())]
    EmptySeries(PathBuf),

    #[error("Week {0} does not exist in this run")]
    UnknownWeek(u32),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("{tool} failed{}: {output}", .code.map(|c| format!(" with exit code {c}")).unwrap_or_default())]
    ExternalTool {
        tool: String,
        code: Option<i32>,
        output: String,
    },

    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl GlucoseError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GlucoseError::Io {
            path: path.into(),
            source,
        }
    }

    /// True for errors raised while reading and cleaning the export.
    pub fn is_fatal_for_ingest(&self) -> bool {
        matches!(
            self,
            GlucoseError::Schema { .. }
                | GlucoseError::Parse { .. }
                | GlucoseError::EmptySeries(_)
                | GlucoseError::Csv(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, GlucoseError>;
