use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{GlucoseError, Result};
use crate::report::latex::{self, SOURCE_EXTENSION};
use crate::report::typesetter::{ToolOutput, Typesetter};

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::{log_error, log_info};

/// The written report: source, embedded artifacts, and the typesetter result.
#[derive(Debug, Clone)]
pub struct Report {
    pub display_name: String,
    pub source_path: PathBuf,
    /// Artifacts that existed on disk, in document order.
    pub embedded: Vec<PathBuf>,
    pub document_path: Option<PathBuf>,
    pub tool_output: Option<ToolOutput>,
}

pub struct ReportAssembler<T: Typesetter> {
    typesetter: T,
}

impl<T: Typesetter> ReportAssembler<T> {
    pub fn new(typesetter: T) -> Self {
        Self { typesetter }
    }

    /// Writes `<report_name>.tex` and compiles it.
    ///
    /// A failing typesetter surfaces as `ExternalTool`; the source file is
    /// left in place for inspection.
    pub fn assemble<P: AsRef<Path>>(
        &self,
        artifact_paths: &[P],
        report_name: &Path,
        display_name: &str,
    ) -> Result<Report> {
        let mut report = write_source(artifact_paths, report_name, display_name)?;

        match self.typesetter.compile(&report.source_path) {
            Ok(output) => {
                let document = self.typesetter.document_path(&report.source_path);
                log_info!("Report written to {}", document.display());
                report.document_path = Some(document);
                report.tool_output = Some(output);
                Ok(report)
            }
            Err(err) => {
                log_error!(
                    "{} could not compile {}: {}",
                    self.typesetter.name(),
                    report.source_path.display(),
                    err
                );
                Err(err)
            }
        }
    }
}

/// Source path for `report_name`: the name with the source extension appended.
pub fn source_path(report_name: &Path) -> PathBuf {
    let mut name = report_name.as_os_str().to_owned();
    name.push(".");
    name.push(SOURCE_EXTENSION);
    PathBuf::from(name)
}

/// Writes the report source without compiling it. Paths that do not exist
/// are skipped.
pub fn write_source<P: AsRef<Path>>(
    artifact_paths: &[P],
    report_name: &Path,
    display_name: &str,
) -> Result<Report> {
    let embedded: Vec<PathBuf> = artifact_paths
        .iter()
        .map(|path| path.as_ref().to_path_buf())
        .filter(|path| path.exists())
        .collect();

    let skipped = artifact_paths.len() - embedded.len();
    if skipped > 0 {
        log_info!("Skipping {} missing artifacts", skipped);
    }

    let source_path = source_path(report_name);
    if let Some(parent) = source_path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| GlucoseError::io(parent, err))?;
    }
    fs::write(&source_path, latex::source(&embedded, display_name))
        .map_err(|err| GlucoseError::io(&source_path, err))?;
    log_info!(
        "Wrote {} with {} charts",
        source_path.display(),
        embedded.len()
    );

    Ok(Report {
        display_name: display_name.to_string(),
        source_path,
        embedded,
        document_path: None,
        tool_output: None,
    })
}
