use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{GlucoseError, Result};

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::log_info;

pub const DEFAULT_TYPESETTER: &str = "pdflatex";

/// Output of a successful typesetter run
#[derive(Debug, Clone, PartialEq)]
pub struct ToolOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

/// Compiles a document source into the final document.
pub trait Typesetter {
    fn name(&self) -> &str;

    /// Path of the document produced for `source`.
    fn document_path(&self, source: &Path) -> PathBuf;

    fn compile(&self, source: &Path) -> Result<ToolOutput>;
}

/// Runs `pdflatex` (or a compatible executable) as a subprocess.
#[derive(Debug, Clone)]
pub struct PdfLatex {
    program: String,
}

impl Default for PdfLatex {
    fn default() -> Self {
        Self::new(DEFAULT_TYPESETTER)
    }
}

impl PdfLatex {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn command(&self, source: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("-interaction=nonstopmode");
        if let Some(dir) = source.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            cmd.arg(format!("-output-directory={}", dir.display()));
        }
        cmd.arg(source);
        cmd
    }
}

impl Typesetter for PdfLatex {
    fn name(&self) -> &str {
        &self.program
    }

    fn document_path(&self, source: &Path) -> PathBuf {
        source.with_extension("pdf")
    }

    fn compile(&self, source: &Path) -> Result<ToolOutput> {
        log_info!("Running {} on {}", self.program, source.display());

        let output = self
            .command(source)
            .output()
            .map_err(|err| GlucoseError::ExternalTool {
                tool: self.program.clone(),
                code: None,
                output: format!("failed to start: {err}"),
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if !output.status.success() {
            // pdflatex reports errors on stdout; fall back to it when stderr is empty
            let detail = if stderr.trim().is_empty() {
                tail(&stdout, 20)
            } else {
                stderr
            };
            return Err(GlucoseError::ExternalTool {
                tool: self.program.clone(),
                code: output.status.code(),
                output: detail,
            });
        }

        Ok(ToolOutput {
            stdout,
            stderr,
            exit_code: output.status.code().unwrap_or(0),
        })
    }
}

fn tail(text: &str, lines: usize) -> String {
    let all: Vec<&str> = text.lines().collect();
    let start = all.len().saturating_sub(lines);
    all[start..].join("\n")
}
