//! LaTeX source for the report document.

use std::path::Path;

use crate::error::{GlucoseError, Result};

pub const REPORT_TITLE: &str = "Glukose-Werte";
pub const SOURCE_EXTENSION: &str = "tex";

/// Escapes characters that are special in LaTeX text mode.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\textbackslash{}"),
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                out.push('\\');
                out.push(c);
            }
            '~' => out.push_str("\\textasciitilde{}"),
            '^' => out.push_str("\\textasciicircum{}"),
            _ => out.push(c),
        }
    }
    out
}

/// Characters that end or corrupt the argument of `\input{..}`.
const INPUT_PATH_FORBIDDEN: &[char] = &['%', '#', '{', '}', '\\', '~', '^', '$', '&'];

/// Chart paths are embedded verbatim, so a directory that cannot appear
/// inside `\input{..}` is rejected before anything is rendered.
pub fn check_input_path(path: &Path) -> Result<()> {
    let text = path.to_string_lossy();
    match text
        .chars()
        .find(|c| c.is_whitespace() || INPUT_PATH_FORBIDDEN.contains(c))
    {
        Some(c) => Err(GlucoseError::InvalidConfig(format!(
            "'{text}' cannot be used in \\input{{}}: contains {c:?}"
        ))),
        None => Ok(()),
    }
}

pub fn preamble(display_name: &str) -> Vec<String> {
    vec![
        "\\documentclass[DIV=15]{scrreprt}".to_string(),
        "\\usepackage[T1]{fontenc}".to_string(),
        "\\usepackage[utf8]{inputenc}".to_string(),
        "\\usepackage[ngerman]{babel}".to_string(),
        "\\usepackage{txfonts}%".to_string(),
        "\\usepackage{pgfplots}".to_string(),
        "\\usepackage{scrlayer-scrpage}".to_string(),
        format!("\\ihead{{{}}}", escape(display_name)),
        format!("\\ohead{{{REPORT_TITLE}}}"),
    ]
}

/// Document body with one centered `\input` block per artifact.
pub fn document<P: AsRef<Path>>(artifacts: &[P]) -> Vec<String> {
    let mut lines = vec!["\\begin{document}".to_string(), String::new()];
    for path in artifacts {
        lines.push("\\begin{center}".to_string());
        lines.push(format!("\t\\input{{{}}}", path.as_ref().display()));
        lines.push("\\end{center}".to_string());
        lines.push(String::new());
    }
    lines.push("\\end{document}".to_string());
    lines
}

pub fn source<P: AsRef<Path>>(artifacts: &[P], display_name: &str) -> String {
    let mut lines = preamble(display_name);
    lines.extend(document(artifacts));
    lines.join("\n")
}
