use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::chart::plot::WeekChart;
use crate::error::{GlucoseError, Result};

/// Something that can turn a `WeekChart` into a file.
pub trait ChartBackend {
    /// File extension of the produced artifacts, without the dot.
    fn extension(&self) -> &str;

    fn draw(&self, chart: &WeekChart, path: &Path) -> Result<()>;
}

/// Writes a pgfplots `tikzpicture` that the report `\input`s directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct PgfPlotsBackend;

impl PgfPlotsBackend {
    pub fn source(&self, chart: &WeekChart) -> String {
        let mut out = String::new();
        let ticks = (0..chart.tick_labels.len())
            .map(|tick| tick.to_string())
            .collect::<Vec<_>>()
            .join(",");

        // Writing into a String cannot fail.
        let _ = writeln!(out, "\\begin{{tikzpicture}}");
        let _ = writeln!(out, "\\begin{{axis}}[");
        let _ = writeln!(out, "  width={}cm, height={}cm,", chart.width_cm, chart.height_cm);
        let _ = writeln!(out, "  xmin=0, xmax={},", chart.x_max);
        let _ = writeln!(out, "  ymin={}, ymax={},", chart.y_range.0, chart.y_range.1);
        let _ = writeln!(out, "  xtick={{{ticks}}},");
        let _ = writeln!(out, "  xticklabels={{{}}},", chart.tick_labels.join(","));
        let _ = writeln!(out, "  ylabel={{{}}},", chart.y_label);
        let _ = writeln!(out, "  title={{{}}},", chart.title);
        let _ = writeln!(out, "  grid=major,");
        let _ = writeln!(out, "]");
        let _ = writeln!(
            out,
            "\\fill[{}] (axis cs:0,{}) rectangle (axis cs:{},{});",
            chart.band_color, chart.band.0, chart.x_max, chart.band.1
        );
        let _ = writeln!(out, "\\addplot[blue, mark=none] coordinates {{");
        for (x, y) in &chart.points {
            let _ = writeln!(out, "  ({x:.5},{y})");
        }
        let _ = writeln!(out, "}};");
        let _ = writeln!(out, "\\end{{axis}}");
        let _ = writeln!(out, "\\end{{tikzpicture}}");
        out
    }
}

impl ChartBackend for PgfPlotsBackend {
    fn extension(&self) -> &str {
        "pgf"
    }

    fn draw(&self, chart: &WeekChart, path: &Path) -> Result<()> {
        fs::write(path, self.source(chart)).map_err(|err| GlucoseError::io(path, err))
    }
}
