use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::{GlucoseError, Result};

/// Line index of the header in device exports; line 0 carries export metadata.
pub const DEFAULT_HEADER_ROW: usize = 1;

#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    /// 1-based line in the source file.
    pub line: u64,
    pub fields: Vec<String>,
}

impl RawRow {
    /// Cell at `index`, `None` when the row is too short or the cell is blank.
    pub fn cell(&self, index: usize) -> Option<&str> {
        self.fields
            .get(index)
            .map(|field| field.trim())
            .filter(|field| !field.is_empty())
    }
}

/// Header plus untyped rows, exactly as tokenized from the export.
#[derive(Debug, Clone)]
pub struct RawTable {
    source: PathBuf,
    headers: Vec<String>,
    rows: Vec<RawRow>,
}

impl RawTable {
    pub fn from_csv_path(path: &Path, header_row: usize) -> Result<Self> {
        let file = File::open(path).map_err(|err| GlucoseError::io(path, err))?;
        Self::from_reader(file, path, header_row)
    }

    /// Records before `header_row` are skipped; rows may be ragged.
    pub fn from_reader<R: Read>(
        reader: R,
        source: impl Into<PathBuf>,
        header_row: usize,
    ) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut headers = Vec::new();
        let mut rows = Vec::new();

        for (position, record) in reader.records().enumerate() {
            let record = record?;
            if position < header_row {
                continue;
            }

            let fields: Vec<String> = record.iter().map(str::to_string).collect();
            if position == header_row {
                headers = fields;
                continue;
            }

            let line = record
                .position()
                .map(|pos| pos.line())
                .unwrap_or(position as u64 + 1);
            rows.push(RawRow { line, fields });
        }

        Ok(Self {
            source: source.into(),
            headers,
            rows,
        })
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[RawRow] {
        &self.rows
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }
}
