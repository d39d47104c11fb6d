//! Delimited table loader.
//!
//! Splits comma-delimited text into a header and an ordered list of rows of
//! raw string cells. No values are interpreted here; engines pull typed
//! values out through `Row::parse_int` / `Row::parse_float`, which report a
//! `SkipReason` instead of failing, so each engine decides its own policy.
//!
//! Two lookup paths exist on purpose:
//!   - name-keyed: `Table::column_index` maps a configured header name to its
//!     position, once per call, for just the columns an engine reads
//!     (distance / significance engines)
//!   - positional: fixed indices from `CategoryLayout` (ranking engine)

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use thiserror::Error;

use crate::model::{AnalysisError, SkipReason};

/// Table loading error
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed delimited input: {0}")]
    Csv(#[from] csv::Error),
    #[error("input has no header row")]
    MissingHeader,
}

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

/// One data row: raw cells plus the source line it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    line: usize,
    cells: Vec<String>,
}

impl Row {
    pub fn new(line: usize, cells: Vec<String>) -> Self {
        Row { line, cells }
    }

    /// 1-based source line (the header is line 1).
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    /// Raw cell at `index`, verbatim.
    pub fn field(&self, index: usize, column: &str) -> Result<&str, SkipReason> {
        self.cells
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| SkipReason::MissingField {
                column: column.to_string(),
                index,
            })
    }

    pub fn parse_int(&self, index: usize, column: &str) -> Result<i64, SkipReason> {
        let raw = self.field(index, column)?;
        raw.trim().parse::<i64>().map_err(|_| malformed(column, raw))
    }

    pub fn parse_float(&self, index: usize, column: &str) -> Result<f64, SkipReason> {
        let raw = self.field(index, column)?;
        raw.trim().parse::<f64>().map_err(|_| malformed(column, raw))
    }
}

fn malformed(column: &str, raw: &str) -> SkipReason {
    SkipReason::MalformedNumber {
        column: column.to_string(),
        value: raw.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

/// Parsed header plus data rows, in file order.
#[derive(Debug, Clone)]
pub struct Table {
    header: Vec<String>,
    rows: Vec<Row>,
    index: HashMap<String, usize>,
}

impl Table {
    /// Builds a table from an already split header and rows.
    pub fn new(header: Vec<String>, rows: Vec<Row>) -> Self {
        // First occurrence wins for duplicated header names.
        let mut index = HashMap::new();
        for (idx, name) in header.iter().enumerate() {
            index.entry(name.clone()).or_insert(idx);
        }
        Table { header, rows, index }
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LoadError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut records = csv_reader.records();
        let header: Vec<String> = match records.next() {
            Some(record) => record?.iter().map(str::to_string).collect(),
            None => return Err(LoadError::MissingHeader),
        };

        let mut rows = Vec::new();
        for (offset, record) in records.enumerate() {
            let record = record?;
            let line = record
                .position()
                .map(|pos| pos.line() as usize)
                .unwrap_or(offset + 2);
            rows.push(Row::new(line, record.iter().map(str::to_string).collect()));
        }

        Ok(Table::new(header, rows))
    }

    pub fn from_csv_str(text: &str) -> Result<Self, LoadError> {
        Table::from_reader(text.as_bytes())
    }

    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let file = File::open(path)?;
        Table::from_reader(file)
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a header name, exact and case-sensitive.
    pub fn column_index(&self, name: &str) -> Result<usize, AnalysisError> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| AnalysisError::MissingColumn(name.to_string()))
    }
}
