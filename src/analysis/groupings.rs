//! Row grouping and data organization utilities.
//!
//! `group_rows` takes the flat list of `Row`s produced by the ingest layer
//! and organizes the successfully parsed values into per-key buckets, in the
//! order each key is first encountered. Every engine goes through this one
//! pass, and the only thing that differs between them is what happens to a
//! row that does not parse:
//!
//! - `RowPolicy::Abort` — the first bad row ends the call with
//!   `AnalysisError::MalformedRow` (distance engine).
//! - `RowPolicy::Skip` — the row is logged, recorded in `Grouped::skipped`,
//!   and contributes nothing (significance and ranking engines).
//!
//! Values for one row are stored together as a single `T`, so paired
//! observations (profit before / after) can never drift out of step.

use indexmap::IndexMap;
use tracing::warn;

use crate::ingest::Row;
use crate::model::{AnalysisError, SkipReason, SkippedRow};

// ---------------------------------------------------------------------------
// Grouping
// ---------------------------------------------------------------------------

/// What to do with a row whose parse function returns a `SkipReason`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowPolicy {
    Abort,
    Skip,
}

/// Parsed values bucketed by key, plus the rows that were left out.
#[derive(Debug, Clone, PartialEq)]
pub struct Grouped<T> {
    pub groups: IndexMap<String, Vec<T>>,
    pub skipped: Vec<SkippedRow>,
}

impl<T> Grouped<T> {
    fn new() -> Self {
        Grouped {
            groups: IndexMap::new(),
            skipped: Vec::new(),
        }
    }
}

/// Groups rows by the key returned from `parse`, preserving row order
/// within each group and first-encounter order across groups.
///
/// A group only comes into existence when one of its rows parses, so a key
/// whose rows were all skipped never appears in `groups`.
pub fn group_rows<T, F>(rows: &[Row], policy: RowPolicy, mut parse: F) -> Result<Grouped<T>, AnalysisError>
where
    F: FnMut(&Row) -> Result<(String, T), SkipReason>,
{
    if policy == RowPolicy::Skip {
        return Ok(group_rows_lenient(rows, parse));
    }

    let mut grouped = Grouped::new();
    for row in rows {
        let (key, value) = parse(row).map_err(|reason| AnalysisError::MalformedRow {
            line: row.line(),
            reason,
        })?;
        grouped.groups.entry(key).or_insert_with(Vec::new).push(value);
    }
    Ok(grouped)
}

/// `group_rows` under `RowPolicy::Skip`, which cannot fail.
pub fn group_rows_lenient<T, F>(rows: &[Row], mut parse: F) -> Grouped<T>
where
    F: FnMut(&Row) -> Result<(String, T), SkipReason>,
{
    let mut grouped = Grouped::new();
    for row in rows {
        match parse(row) {
            Ok((key, value)) => grouped.groups.entry(key).or_insert_with(Vec::new).push(value),
            Err(reason) => {
                warn!(line = row.line(), %reason, "skipping row");
                grouped.skipped.push(SkippedRow {
                    line: row.line(),
                    reason,
                });
            }
        }
    }
    grouped
}

/// Splits a bucket of pairs into two parallel vectors.
pub fn unzip_pairs<A: Copy, B: Copy>(pairs: &[(A, B)]) -> (Vec<A>, Vec<B>) {
    pairs.iter().copied().unzip()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
