//! Group distance engine.
//!
//! Treats each group's employee counts and median salaries as two points in
//! an n-dimensional space (one coordinate per row, in row order) and reports
//! their Minkowski distance of order `p`:
//!
//! ```text
//! d(x1, x2) = (Σ |x1[i] - x2[i]|^p)^(1/p)
//! ```
//!
//! This is a whole-vector distance, not an average of per-row distances.
//! Unlike the other engines, a row that fails to parse aborts the call.

use tracing::debug;

use crate::analysis::groupings::{group_rows, unzip_pairs, RowPolicy};
use crate::analysis::rounding::round_score;
use crate::ingest::Table;
use crate::config::ColumnNames;
use crate::model::{AnalysisError, GroupScores};

/// Minkowski distance of order `p` between two equal-length vectors.
///
/// # Errors
/// - `DimensionMismatch` when the lengths differ
/// - `EmptyInput` when both are empty
/// - `InvalidExponent` when `p` is not a positive finite number
/// - `NonFiniteResult` when a NaN or infinite coordinate (or overflow)
///   leaves no finite distance
pub fn point_distance(x1: &[f64], x2: &[f64], p: f64) -> Result<f64, AnalysisError> {
    if x1.len() != x2.len() {
        return Err(AnalysisError::DimensionMismatch {
            left: x1.len(),
            right: x2.len(),
        });
    }
    if x1.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }
    if !p.is_finite() || p <= 0.0 {
        return Err(AnalysisError::InvalidExponent(p));
    }

    let sum: f64 = x1
        .iter()
        .zip(x2)
        .map(|(a, b)| (a - b).abs().powf(p))
        .sum();

    let distance = sum.powf(1.0 / p);
    if !distance.is_finite() {
        return Err(AnalysisError::NonFiniteResult);
    }
    Ok(distance)
}

/// Per-group distance between employee count and median salary, rounded to
/// four decimals.
///
/// Only the group, employee and salary columns have to be present.
/// Employee counts must parse as integers and salaries as floats in every
/// row; the first failure is returned as `AnalysisError::MalformedRow`.
pub fn group_distances(table: &Table, columns: &ColumnNames, p: f64) -> Result<GroupScores, AnalysisError> {
    let group_col = table.column_index(&columns.group)?;
    let employees_col = table.column_index(&columns.employees)?;
    let salary_col = table.column_index(&columns.median_salary)?;

    let grouped = group_rows(table.rows(), RowPolicy::Abort, |row| {
        let group = row.field(group_col, &columns.group)?.to_string();
        let employees = row.parse_int(employees_col, &columns.employees)?;
        let salary = row.parse_float(salary_col, &columns.median_salary)?;
        Ok((group, (employees as f64, salary)))
    })?;

    let mut distances = GroupScores::with_capacity(grouped.groups.len());
    for (group, points) in grouped.groups {
        let (employees, salaries) = unzip_pairs(&points);
        let distance = point_distance(&employees, &salaries, p)?;
        distances.insert(group, round_score(distance));
    }

    debug!(groups = distances.len(), p, "computed group distances");
    Ok(distances)
}
