//! Group significance engine.
//!
//! For each group, compares profit in the earlier period against profit in
//! the later period with Welch's unequal-variance t-statistic:
//!
//! ```text
//! t = (mean_a - mean_b) / sqrt(var_a / n_a + var_b / n_b)
//! ```
//!
//! where each variance uses the `n - 1` denominator. Rows whose profit cells
//! do not parse are skipped (both periods together), so the two samples of a
//! group always come from the same rows.
//!
//! Groups that cannot produce a finite statistic are left out of the scores:
//! fewer than two usable rows, zero variance in both periods, or a NaN/inf
//! cell (`"nan"` and `"inf"` parse as floats) poisoning the arithmetic.

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::analysis::groupings::{group_rows, unzip_pairs, RowPolicy};
use crate::analysis::rounding::round_score;
use crate::config::ColumnNames;
use crate::ingest::Table;
use crate::model::{AnalysisError, GroupScores, SkippedRow};

/// Mean and unbiased variance of one sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleSummary {
    pub n: usize,
    pub mean: f64,
    pub variance: f64,
}

impl SampleSummary {
    /// Summarizes `values`, requiring at least two observations.
    pub fn from_values(values: &[f64]) -> Result<Self, AnalysisError> {
        let n = values.len();
        if n < 2 {
            return Err(AnalysisError::InsufficientSample { n });
        }
        let mean = values.iter().sum::<f64>() / n as f64;
        let squares: f64 = values.iter().map(|x| (x - mean).powi(2)).sum();
        Ok(SampleSummary {
            n,
            mean,
            variance: squares / (n - 1) as f64,
        })
    }

    pub fn std_dev(&self) -> f64 {
        self.variance.sqrt()
    }
}

/// Welch's t-statistic of `a` against `b` (unrounded).
pub fn welch_t_statistic(a: &[f64], b: &[f64]) -> Result<f64, AnalysisError> {
    let sa = SampleSummary::from_values(a)?;
    let sb = SampleSummary::from_values(b)?;

    let standard_error = (sa.variance / sa.n as f64 + sb.variance / sb.n as f64).sqrt();
    if standard_error == 0.0 {
        return Err(AnalysisError::ZeroStandardError);
    }

    let t = (sa.mean - sb.mean) / standard_error;
    if !t.is_finite() {
        return Err(AnalysisError::NonFiniteResult);
    }
    Ok(t)
}

/// Scores plus everything that was left out along the way.
#[derive(Debug, Clone, PartialEq)]
pub struct SignificanceOutcome {
    pub scores: GroupScores,
    pub skipped_rows: Vec<SkippedRow>,
    /// Groups with usable rows that still produced no statistic.
    pub excluded_groups: IndexMap<String, AnalysisError>,
}

/// Per-group Welch t-statistic of profit before vs. after, rounded to four
/// decimals.
pub fn group_significance(table: &Table, columns: &ColumnNames) -> Result<GroupScores, AnalysisError> {
    Ok(group_significance_detailed(table, columns)?.scores)
}

/// `group_significance`, also reporting skipped rows and excluded groups.
///
/// Only the group and the two profit columns are looked up, and a missing
/// one of those is the only fatal error.
pub fn group_significance_detailed(
    table: &Table,
    columns: &ColumnNames,
) -> Result<SignificanceOutcome, AnalysisError> {
    let group_col = table.column_index(&columns.group)?;
    let before_col = table.column_index(&columns.profit_before)?;
    let after_col = table.column_index(&columns.profit_after)?;

    let grouped = group_rows(table.rows(), RowPolicy::Skip, |row| {
        let group = row.field(group_col, &columns.group)?.to_string();
        let before = row.parse_float(before_col, &columns.profit_before)?;
        let after = row.parse_float(after_col, &columns.profit_after)?;
        Ok((group, (before, after)))
    })?;

    let mut scores = GroupScores::with_capacity(grouped.groups.len());
    let mut excluded_groups = IndexMap::new();

    for (group, pairs) in grouped.groups {
        let (before, after) = unzip_pairs(&pairs);
        match welch_t_statistic(&before, &after) {
            Ok(t) => {
                scores.insert(group, round_score(t));
            }
            Err(err) => {
                warn!(group = %group, error = %err, "no t-statistic for group");
                excluded_groups.insert(group, err);
            }
        }
    }

    debug!(
        groups = scores.len(),
        skipped_rows = grouped.skipped.len(),
        excluded_groups = excluded_groups.len(),
        "computed group significance"
    );

    Ok(SignificanceOutcome {
        scores,
        skipped_rows: grouped.skipped,
        excluded_groups,
    })
}
