//! Joins significance and distance scores per group.

use crate::analysis::distance::group_distances;
use crate::analysis::significance::group_significance;
use crate::config::AnalysisConfig;
use crate::ingest::Table;
use crate::model::{AnalysisError, CompositeResult, GroupScores};

/// Inner join of the two score maps on group key.
///
/// Output follows the significance map's key order; keys present on only
/// one side are dropped.
pub fn combine_scores(significance: &GroupScores, distances: &GroupScores) -> CompositeResult {
    significance
        .iter()
        .filter_map(|(group, &t)| distances.get(group).map(|&d| (group.clone(), (t, d))))
        .collect()
}

/// Runs both engines over `table` and joins their results.
///
/// Any distance-engine failure aborts the whole call.
pub fn combine(table: &Table, config: &AnalysisConfig) -> Result<CompositeResult, AnalysisError> {
    let significance = group_significance(table, &config.columns)?;
    let distances = group_distances(table, &config.columns, config.minkowski_exponent)?;
    Ok(combine_scores(&significance, &distances))
}
