//! Orchestration: runs every analysis over one table and packages the
//! results for output.
//!
//! The two top-level results are the composite per-group scores and the
//! per-category ranking. The envelope around them records when and how the
//! report was produced, and how many rows each tolerant engine left out.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::analysis::combine_scores;
use crate::analysis::distance::group_distances;
use crate::analysis::ranking::rank_categories_detailed;
use crate::analysis::significance::group_significance_detailed;
use crate::config::{AnalysisConfig, ConfigError};
use crate::ingest::{LoadError, Table};
use crate::model::{AnalysisError, CategoryRanking, CompositeResult};

/// Any failure between reading the input and producing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Rows left out by the tolerant engines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SkipSummary {
    pub significance_rows: usize,
    pub significance_groups: usize,
    pub ranking_rows: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub generated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub minkowski_exponent: f64,
    pub rows: usize,
    /// Group → [t-statistic, distance]
    pub composite: CompositeResult,
    /// Category → entity → [[employees, "pct change", rank], ...]
    pub categories: CategoryRanking,
    pub skipped: SkipSummary,
}

impl AnalysisReport {
    pub fn to_json(&self, pretty: bool) -> Result<String, ReportError> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

/// Runs the composite analysis and the category ranking over `table`.
///
/// A distance-engine failure aborts the whole run; no partial report is
/// returned.
pub fn run(table: &Table, config: &AnalysisConfig) -> Result<AnalysisReport, AnalysisError> {
    let significance = group_significance_detailed(table, &config.columns)?;
    let distances = group_distances(table, &config.columns, config.minkowski_exponent)?;
    let composite = combine_scores(&significance.scores, &distances);

    let ranking = rank_categories_detailed(table, &config.category_layout);

    let skipped = SkipSummary {
        significance_rows: significance.skipped_rows.len(),
        significance_groups: significance.excluded_groups.len(),
        ranking_rows: ranking.skipped_rows.len(),
    };

    info!(
        rows = table.len(),
        groups = composite.len(),
        categories = ranking.ranking.len(),
        "analysis complete"
    );

    Ok(AnalysisReport {
        generated_at: Utc::now(),
        source: None,
        minkowski_exponent: config.minkowski_exponent,
        rows: table.len(),
        composite,
        categories: ranking.ranking,
        skipped,
    })
}

/// Loads `path` and runs `run` over it.
pub fn run_file(path: &Path, config: &AnalysisConfig) -> Result<AnalysisReport, ReportError> {
    let table = Table::from_path(path)?;
    info!(path = %path.display(), rows = table.len(), "loaded table");

    let mut report = run(&table, config)?;
    report.source = Some(path.display().to_string());
    Ok(report)
}
