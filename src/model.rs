//! Shared data types for the business statistics service.
//!
//! Every engine produces insertion-ordered maps: the order in which a group,
//! category, or entity is first encountered in the input is part of the
//! output contract, so `IndexMap` is used throughout instead of `HashMap`.

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeTuple, Serializer};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Result shapes
// ---------------------------------------------------------------------------

/// Group key → rounded scalar, in first-encounter order of the group.
pub type GroupScores = IndexMap<String, f64>;

/// Group key → (t-statistic, distance). Serializes as `[t, distance]`.
pub type CompositeResult = IndexMap<String, (f64, f64)>;

/// Category → entity id → one ranked entry per contributing row.
pub type CategoryRanking = IndexMap<String, IndexMap<String, Vec<RankedEntry>>>;

/// One contributing row of a ranked category entity.
///
/// Serializes as the triple `[employees, "percentage change", rank]`.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedEntry {
    pub employees: i64,
    /// Absolute percentage change of profit, fixed to 4 decimal places.
    pub change_pct: String,
    /// 1-based rank of the owning entity within its category.
    pub rank: usize,
}

impl RankedEntry {
    /// Parses the stored percentage string back into a number.
    pub fn change_pct_value(&self) -> Option<f64> {
        self.change_pct.parse().ok()
    }
}

impl Serialize for RankedEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut triple = serializer.serialize_tuple(3)?;
        triple.serialize_element(&self.employees)?;
        triple.serialize_element(&self.change_pct)?;
        triple.serialize_element(&self.rank)?;
        triple.end()
    }
}

/// A row that an engine left out of its computation.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRow {
    /// 1-based line number in the source table (the header is line 1).
    pub line: usize,
    pub reason: SkipReason,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a single row was not usable by an engine.
///
/// Tolerant engines log and drop the row; the distance engine escalates the
/// first one into `AnalysisError::MalformedRow`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SkipReason {
    #[error("row has no field '{column}' at index {index}")]
    MissingField { column: String, index: usize },
    #[error("field '{column}' is not a valid number: {value:?}")]
    MalformedNumber { column: String, value: String },
    #[error("employee count {0} is not positive")]
    NonPositiveEmployees(i64),
    #[error("base-period profit is zero, percentage change is undefined")]
    ZeroBaseProfit,
}

/// Fatal failures of the computational core.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("input vectors must have the same dimensionality ({left} != {right})")]
    DimensionMismatch { left: usize, right: usize },
    #[error("input vectors must not be empty")]
    EmptyInput,
    #[error("distance exponent must be a positive finite number, got {0}")]
    InvalidExponent(f64),
    #[error("required column '{0}' not found in header")]
    MissingColumn(String),
    #[error("line {line}: {reason}")]
    MalformedRow { line: usize, reason: SkipReason },
    #[error("sample of {n} observation(s) is too small for a variance estimate")]
    InsufficientSample { n: usize },
    #[error("both samples have zero variance, t-statistic is undefined")]
    ZeroStandardError,
    #[error("result is not a finite number")]
    NonFiniteResult,
}
