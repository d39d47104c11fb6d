//! bizstats_service: distance, significance and ranking analyses over a
//! company dataset export.
//!
//! # Module structure
//!
//! ```text
//! bizstats_service
//! ├── model       — shared result types and errors (RankedEntry, AnalysisError, …)
//! ├── config      — analysis.toml loader (column names, positions, exponent)
//! ├── ingest
//! │   ├── table   — delimited text → header + rows, typed cell accessors
//! │   └── fixtures (test only) — representative dataset exports
//! ├── analysis
//! │   ├── groupings    — per-key bucketing with abort / skip row policy
//! │   ├── rounding     — half-to-even rounding of published scores
//! │   ├── distance     — Minkowski distance per group
//! │   ├── significance — Welch t-statistic per group
//! │   ├── combine      — inner join of the two per-group scores
//! │   └── ranking      — per-category entity ranking
//! └── report      — runs everything over one table, JSON envelope
//! ```

pub mod analysis;
pub mod config;
pub mod ingest;
pub mod model;
pub mod report;
