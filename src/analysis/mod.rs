/// Numeric core of the business statistics service.
///
/// Submodules:
/// - `groupings`    — buckets rows per key under an abort / skip row policy.
/// - `rounding`     — pinned half-to-even rounding of published scores.
/// - `distance`     — Minkowski distance between employees and median salary.
/// - `significance` — Welch t-statistic of profit before vs. after.
/// - `combine`      — inner join of significance and distance per group.
/// - `ranking`      — per-category entity ranking by total employees.
pub mod groupings;
pub mod rounding;
pub mod distance;
pub mod significance;
pub mod combine;
pub mod ranking;

pub use combine::{combine, combine_scores};
pub use distance::{group_distances, point_distance};
pub use ranking::{rank_categories, rank_categories_detailed};
pub use significance::{group_significance, group_significance_detailed, welch_t_statistic};
