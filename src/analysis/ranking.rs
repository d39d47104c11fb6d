//! Category ranking engine.
//!
//! Buckets rows by (category, entity id), annotates each row with its
//! absolute profit change in percent, and ranks the entities of every
//! category by total employee count.
//!
//! Unlike the other engines, fields are read by fixed position
//! (`CategoryLayout`), not by header name. Categories are lower-cased before
//! grouping; entity ids are taken verbatim.
//!
//! Ranking is done in separate passes over immutable data:
//!   1. bucket parsed rows per category and entity
//!   2. compute a rank per entity (descending size, stable on first appearance)
//!   3. build a fresh output pairing every row with its entity's rank
//!
//! Since the output is built anew, ranking the same table twice yields the
//! same result.

use indexmap::IndexMap;
use tracing::debug;

use crate::analysis::groupings::group_rows_lenient;
use crate::config::CategoryLayout;
use crate::ingest::{Row, Table};
use crate::model::{CategoryRanking, RankedEntry, SkipReason, SkippedRow};

/// Decimal places of the published percentage-change string.
const PERCENT_DECIMALS: usize = 4;

/// One usable row, before ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRow {
    pub entity_id: String,
    pub employees: i64,
    pub change_pct: String,
}

/// Ranking plus the rows that were left out.
#[derive(Debug, Clone, PartialEq)]
pub struct RankingOutcome {
    pub ranking: CategoryRanking,
    pub skipped_rows: Vec<SkippedRow>,
}

/// `|(after - before) / before| * 100`.
///
/// Returns `None` when `before` is zero.
pub fn percent_change(before: f64, after: f64) -> Option<f64> {
    if before == 0.0 {
        return None;
    }
    Some(((after - before) / before * 100.0).abs())
}

/// Fixed four-decimal rendering used in the ranking output.
pub fn format_percent(value: f64) -> String {
    format!("{:.*}", PERCENT_DECIMALS, value)
}

/// Parses one row into its category key and `CategoryRow`.
///
/// Skips rows that are too short, hold unparseable numbers, have a
/// non-positive employee count, or a zero base-period profit.
pub fn parse_category_row(row: &Row, layout: &CategoryLayout) -> Result<(String, CategoryRow), SkipReason> {
    let category = row.field(layout.category, "category")?.to_lowercase();
    let entity_id = row.field(layout.entity_id, "entity id")?.to_string();
    let employees = row.parse_int(layout.employees, "employees")?;
    let before = row.parse_float(layout.profit_before, "profit before")?;
    let after = row.parse_float(layout.profit_after, "profit after")?;

    if employees <= 0 {
        return Err(SkipReason::NonPositiveEmployees(employees));
    }
    let change = percent_change(before, after).ok_or(SkipReason::ZeroBaseProfit)?;

    Ok((
        category,
        CategoryRow {
            entity_id,
            employees,
            change_pct: format_percent(change),
        },
    ))
}

/// Ranks entities within each category by total employees.
pub fn rank_categories(table: &Table, layout: &CategoryLayout) -> CategoryRanking {
    rank_categories_detailed(table, layout).ranking
}

/// `rank_categories`, also reporting skipped rows.
pub fn rank_categories_detailed(table: &Table, layout: &CategoryLayout) -> RankingOutcome {
    let grouped = group_rows_lenient(table.rows(), |row| parse_category_row(row, layout));

    let mut ranking = CategoryRanking::with_capacity(grouped.groups.len());
    for (category, rows) in grouped.groups {
        let entities = bucket_entities(rows);
        let ranks = entity_ranks(&entities);
        ranking.insert(category, attach_ranks(entities, &ranks));
    }

    debug!(
        categories = ranking.len(),
        skipped_rows = grouped.skipped.len(),
        "ranked categories"
    );

    RankingOutcome {
        ranking,
        skipped_rows: grouped.skipped,
    }
}

// ---------------------------------------------------------------------------
// Passes
// ---------------------------------------------------------------------------

fn bucket_entities(rows: Vec<CategoryRow>) -> IndexMap<String, Vec<CategoryRow>> {
    let mut entities: IndexMap<String, Vec<CategoryRow>> = IndexMap::new();
    for row in rows {
        entities.entry(row.entity_id.clone()).or_default().push(row);
    }
    entities
}

/// Entity id → 1-based rank. Ranks are dense and unique: equal sizes keep
/// first-appearance order thanks to the stable sort.
///
/// Sizes are summed as `i128` so any number of `i64` counts fits.
fn entity_ranks(entities: &IndexMap<String, Vec<CategoryRow>>) -> IndexMap<String, usize> {
    let mut sizes: Vec<(&str, i128)> = entities
        .iter()
        .map(|(id, rows)| {
            let size: i128 = rows.iter().map(|r| i128::from(r.employees)).sum();
            (id.as_str(), size)
        })
        .collect();

    sizes.sort_by(|a, b| b.1.cmp(&a.1));

    sizes
        .into_iter()
        .enumerate()
        .map(|(idx, (id, _))| (id.to_string(), idx + 1))
        .collect()
}

fn attach_ranks(
    entities: IndexMap<String, Vec<CategoryRow>>,
    ranks: &IndexMap<String, usize>,
) -> IndexMap<String, Vec<RankedEntry>> {
    entities
        .into_iter()
        .map(|(id, rows)| {
            let rank = ranks.get(&id).copied().unwrap_or_default();
            let entries = rows
                .into_iter()
                .map(|row| RankedEntry {
                    employees: row.employees,
                    change_pct: row.change_pct,
                    rank,
                })
                .collect();
            (id, entries)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::fixtures::*;

    fn entry(employees: i64, change_pct: &str, rank: usize) -> RankedEntry {
        RankedEntry {
            employees,
            change_pct: change_pct.to_string(),
            rank,
        }
    }

    fn fixture_ranking() -> RankingOutcome {
        let table = Table::from_csv_str(fixture_companies_csv()).expect("fixture should parse");
        rank_categories_detailed(&table, &CategoryLayout::default())
    }

    // --- Percent change ---------------------------------------------------------

    #[test]
    fn test_percent_change_is_absolute() {
        assert_eq!(percent_change(10.0, 8.0), Some(20.0));
        assert_eq!(percent_change(10.0, 12.0), Some(20.0));
        assert_eq!(percent_change(-4.0, -2.0), Some(50.0));
        assert_eq!(percent_change(0.0, 3.0), None);
    }

    #[test]
    fn test_format_percent_fixed_four_places() {
        assert_eq!(format_percent(25.0), "25.0000");
        assert_eq!(format_percent(100.0 / 12.0), "8.3333");
        assert_eq!(format_percent(0.0), "0.0000");
    }

    // --- Ranking ------------------------------------------------------------------

    #[test]
    fn test_rank_categories_fixture() {
        let outcome = fixture_ranking();
        let ranking = &outcome.ranking;

        let categories: Vec<&str> = ranking.keys().map(String::as_str).collect();
        assert_eq!(categories, vec!["retail", "software"], "categories are lower-cased");

        let retail = &ranking["retail"];
        let ids: Vec<&str> = retail.keys().map(String::as_str).collect();
        assert_eq!(ids, vec!["A1", "B2", "F6"], "entities stay in first-appearance order");
        assert_eq!(retail["A1"], vec![entry(10, "10.0000", 1), entry(25, "25.0000", 1)]);
        assert_eq!(retail["B2"], vec![entry(20, "8.3333", 3)]);
        assert_eq!(retail["F6"], vec![entry(35, "50.0000", 2)]);

        let software = &ranking["software"];
        assert_eq!(software["C3"], vec![entry(30, "25.0000", 2)]);
        assert_eq!(software["G7"], vec![entry(45, "20.0000", 1)]);
    }

    #[test]
    fn test_tie_keeps_first_appearance_order() {
        let table = Table::from_csv_str(
            "id,b,c,d,e,category,employees,h,p0,p1\n\
             A,,,,,retail,50,,1.0,2.0\n\
             B,,,,,retail,20,,1.0,2.0\n\
             B,,,,,retail,30,,1.0,2.0\n",
        )
        .expect("should parse");
        let ranking = rank_categories(&table, &CategoryLayout::default());

        assert_eq!(ranking["retail"]["A"][0].rank, 1);
        assert!(ranking["retail"]["B"].iter().all(|e| e.rank == 2));
    }

    #[test]
    fn test_huge_head_counts_do_not_overflow() {
        // A sums to 2 * i64::MAX, beyond i64.
        let table = Table::from_csv_str(
            "id,b,c,d,e,category,employees,h,p0,p1\n\
             B,,,,,retail,9223372036854775807,,1.0,2.0\n\
             A,,,,,retail,9223372036854775807,,1.0,2.0\n\
             A,,,,,retail,9223372036854775807,,1.0,2.0\n",
        )
        .expect("should parse");
        let ranking = rank_categories(&table, &CategoryLayout::default());

        assert!(ranking["retail"]["A"].iter().all(|e| e.rank == 1));
        assert_eq!(ranking["retail"]["B"][0].rank, 2);
        assert_eq!(ranking["retail"]["A"][0].employees, i64::MAX);
    }

    #[test]
    fn test_ranks_are_unique_and_dense() {
        let outcome = fixture_ranking();
        for (category, entities) in &outcome.ranking {
            let mut ranks: Vec<usize> = entities.values().map(|rows| rows[0].rank).collect();
            ranks.sort_unstable();
            let expected: Vec<usize> = (1..=entities.len()).collect();
            assert_eq!(ranks, expected, "category {category}");
        }
    }

    #[test]
    fn test_every_row_of_an_entity_shares_its_rank() {
        let outcome = fixture_ranking();
        for entities in outcome.ranking.values() {
            for rows in entities.values() {
                assert!(rows.iter().all(|e| e.rank == rows[0].rank));
            }
        }
    }

    #[test]
    fn test_skip_rules() {
        let table = Table::from_csv_str(fixture_ranking_edge_cases_csv())
            .expect("fixture should parse");
        let outcome = rank_categories_detailed(&table, &CategoryLayout::default());

        let energy = &outcome.ranking["energy"];
        let ids: Vec<&str> = energy.keys().map(String::as_str).collect();
        assert_eq!(ids, vec!["K1", "O5"]);
        assert_eq!(energy["O5"], vec![entry(30, "25.0000", 1)]);
        assert_eq!(energy["K1"], vec![entry(12, "25.0000", 2)]);

        let reasons: Vec<(usize, &SkipReason)> = outcome
            .skipped_rows
            .iter()
            .map(|s| (s.line, &s.reason))
            .collect();
        assert_eq!(reasons.len(), 3);
        assert!(matches!(reasons[0], (3, SkipReason::MissingField { .. })));
        assert_eq!(reasons[1], (4, &SkipReason::NonPositiveEmployees(-4)));
        assert_eq!(reasons[2], (5, &SkipReason::ZeroBaseProfit));
    }

    #[test]
    fn test_zero_employee_and_malformed_rows_skipped_in_fixture() {
        let outcome = fixture_ranking();
        let lines: Vec<usize> = outcome.skipped_rows.iter().map(|s| s.line).collect();
        // D4 ("n/a" profit) and E5 (zero employees)
        assert_eq!(lines, vec![5, 6]);
        assert!(!outcome.ranking["software"].contains_key("D4"));
        assert!(!outcome.ranking["software"].contains_key("E5"));
    }

    #[test]
    fn test_ranking_twice_is_idempotent() {
        let table = Table::from_csv_str(fixture_companies_csv()).expect("fixture should parse");
        let first = rank_categories(&table, &CategoryLayout::default());
        let second = rank_categories(&table, &CategoryLayout::default());
        assert_eq!(first, second);
        assert!(first["retail"]["A1"].iter().all(|e| e.rank == 1));
    }

    #[test]
    fn test_percent_string_round_trips() {
        let outcome = fixture_ranking();
        let b2 = &outcome.ranking["retail"]["B2"][0];
        assert_eq!(b2.change_pct_value(), Some(8.3333));
    }

    #[test]
    fn test_header_only_table_ranks_nothing() {
        let table = Table::from_csv_str("id,b,c,d,e,category,employees,h,p0,p1\n")
            .expect("should parse");
        assert!(rank_categories(&table, &CategoryLayout::default()).is_empty());
    }
}
